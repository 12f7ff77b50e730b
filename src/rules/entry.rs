//! Rule records as stored in the cache and as seen during a single resolution.

use crate::types::{string_or_list, AgentDepth};
use serde::{Deserialize, Serialize};

/// One parsed rule document.
///
/// Field order is the on-disk key order of the cache file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleEntry {
    /// Glob patterns; a path matches the entry if it matches any of them
    #[serde(deserialize_with = "string_or_list")]
    pub patterns: Vec<String>,

    /// Workspace-relative location of the document, `/`-separated
    pub path: String,

    /// A path matching any of these is excluded even if `patterns` match
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Budget priority; `None` is never capped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u64>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Tags pulled in only when this entry matched the target path directly
    #[serde(default)]
    pub references_if_top: Vec<String>,

    /// Tags pulled in whenever this entry is included
    #[serde(default)]
    pub references_always: Vec<String>,

    /// Emission order; `None` sorts last
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u64>,
}

impl RuleEntry {
    /// Create an entry with the given location and patterns and no other metadata.
    pub fn new(path: impl Into<String>, patterns: Vec<String>) -> Self {
        Self {
            patterns,
            path: path.into(),
            ignore_patterns: Vec::new(),
            priority: None,
            tags: Vec::new(),
            references_if_top: Vec::new(),
            references_always: Vec::new(),
            order: None,
        }
    }
}

/// Deduplication identity of a candidate during closure expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleKey<'a> {
    pub path: &'a str,
    pub agent_depth: AgentDepth,
}

/// A cache entry annotated with the depth of the agent that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRule<'a> {
    pub entry: &'a RuleEntry,
    pub agent_depth: AgentDepth,
}

impl<'a> ResolvedRule<'a> {
    pub fn new(entry: &'a RuleEntry, agent_depth: AgentDepth) -> Self {
        Self { entry, agent_depth }
    }

    pub fn key(&self) -> RuleKey<'a> {
        RuleKey {
            path: &self.entry.path,
            agent_depth: self.agent_depth,
        }
    }

    pub fn path(&self) -> &'a str {
        &self.entry.path
    }

    /// Priority with absence mapped to +infinity.
    pub fn effective_priority(&self) -> u64 {
        self.entry.priority.unwrap_or(u64::MAX)
    }

    /// Order with absence mapped to +infinity.
    pub fn effective_order(&self) -> u64 {
        self.entry.order.unwrap_or(u64::MAX)
    }
}
