//! Cache Builder
//!
//! Scans each agent's rule documents, validates their metadata, and assembles a
//! `RuleCache`. Any invalid document fails the whole build; nothing is written
//! by this module.

use crate::config::AgentConfig;
use crate::error::ApiError;
use crate::rules::cache::RuleCache;
use crate::rules::entry::RuleEntry;
use crate::rules::frontmatter::{self, MetadataError, RuleMetadata};
use crate::rules::matcher::PatternSet;
use crate::rules::source::RuleSource;
use crate::types::StringOrList;
use std::collections::BTreeMap;
use tracing::{debug, info};

pub struct CacheBuilder<'a> {
    source: &'a dyn RuleSource,
    exclude: PatternSet,
}

impl<'a> CacheBuilder<'a> {
    pub fn new(source: &'a dyn RuleSource, exclude: &[String]) -> Result<Self, ApiError> {
        Ok(Self {
            source,
            exclude: PatternSet::new(exclude)?,
        })
    }

    /// Build the cache for every agent, in agent-name order.
    pub fn build(&self, agents: &BTreeMap<String, AgentConfig>) -> Result<RuleCache, ApiError> {
        let mut cache = RuleCache::new();
        for (agent_name, agent) in agents {
            info!(agent = %agent_name, pattern = %agent.rule_file_pattern, "Scanning rules");
            let entries = self.build_agent(agent)?;
            info!(agent = %agent_name, count = entries.len(), "Scanned rules");
            cache.insert(agent_name.clone(), entries);
        }
        Ok(cache)
    }

    fn build_agent(&self, agent: &AgentConfig) -> Result<Vec<RuleEntry>, ApiError> {
        let paths = self
            .source
            .discover(&agent.rule_file_pattern, &self.exclude)?;
        let mut entries = Vec::with_capacity(paths.len());
        for path in paths {
            debug!(path = %path, "Parsing rule document");
            let content = self.source.read(&path)?;
            entries.push(parse_entry(&path, &content)?);
        }
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }
}

/// Parse and validate one rule document into a cache entry.
pub fn parse_entry(path: &str, content: &str) -> Result<RuleEntry, ApiError> {
    let metadata = match frontmatter::parse_metadata(content) {
        Ok(metadata) => metadata,
        Err(MetadataError::Missing) => {
            return Err(ApiError::invalid_rule(
                path,
                "missing 'patterns' attribute (no front matter block).",
            ))
        }
        Err(e) => {
            return Err(ApiError::invalid_rule(
                path,
                format!("failed to parse front matter: {}", e),
            ))
        }
    };
    entry_from_metadata(path, metadata)
}

/// Normalize parsed metadata into a cache entry.
pub fn entry_from_metadata(path: &str, metadata: RuleMetadata) -> Result<RuleEntry, ApiError> {
    let patterns = normalize_field(path, "patterns", metadata.patterns)?;
    if patterns.is_empty() {
        return Err(ApiError::invalid_rule(path, "missing 'patterns' attribute."));
    }

    Ok(RuleEntry {
        patterns,
        path: path.to_string(),
        ignore_patterns: normalize_field(path, "ignorePatterns", metadata.ignore_patterns)?,
        priority: non_negative(path, "priority", metadata.priority)?,
        tags: normalize_field(path, "tags", metadata.tags)?,
        references_if_top: normalize_field(path, "referencesIfTop", metadata.references_if_top)?,
        references_always: normalize_field(
            path,
            "referencesAlways",
            metadata.references_always,
        )?,
        order: non_negative(path, "order", metadata.order)?,
    })
}

fn normalize_field(
    path: &str,
    field: &str,
    value: Option<serde_yaml::Value>,
) -> Result<Vec<String>, ApiError> {
    match value {
        None | Some(serde_yaml::Value::Null) => Ok(Vec::new()),
        Some(value) => serde_yaml::from_value::<StringOrList>(value)
            .map(StringOrList::into_vec)
            .map_err(|_| {
                ApiError::invalid_rule(
                    path,
                    format!("'{}' must be a string or array of strings.", field),
                )
            }),
    }
}

fn non_negative(path: &str, field: &str, value: Option<i64>) -> Result<Option<u64>, ApiError> {
    value
        .map(|v| {
            u64::try_from(v).map_err(|_| {
                ApiError::invalid_rule(path, format!("'{}' must be a non-negative number.", field))
            })
        })
        .transpose()
}
