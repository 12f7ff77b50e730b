//! Closure Engine
//!
//! Computes the set of rules applicable to a target path: direct pattern matches
//! plus everything reachable from them through tag references.

use crate::error::ApiError;
use crate::rules::cache::RuleCache;
use crate::rules::entry::{ResolvedRule, RuleKey};
use crate::rules::matcher;
use crate::types::AgentDepth;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Non-fatal conditions found while resolving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An agent in the reference chain has no entry in the cache
    UnknownAgent { agent: String, depth: AgentDepth },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownAgent { agent, .. } => {
                write!(f, "No rules found for agent '{}' in cache", agent)
            }
        }
    }
}

/// Result of a resolution: included rules (unordered) and diagnostics.
#[derive(Debug, Clone, Default)]
pub struct Resolution<'a> {
    pub rules: Vec<ResolvedRule<'a>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolution<'_> {
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Resolve the rules applying to `target_path` for `requesting_agent` and its
/// reference chain.
pub fn resolve<'a>(
    cache: &'a RuleCache,
    requesting_agent: &str,
    reference_chain: &[String],
    target_path: &str,
) -> Result<Resolution<'a>, ApiError> {
    let mut diagnostics = Vec::new();

    // Flatten: requester at depth 0, then each reference at its chain position.
    let mut candidates: Vec<ResolvedRule<'a>> = Vec::new();
    let chain = std::iter::once(requesting_agent).chain(reference_chain.iter().map(String::as_str));
    for (depth, agent) in chain.enumerate() {
        match cache.get(agent) {
            Some(entries) => {
                candidates.extend(entries.iter().map(|entry| ResolvedRule::new(entry, depth)))
            }
            None => diagnostics.push(Diagnostic::UnknownAgent {
                agent: agent.to_string(),
                depth,
            }),
        }
    }

    let mut tag_index: HashMap<&'a str, Vec<usize>> = HashMap::new();
    for (idx, candidate) in candidates.iter().enumerate() {
        for tag in &candidate.entry.tags {
            tag_index.entry(tag.as_str()).or_default().push(idx);
        }
    }

    let mut top_level = Vec::new();
    for (idx, candidate) in candidates.iter().enumerate() {
        if is_top_level(candidate, target_path)? {
            top_level.push(idx);
        }
    }

    let included = expand(&candidates, &tag_index, &top_level);
    tracing::debug!(
        target = %target_path,
        candidates = candidates.len(),
        top_level = top_level.len(),
        included = included.len(),
        "Resolved rule closure"
    );

    Ok(Resolution {
        rules: included.into_iter().map(|idx| candidates[idx]).collect(),
        diagnostics,
    })
}

/// Some pattern matches and no ignore pattern does.
fn is_top_level(candidate: &ResolvedRule<'_>, target_path: &str) -> Result<bool, ApiError> {
    let matched = matcher::matches_any(&candidate.entry.patterns, target_path)?;
    let ignored = matcher::matches_any(&candidate.entry.ignore_patterns, target_path)?;
    Ok(matched && !ignored)
}

/// Depth-first, pre-order expansion from the top-level seeds.
///
/// A visit stops as soon as its `(path, depth)` key is already included, which is
/// what terminates reference cycles. Only seed visits follow `referencesIfTop`.
fn expand<'a>(
    candidates: &[ResolvedRule<'a>],
    tag_index: &HashMap<&'a str, Vec<usize>>,
    seeds: &[usize],
) -> Vec<usize> {
    let mut included_keys: HashSet<RuleKey<'a>> = HashSet::new();
    let mut included = Vec::new();

    // Pushed in reverse so pops follow the same order as a recursive walk.
    let mut stack: Vec<(usize, bool)> = seeds.iter().rev().map(|&idx| (idx, true)).collect();

    while let Some((idx, is_top)) = stack.pop() {
        let candidate = &candidates[idx];
        if !included_keys.insert(candidate.key()) {
            continue;
        }
        included.push(idx);

        let mut referenced: Vec<usize> = Vec::new();
        let tags = candidate.entry.references_always.iter().chain(
            candidate
                .entry
                .references_if_top
                .iter()
                .filter(|_| is_top),
        );
        for tag in tags {
            if let Some(indices) = tag_index.get(tag.as_str()) {
                referenced.extend(indices);
            }
        }
        stack.extend(referenced.into_iter().rev().map(|next| (next, false)));
    }

    included
}
