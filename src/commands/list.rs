//! List command service: configured agents and their cached rule counts.

use crate::config::{rule_cache_path, ProjectConfig};
use crate::error::ApiError;
use crate::rules::RuleCache;
use serde::Serialize;
use std::path::Path;

pub struct ListCommandService;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentListItem {
    pub name: String,
    pub command_group: Option<String>,
    pub rule_file_pattern: String,
    pub references: Vec<String>,
    /// `None` when the cache has no entry for the agent
    pub cached_rules: Option<usize>,
}

/// Result of the list command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentListResult {
    pub agents: Vec<AgentListItem>,
    pub cache_present: bool,
}

impl ListCommandService {
    pub fn run(workspace_root: &Path, config: &ProjectConfig) -> Result<AgentListResult, ApiError> {
        let cache_path = rule_cache_path(workspace_root);
        let cache = if cache_path.exists() {
            Some(RuleCache::load(&cache_path)?)
        } else {
            None
        };
        Ok(Self::list(config, cache.as_ref()))
    }

    pub fn list(config: &ProjectConfig, cache: Option<&RuleCache>) -> AgentListResult {
        let agents = config
            .agents
            .iter()
            .map(|(name, agent)| AgentListItem {
                name: name.clone(),
                command_group: agent.command_group.clone(),
                rule_file_pattern: agent.rule_file_pattern.clone(),
                references: agent.references.clone(),
                cached_rules: cache.and_then(|c| c.get(name)).map(<[_]>::len),
            })
            .collect();
        AgentListResult {
            agents,
            cache_present: cache.is_some(),
        }
    }
}
