//! Load command service: resolve, budget, and render the rules for one target file.

use crate::config::{rule_cache_path, ProjectConfig};
use crate::error::ApiError;
use crate::rules::matcher::normalize_path;
use crate::rules::{budget, closure, render, FsRuleSource, RuleCache, RuleSource};
use std::path::Path;
use tracing::{debug, warn};

pub struct LoadCommandService;

/// Result of the load command.
#[derive(Debug, Clone)]
pub struct LoadResult {
    pub agent: String,
    /// Rule documents in emission order
    pub rules: Vec<String>,
    pub text: String,
}

impl LoadCommandService {
    /// Load context for `target` using the agent that owns `command_group`.
    pub fn run(
        workspace_root: &Path,
        config: &ProjectConfig,
        command_group: Option<&str>,
        target: &str,
    ) -> Result<LoadResult, ApiError> {
        let (agent, _) = config.agent_for_group(command_group)?;
        debug!(agent = %agent, group = ?command_group, "Selected agent");
        let cache = RuleCache::load(&rule_cache_path(workspace_root))?;
        let source = FsRuleSource::new(workspace_root);
        Self::run_with(&cache, &source, config, agent, target)
    }

    /// Load context for `target` as `agent` from an already loaded cache.
    pub fn run_with(
        cache: &RuleCache,
        source: &dyn RuleSource,
        config: &ProjectConfig,
        agent: &str,
        target: &str,
    ) -> Result<LoadResult, ApiError> {
        let agent_config = config.agent(agent)?;
        let target_path = normalize_path(target);

        let resolution =
            closure::resolve(cache, agent, &agent_config.references, &target_path)?;
        for diagnostic in &resolution.diagnostics {
            warn!("{}", diagnostic);
        }

        let rules = budget::filter(resolution.rules);
        let text = render::render(&rules, target, source)?;
        Ok(LoadResult {
            agent: agent.to_string(),
            rules: rules.iter().map(|r| r.path().to_string()).collect(),
            text,
        })
    }
}
