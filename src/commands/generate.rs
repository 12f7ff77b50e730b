//! Generate command service: scan rule documents and replace the rule cache.

use crate::config::validation::validate_command_groups;
use crate::config::{rule_cache_path, ProjectConfig};
use crate::error::ApiError;
use crate::rules::{CacheBuilder, FsRuleSource, RuleCache, RuleSource};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct GenerateCommandService;

/// Rules found for one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentRuleCount {
    pub agent: String,
    pub rules: usize,
}

/// Result of the generate command.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateSummary {
    pub agents: Vec<AgentRuleCount>,
    pub cache_path: PathBuf,
}

impl GenerateSummary {
    pub fn total_rules(&self) -> usize {
        self.agents.iter().map(|a| a.rules).sum()
    }
}

impl GenerateCommandService {
    /// Rebuild the workspace's rule cache from disk.
    ///
    /// Without `force`, an absent cache file means the workspace was never
    /// initialized (or this is not its root) and nothing is scanned.
    pub fn run(
        workspace_root: &Path,
        config: &ProjectConfig,
        force: bool,
    ) -> Result<GenerateSummary, ApiError> {
        let cache_path = rule_cache_path(workspace_root);
        if !force && !cache_path.exists() {
            return Err(ApiError::NotInitialized(cache_path));
        }
        let source = FsRuleSource::new(workspace_root);
        Self::run_with_source(&source, config, &cache_path)
    }

    /// Build from `source` and write the cache to `cache_path`.
    pub fn run_with_source(
        source: &dyn RuleSource,
        config: &ProjectConfig,
        cache_path: &Path,
    ) -> Result<GenerateSummary, ApiError> {
        let cache = Self::build(source, config)?;
        cache.save(cache_path)?;

        let summary = GenerateSummary {
            agents: cache
                .agents()
                .map(|agent| AgentRuleCount {
                    agent: agent.to_string(),
                    rules: cache.get(agent).map(<[_]>::len).unwrap_or(0),
                })
                .collect(),
            cache_path: cache_path.to_path_buf(),
        };
        info!(
            path = %cache_path.display(),
            agents = summary.agents.len(),
            rules = summary.total_rules(),
            "Wrote rule cache"
        );
        Ok(summary)
    }

    /// Build the cache without writing it.
    pub fn build(source: &dyn RuleSource, config: &ProjectConfig) -> Result<RuleCache, ApiError> {
        validate_command_groups(&config.agents)?;
        CacheBuilder::new(source, &config.exclude)?.build(&config.agents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AgentConfig;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_refuses_uninitialized_workspace() {
        let temp = TempDir::new().unwrap();
        let err = GenerateCommandService::run(temp.path(), &ProjectConfig::default(), false)
            .unwrap_err();
        assert!(matches!(err, ApiError::NotInitialized(_)));
        assert!(err.to_string().starts_with("Very likely current working directory"));
        assert!(!rule_cache_path(temp.path()).exists());
    }

    #[test]
    fn test_force_builds_and_writes_cache() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.code-editor-agent.md", "---\npatterns: \"**\"\n---\nA");
        write(temp.path(), "node_modules/x/b.code-editor-agent.md", "---\npatterns: \"**\"\n---\nB");

        let summary =
            GenerateCommandService::run(temp.path(), &ProjectConfig::default(), true).unwrap();
        assert_eq!(
            summary.agents,
            vec![AgentRuleCount {
                agent: "code-editor".to_string(),
                rules: 1
            }]
        );
        let cache = RuleCache::load(&summary.cache_path).unwrap();
        assert_eq!(cache.get("code-editor").unwrap()[0].path, "a.code-editor-agent.md");

        // Existing cache: no force needed.
        assert!(GenerateCommandService::run(temp.path(), &ProjectConfig::default(), false).is_ok());
    }

    #[test]
    fn test_invalid_document_leaves_cache_untouched() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.code-editor-agent.md", "---\npatterns: \"**\"\n---\nA");
        GenerateCommandService::run(temp.path(), &ProjectConfig::default(), true).unwrap();
        let before = std::fs::read(rule_cache_path(temp.path())).unwrap();

        write(temp.path(), "b.code-editor-agent.md", "---\norder: 1\n---\nB");
        let err = GenerateCommandService::run(temp.path(), &ProjectConfig::default(), false)
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRule { .. }));
        assert_eq!(std::fs::read(rule_cache_path(temp.path())).unwrap(), before);
    }

    #[test]
    fn test_reserved_group_rejected_before_scanning() {
        let mut config = ProjectConfig::default();
        config.agents.insert(
            "tools".to_string(),
            AgentConfig::new("**/*.tools.md", Some("cmd".to_string())),
        );
        let source = crate::rules::MemoryRuleSource::new();
        assert!(matches!(
            GenerateCommandService::build(&source, &config),
            Err(ApiError::ConfigError(_))
        ));
    }
}
