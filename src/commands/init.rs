//! Init command service: scaffold a workspace and build its first rule cache.

use crate::commands::generate::{GenerateCommandService, GenerateSummary};
use crate::commands::templates::{
    AGENT_DEFINITION, AGENT_DEFINITION_PATH, SAMPLE_RULE, SAMPLE_RULE_PATH,
};
use crate::config::{config_file_path, rule_cache_path, ConfigLoader, ProjectConfig, RULE_CACHE_FILE_PATH};
use crate::error::{ApiError, StorageError};
use std::path::{Path, PathBuf};
use tracing::info;

pub struct InitCommandService;

/// Result of the init command.
#[derive(Debug, Clone)]
pub struct InitSummary {
    pub created: Vec<PathBuf>,
    /// Files left as they were because they already existed
    pub skipped: Vec<PathBuf>,
    pub generate: GenerateSummary,
}

impl InitCommandService {
    /// Write the default config, sample rule, and agent definition, then build
    /// the cache. Refuses to run on an initialized workspace.
    pub fn run(workspace_root: &Path, config_path: Option<&Path>) -> Result<InitSummary, ApiError> {
        if rule_cache_path(workspace_root).exists() {
            return Err(ApiError::AlreadyInitialized(PathBuf::from(RULE_CACHE_FILE_PATH)));
        }

        let mut created = Vec::new();
        let mut skipped = Vec::new();

        let config_file = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| config_file_path(workspace_root));
        let default_config = ProjectConfig::default().to_json()?;
        for (path, content) in [
            (config_file.clone(), default_config.as_str()),
            (workspace_root.join(SAMPLE_RULE_PATH), SAMPLE_RULE),
        ] {
            if path.exists() {
                info!(path = %path.display(), "Keeping existing file");
                skipped.push(path);
            } else {
                write_file(&path, content)?;
                created.push(path);
            }
        }

        let agent_definition = workspace_root.join(AGENT_DEFINITION_PATH);
        write_file(&agent_definition, AGENT_DEFINITION)?;
        created.push(agent_definition);

        let config = ConfigLoader::resolve(workspace_root, Some(&config_file))?;
        let generate = GenerateCommandService::run(workspace_root, &config, true)?;

        Ok(InitSummary {
            created,
            skipped,
            generate,
        })
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), ApiError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| ApiError::StorageError(StorageError::write(parent, e)))?;
    }
    std::fs::write(path, content).map_err(|e| ApiError::StorageError(StorageError::write(path, e)))?;
    info!(path = %path.display(), "Wrote file");
    Ok(())
}
