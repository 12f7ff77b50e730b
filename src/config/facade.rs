//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::ProjectConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the workspace's config file and environment.
    pub fn load(workspace_root: &Path) -> Result<ProjectConfig, ApiError> {
        MergeService::load(workspace_root)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<ProjectConfig, ApiError> {
        MergeService::load_from_file(path)
    }

    /// Load from `config_path` when given, otherwise from the workspace.
    pub fn resolve(workspace_root: &Path, config_path: Option<&Path>) -> Result<ProjectConfig, ApiError> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(workspace_root),
        }
    }

    /// Create default configuration.
    pub fn default() -> ProjectConfig {
        ProjectConfig::default()
    }
}
