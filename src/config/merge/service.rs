//! MergeService: orchestrates sources, deserializes, validates to ProjectConfig.

use crate::config::sources::{environment, project_file};
use crate::config::validation::{self, RawProjectConfig};
use crate::config::{config_file_path, ProjectConfig};
use crate::error::ApiError;
use std::path::Path;
use tracing::debug;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config for a workspace.
    /// Precedence: project file (lowest) -> environment (highest, logging only).
    pub fn load(workspace_root: &Path) -> Result<ProjectConfig, ApiError> {
        let path = config_file_path(workspace_root);
        debug!(path = %path.display(), "Loading project configuration");
        Self::finish(project_file::read(&path, false)?)
    }

    /// Load config from a specific file with environment overlay. The file must exist.
    pub fn load_from_file(path: &Path) -> Result<ProjectConfig, ApiError> {
        debug!(path = %path.display(), "Loading configuration file");
        Self::finish(project_file::read(path, true)?)
    }

    fn finish(mut raw: RawProjectConfig) -> Result<ProjectConfig, ApiError> {
        raw.logging = environment::overlay_logging(raw.logging.take())?;
        validation::validate(raw)
    }
}
