//! Configuration Management
//!
//! Project configuration is read from `.config/code-editor-agent.jsonc` (JSON with
//! comments and trailing commas) and overlaid with `CODE_EDITOR_AGENT__*`
//! environment variables. A missing file yields the default configuration.

pub mod facade;
pub mod merge;
pub mod sources;
pub mod validation;

pub use facade::ConfigLoader;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Project configuration file, relative to the workspace root.
pub const CONFIG_FILE_PATH: &str = ".config/code-editor-agent.jsonc";

/// Rule cache file, relative to the workspace root.
pub const RULE_CACHE_FILE_PATH: &str = ".claude/agents/code-editor/rules-cache-generated.json";

/// Prefix of configuration overlay environment variables.
pub const ENV_PREFIX: &str = "CODE_EDITOR_AGENT";

pub const DEFAULT_AGENT_NAME: &str = "code-editor";
pub const DEFAULT_RULE_FILE_PATTERN: &str = "**/*.code-editor-agent.md";
pub const DEFAULT_EXCLUDE: &str = "./node_modules/**";

/// Command group reserved for built-in commands.
pub const RESERVED_COMMAND_GROUP: &str = "cmd";

/// Validated project configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Discovery exclusions applied to every agent
    pub exclude: Vec<String>,

    /// Agents by name
    pub agents: BTreeMap<String, AgentConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

/// One agent's discovery pattern, command group, and reference chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    pub rule_file_pattern: String,

    /// `None` is the group selected when no group argument is given
    pub command_group: Option<String>,

    /// Agents whose rules are also considered, in depth order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
}

impl AgentConfig {
    pub fn new(rule_file_pattern: impl Into<String>, command_group: Option<String>) -> Self {
        Self {
            rule_file_pattern: rule_file_pattern.into(),
            command_group,
            references: Vec::new(),
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            exclude: vec![DEFAULT_EXCLUDE.to_string()],
            agents: default_agents(),
            logging: None,
        }
    }
}

/// The agent set used when the configuration defines none.
pub fn default_agents() -> BTreeMap<String, AgentConfig> {
    let mut agents = BTreeMap::new();
    agents.insert(
        DEFAULT_AGENT_NAME.to_string(),
        AgentConfig::new(DEFAULT_RULE_FILE_PATTERN, None),
    );
    agents
}

impl ProjectConfig {
    /// The agent owning `command_group` (`None` selects the null group).
    pub fn agent_for_group(&self, command_group: Option<&str>) -> Result<(&str, &AgentConfig), ApiError> {
        self.agents
            .iter()
            .find(|(_, agent)| agent.command_group.as_deref() == command_group)
            .map(|(name, agent)| (name.as_str(), agent))
            .ok_or_else(|| {
                ApiError::CommandGroupNotFound(command_group.unwrap_or("null").to_string())
            })
    }

    pub fn agent(&self, name: &str) -> Result<&AgentConfig, ApiError> {
        self.agents
            .get(name)
            .ok_or_else(|| ApiError::AgentNotFound(name.to_string()))
    }

    /// Canonical file text: two-space indented JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String, ApiError> {
        let mut json = serde_json::to_string_pretty(self)
            .map_err(|e| ApiError::serialization("configuration", e))?;
        json.push('\n');
        Ok(json)
    }
}

/// Location of the configuration file for a workspace.
pub fn config_file_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(CONFIG_FILE_PATH)
}

/// Location of the rule cache for a workspace.
pub fn rule_cache_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(RULE_CACHE_FILE_PATH)
}
