//! Error Types
//!
//! `ApiError` is returned by every public operation. Filesystem failures are
//! wrapped in `StorageError` so the failing path always travels with the error.

use std::path::PathBuf;
use thiserror::Error;

/// Filesystem and cache persistence errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to scan {path}: {message}")]
    Walk { path: PathBuf, message: String },

    #[error("Failed to parse cache file {path}: {message}")]
    CorruptCache { path: PathBuf, message: String },
}

impl StorageError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Write {
            path: path.into(),
            source,
        }
    }
}

/// API-level errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Rule file {path}: {message}")]
    InvalidRule { path: String, message: String },

    #[error("Invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Agent '{0}' not found in configuration.")]
    AgentNotFound(String),

    #[error("No agent found with commandGroup: {0}")]
    CommandGroupNotFound(String),

    #[error("Very likely current working directory is not the root of the project, or `code-editor-agent cmd init` not yet run. (missing {0})")]
    NotInitialized(PathBuf),

    #[error("Very likely you have already initialized the agent. To re-initialize, delete the {0} file and retry.")]
    AlreadyInitialized(PathBuf),

    #[error("Failed to serialize {what}: {message}")]
    Serialization { what: String, message: String },

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
}

impl ApiError {
    pub(crate) fn serialization(what: &str, err: impl std::fmt::Display) -> Self {
        ApiError::Serialization {
            what: what.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn invalid_rule(path: &str, message: impl Into<String>) -> Self {
        ApiError::InvalidRule {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
