//! Project config file source (JSON with comments, parsed as JSON5).
//!
//! Read directly rather than through the `config` crate, whose file sources
//! lowercase map keys and would rename agents.

use crate::config::validation::RawProjectConfig;
use crate::error::{ApiError, StorageError};
use std::io::ErrorKind;
use std::path::Path;

/// Read the project config file. When `required` is false a missing file reads
/// as an empty configuration.
pub fn read(path: &Path, required: bool) -> Result<RawProjectConfig, ApiError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound && !required => {
            return Ok(RawProjectConfig::default())
        }
        Err(e) => return Err(StorageError::read(path, e).into()),
    };
    json5::from_str(&text).map_err(|e| {
        ApiError::ConfigError(format!("Failed to parse {}: {}", path.display(), e))
    })
}
