//! Environment variable source: CODE_EDITOR_AGENT__ prefix with __ separator.
//!
//! Only the `logging` section is overlaid.

use crate::config::ENV_PREFIX;
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use config::{Config, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
struct LoggingSection {
    #[serde(default)]
    logging: Option<LoggingConfig>,
}

/// Overlay `CODE_EDITOR_AGENT__LOGGING__*` variables onto the file's logging section.
/// `CODE_EDITOR_AGENT__LOGGING__LEVEL=debug` sets `logging.level`.
pub fn overlay_logging(file: Option<LoggingConfig>) -> Result<Option<LoggingConfig>, ApiError> {
    let prefix = format!("{}__", ENV_PREFIX);
    let vars: Map<String, String> = std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .filter(|(key, _)| key.starts_with(&prefix))
        .collect();
    overlay_logging_from(file, vars)
}

fn overlay_logging_from(
    file: Option<LoggingConfig>,
    vars: Map<String, String>,
) -> Result<Option<LoggingConfig>, ApiError> {
    if vars.is_empty() {
        return Ok(file);
    }

    let base = serde_json::to_string(&LoggingSection { logging: file })
        .map_err(|e| ApiError::serialization("logging configuration", e))?;
    let section: LoggingSection = Config::builder()
        .add_source(File::from_str(&base, FileFormat::Json))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(Some(vars)),
        )
        .build()?
        .try_deserialize()?;
    Ok(section.logging)
}
