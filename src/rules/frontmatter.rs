//! Front matter extraction for rule documents.
//!
//! A document may begin with a `---` line; the metadata block then runs until the
//! next `---` found at the start of a line. Everything after that closing
//! delimiter is the body.

use serde::Deserialize;
use thiserror::Error;

const DELIMITER: &[u8] = b"---";

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("front matter not found")]
    Missing,

    #[error("front matter closing delimiter not found")]
    Unterminated,

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Metadata fields as written by the document author.
///
/// String-or-list fields stay as raw YAML here; the cache builder owns their
/// normalization so it can report which field has the wrong shape.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMetadata {
    #[serde(default)]
    pub patterns: Option<serde_yaml::Value>,
    #[serde(default)]
    pub ignore_patterns: Option<serde_yaml::Value>,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default)]
    pub tags: Option<serde_yaml::Value>,
    #[serde(default)]
    pub references_if_top: Option<serde_yaml::Value>,
    #[serde(default)]
    pub references_always: Option<serde_yaml::Value>,
    #[serde(default)]
    pub order: Option<i64>,
}

/// Byte offset of the closing delimiter, if the document opens a metadata block.
fn closing_delimiter(content: &str) -> Option<usize> {
    let bytes = content.as_bytes();
    if !bytes.starts_with(DELIMITER) {
        return None;
    }
    let mut i = DELIMITER.len();
    while i + DELIMITER.len() <= bytes.len() {
        if &bytes[i..i + DELIMITER.len()] == DELIMITER
            && (i == DELIMITER.len() || bytes[i - 1] == b'\n')
        {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Parse the leading metadata block of a document.
pub fn parse_metadata(content: &str) -> Result<RuleMetadata, MetadataError> {
    if !content.starts_with("---") {
        return Err(MetadataError::Missing);
    }
    let end = closing_delimiter(content).ok_or(MetadataError::Unterminated)?;
    let yaml = &content[DELIMITER.len()..end];
    if yaml.trim().is_empty() {
        return Ok(RuleMetadata::default());
    }
    Ok(serde_yaml::from_str(yaml)?)
}

/// The document text after its metadata block, with leading line breaks removed.
///
/// A document without a (terminated) metadata block is returned whole.
pub fn extract_body(content: &str) -> &str {
    match closing_delimiter(content) {
        Some(end) => content[end + DELIMITER.len()..].trim_start_matches(['\r', '\n']),
        None => content,
    }
}
