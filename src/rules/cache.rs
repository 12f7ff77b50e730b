//! Rule cache: agent name -> rule entries sorted by path.
//!
//! Persisted as pretty-printed JSON so repeated builds over unchanged documents
//! produce byte-identical files.

use crate::error::{ApiError, StorageError};
use crate::rules::entry::RuleEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleCache {
    agents: BTreeMap<String, Vec<RuleEntry>>,
}

impl RuleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an agent's entries, sorting them by path.
    pub fn insert(&mut self, agent: impl Into<String>, mut entries: Vec<RuleEntry>) {
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        self.agents.insert(agent.into(), entries);
    }

    pub fn get(&self, agent: &str) -> Option<&[RuleEntry]> {
        self.agents.get(agent).map(Vec::as_slice)
    }

    /// Agent names in sorted order.
    pub fn agents(&self) -> impl Iterator<Item = &str> {
        self.agents.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Total number of entries across all agents.
    pub fn rule_count(&self) -> usize {
        self.agents.values().map(Vec::len).sum()
    }

    /// Canonical on-disk text: two-space indented JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String, ApiError> {
        let mut json = serde_json::to_string_pretty(self)
            .map_err(|e| ApiError::serialization("rule cache", e))?;
        json.push('\n');
        Ok(json)
    }

    pub fn from_json(path: &Path, json: &str) -> Result<Self, ApiError> {
        serde_json::from_str(json).map_err(|e| {
            ApiError::StorageError(StorageError::CorruptCache {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        })
    }

    /// Load the cache file.
    pub fn load(path: &Path) -> Result<Self, ApiError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ApiError::StorageError(StorageError::read(path, e)))?;
        Self::from_json(path, &json)
    }

    /// Replace the cache file.
    ///
    /// The text is written to a sibling temporary file and renamed into place, so
    /// readers never observe a partially written cache.
    pub fn save(&self, path: &Path) -> Result<(), ApiError> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ApiError::StorageError(StorageError::write(parent, e)))?;
            }
        }

        let staging = staging_path(path);
        std::fs::write(&staging, json)
            .map_err(|e| ApiError::StorageError(StorageError::write(&staging, e)))?;
        std::fs::rename(&staging, path).map_err(|e| {
            let _ = std::fs::remove_file(&staging);
            ApiError::StorageError(StorageError::write(path, e))
        })
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
