//! Rule document sources.
//!
//! The cache builder and the body emitter only need two things from the outside
//! world: a list of documents matching a discovery pattern, and the text of a
//! document. `RuleSource` is that seam.

use crate::error::{ApiError, StorageError};
use crate::rules::matcher::{self, normalize_path, PatternSet};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub trait RuleSource: Send + Sync {
    /// Workspace-relative paths of documents matching `pattern` and no exclude, sorted.
    fn discover(&self, pattern: &str, exclude: &PatternSet) -> Result<Vec<String>, ApiError>;

    /// Full text of the document at a workspace-relative path.
    fn read(&self, path: &str) -> Result<String, ApiError>;
}

/// Documents on disk under a workspace root.
pub struct FsRuleSource {
    root: PathBuf,
}

impl FsRuleSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `/`-joined, NFC-normalized path of `path` relative to the root.
    fn relative(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let mut parts = Vec::new();
        for component in relative.components() {
            match component {
                std::path::Component::Normal(name) => parts.push(name.to_str()?),
                std::path::Component::CurDir => {}
                _ => return None,
            }
        }
        Some(normalize_path(&parts.join("/")))
    }
}

impl RuleSource for FsRuleSource {
    fn discover(&self, pattern: &str, exclude: &PatternSet) -> Result<Vec<String>, ApiError> {
        let pattern = matcher::compile(pattern)?;
        let mut found = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| StorageError::Walk {
                path: e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone()),
                message: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(relative) = self.relative(entry.path()) else {
                tracing::warn!("Skipping non UTF-8 path: {:?}", entry.path());
                continue;
            };
            if !matcher::is_match(&pattern, &relative) {
                continue;
            }
            if exclude.is_match(&relative) {
                tracing::debug!(path = %relative, "Excluded rule document");
                continue;
            }
            found.push(relative);
        }

        found.sort();
        Ok(found)
    }

    fn read(&self, path: &str) -> Result<String, ApiError> {
        let full = self.root.join(path);
        std::fs::read_to_string(&full)
            .map_err(|e| ApiError::StorageError(StorageError::read(path, e)))
    }
}

/// Documents held in memory, keyed by workspace-relative path.
#[derive(Debug, Clone, Default)]
pub struct MemoryRuleSource {
    documents: BTreeMap<String, String>,
}

impl MemoryRuleSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.documents.insert(path.into(), content.into());
    }

    pub fn with(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }
}

impl RuleSource for MemoryRuleSource {
    fn discover(&self, pattern: &str, exclude: &PatternSet) -> Result<Vec<String>, ApiError> {
        let mut found = Vec::new();
        for path in self.documents.keys() {
            if matcher::matches(pattern, path)? && !exclude.is_match(path) {
                found.push(path.clone());
            }
        }
        Ok(found)
    }

    fn read(&self, path: &str) -> Result<String, ApiError> {
        self.documents.get(path).cloned().ok_or_else(|| {
            ApiError::StorageError(StorageError::read(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such document"),
            ))
        })
    }
}
