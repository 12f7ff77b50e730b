//! Glob matching for rule patterns, ignore patterns, and discovery excludes.
//!
//! `*`, `?` and `[...]` never cross a `/`; `**` as a whole path component matches
//! zero or more directories, and a trailing `/**` also matches the directory
//! itself. `{a,b}` alternatives may nest. Dot files are matched like any other name.

use crate::error::ApiError;
use glob::{MatchOptions, Pattern};
use unicode_normalization::UnicodeNormalization;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A compiled pattern: one `glob::Pattern` per brace alternative.
#[derive(Debug, Clone)]
pub struct Glob {
    alternatives: Vec<Pattern>,
}

/// Compile a glob pattern, reporting malformed patterns as errors.
pub fn compile(pattern: &str) -> Result<Glob, ApiError> {
    let mut alternatives = Vec::new();
    for expanded in expand_braces(pattern) {
        if let Some(dir) = expanded.strip_suffix("/**").filter(|dir| !dir.is_empty()) {
            alternatives.push(compile_one(pattern, dir)?);
        }
        alternatives.push(compile_one(pattern, &expanded)?);
    }
    Ok(Glob { alternatives })
}

fn compile_one(original: &str, pattern: &str) -> Result<Pattern, ApiError> {
    Pattern::new(pattern).map_err(|e| ApiError::InvalidPattern {
        pattern: original.to_string(),
        message: e.to_string(),
    })
}

/// Expand `{a,b}` groups left to right into plain patterns.
///
/// Braces without a top-level comma, unbalanced braces, and braces inside
/// `[...]` are literal.
pub fn expand_braces(pattern: &str) -> Vec<String> {
    match brace_group(pattern) {
        Some((open, close, branches)) => {
            let (prefix, suffix) = (&pattern[..open], &pattern[close + 1..]);
            branches
                .iter()
                .flat_map(|branch| expand_braces(&format!("{}{}{}", prefix, branch, suffix)))
                .collect()
        }
        None => vec![pattern.to_string()],
    }
}

/// First expandable group: its `{` and `}` offsets and its branches.
fn brace_group(pattern: &str) -> Option<(usize, usize, Vec<&str>)> {
    let bytes = pattern.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'[' => i = class_end(bytes, i),
            b'{' => {
                if let Some((close, commas)) = group_end(bytes, i) {
                    if !commas.is_empty() {
                        let mut branches = Vec::with_capacity(commas.len() + 1);
                        let mut from = i + 1;
                        for split in commas.into_iter().chain(std::iter::once(close)) {
                            branches.push(&pattern[from..split]);
                            from = split + 1;
                        }
                        return Some((i, close, branches));
                    }
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Offset of the `]` closing the class opened at `open`; `open` if unterminated.
fn class_end(bytes: &[u8], open: usize) -> usize {
    let mut i = open + 1;
    if bytes.get(i) == Some(&b'!') {
        i += 1;
    }
    // a leading `]` is a member of the class
    if bytes.get(i) == Some(&b']') {
        i += 1;
    }
    while i < bytes.len() {
        if bytes[i] == b']' {
            return i;
        }
        i += 1;
    }
    open
}

/// Matching `}` for the `{` at `open`, with the offsets of its top-level commas.
fn group_end(bytes: &[u8], open: usize) -> Option<(usize, Vec<usize>)> {
    let mut depth = 0usize;
    let mut commas = Vec::new();
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'[' => i = class_end(bytes, i),
            b'{' => depth += 1,
            b'}' if depth == 0 => return Some((i, commas)),
            b'}' => depth -= 1,
            b',' if depth == 0 => commas.push(i),
            _ => {}
        }
        i += 1;
    }
    None
}

/// Whether `path` matches `pattern`.
pub fn matches(pattern: &str, path: &str) -> Result<bool, ApiError> {
    Ok(is_match(&compile(pattern)?, path))
}

/// Match against an already compiled pattern.
pub fn is_match(pattern: &Glob, path: &str) -> bool {
    pattern
        .alternatives
        .iter()
        .any(|alternative| alternative.matches_with(path, MATCH_OPTIONS))
}

/// Whether `path` matches at least one of `patterns`.
///
/// Every pattern is compiled even after a match is found, so a malformed pattern
/// is reported regardless of its position in the list.
pub fn matches_any(patterns: &[String], path: &str) -> Result<bool, ApiError> {
    let mut matched = false;
    for pattern in patterns {
        if matches(pattern, path)? {
            matched = true;
        }
    }
    Ok(matched)
}

/// Canonical form of a workspace-relative path: leading `./` removed, NFC-normalized.
pub fn normalize_path(path: &str) -> String {
    let mut trimmed = path;
    while let Some(rest) = trimmed.strip_prefix("./") {
        trimmed = rest;
    }
    trimmed.nfc().collect()
}

/// A precompiled list of patterns, used for discovery excludes.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Glob>,
}

impl PatternSet {
    /// Compile exclude patterns. A leading `./` is ignored, as excludes are written
    /// relative to the workspace root.
    pub fn new(patterns: &[String]) -> Result<Self, ApiError> {
        let patterns = patterns
            .iter()
            .map(|p| compile(p.strip_prefix("./").unwrap_or(p)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| is_match(pattern, path))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
