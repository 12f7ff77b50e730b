//! code-editor-agent: file-specific rules for code editing agents
//!
//! Rule documents declare glob patterns in their metadata. Given a target file,
//! the crate finds the documents whose patterns match, follows their tag
//! references across the requesting agent's reference chain, caps the set by
//! priority, and prints the bodies in a stable order.
//!
//! The rule cache is built ahead of time by `cmd generate` and loaded per request.

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod rules;
pub mod tooling;
pub mod types;
