//! Integration tests for code-editor-agent

mod budget_properties;
mod cache_build;
mod cli_contracts;
mod resolution;
mod support;
