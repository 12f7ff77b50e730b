//! Merging of configuration sources.

pub mod service;
