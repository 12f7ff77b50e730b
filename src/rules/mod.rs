//! Rule resolution engine.
//!
//! Rule documents are scanned once into a [`RuleCache`]. Each request then runs
//! [`closure::resolve`] to find the applicable rules, [`budget::filter`] to cap
//! and order them, and [`render::render`] to produce the output text.

pub mod budget;
pub mod builder;
pub mod cache;
pub mod closure;
pub mod entry;
pub mod frontmatter;
pub mod matcher;
pub mod render;
pub mod source;

pub use builder::CacheBuilder;
pub use cache::RuleCache;
pub use closure::{resolve, Diagnostic, Resolution};
pub use entry::{ResolvedRule, RuleEntry, RuleKey};
pub use source::{FsRuleSource, MemoryRuleSource, RuleSource};
