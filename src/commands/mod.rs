//! Command services.
//!
//! Each service owns one CLI command's workflow and returns a result struct;
//! the CLI parses arguments, calls one service, and formats its result.

pub mod generate;
pub mod init;
pub mod list;
pub mod load;
pub mod templates;

pub use generate::{AgentRuleCount, GenerateCommandService, GenerateSummary};
pub use init::{InitCommandService, InitSummary};
pub use list::{AgentListItem, AgentListResult, ListCommandService};
pub use load::{LoadCommandService, LoadResult};
