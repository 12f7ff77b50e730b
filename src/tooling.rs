//! Tooling & Integration Layer
//!
//! The command-line front end over the command services.

pub mod cli;

pub use cli::{Cli, CliContext, CmdCommands, Commands, Invocation};
