//! CLI Tooling
//!
//! Command-line interface for rule loading and cache maintenance. Parsing lives in
//! [`Cli`]; [`CliContext`] runs one [`Invocation`] against a workspace and returns
//! the text to print.

use crate::commands::{
    AgentListResult, GenerateCommandService, GenerateSummary, InitCommandService, InitSummary,
    ListCommandService, LoadCommandService,
};
use crate::config::{ConfigLoader, ProjectConfig};
use crate::error::ApiError;
use crate::logging::LogOverrides;
use clap::{ArgAction, Parser, Subcommand};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::{OwoColorize, Stream};
use std::path::{Path, PathBuf};
use tracing::debug;

/// code-editor-agent - file-specific rules for code editing agents
#[derive(Parser, Debug)]
#[command(name = "code-editor-agent")]
#[command(about = "Print the rule documents that apply to a file")]
#[command(version, disable_version_flag = true, disable_help_subcommand = true)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
#[command(override_usage = "code-editor-agent [OPTIONS] [GROUP] <FILE>\n       code-editor-agent [OPTIONS] cmd <COMMAND>")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// File to load context for, optionally preceded by an agent command group
    #[arg(value_name = "TARGET", num_args = 1..=2, required = true)]
    pub target: Vec<String>,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Built-in commands
    Cmd {
        #[command(subcommand)]
        command: CmdCommands,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CmdCommands {
    /// Write the default config, a sample rule, and the agent definition, then build the cache
    Init,
    /// Rebuild the rule cache
    Generate {
        /// Build even if no cache exists yet
        #[arg(long)]
        force: bool,
    },
    /// List configured agents
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// What a parsed command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Print the rules for `target`, using the agent owning `command_group`
    Load {
        command_group: Option<String>,
        target: String,
    },
    Cmd(CmdCommands),
}

impl Cli {
    pub fn invocation(&self) -> Result<Invocation, ApiError> {
        if let Some(Commands::Cmd { command }) = &self.command {
            return Ok(Invocation::Cmd(command.clone()));
        }
        match self.target.as_slice() {
            [target] => Ok(Invocation::Load {
                command_group: None,
                target: target.clone(),
            }),
            [group, target] => Ok(Invocation::Load {
                command_group: Some(group.clone()),
                target: target.clone(),
            }),
            _ => Err(ApiError::ConfigError(
                "Expected [GROUP] <FILE> or cmd <COMMAND>".to_string(),
            )),
        }
    }

    /// Logging flags; `--verbose` means debug unless a level is given.
    pub fn log_overrides(&self) -> LogOverrides {
        let level = self
            .log_level
            .clone()
            .or_else(|| self.verbose.then(|| "debug".to_string()));
        LogOverrides {
            level,
            format: self.log_format.clone(),
            output: self.log_output.clone(),
            file: self.log_file.clone(),
        }
    }
}

/// CLI context for running commands against one workspace
pub struct CliContext {
    workspace_root: PathBuf,
    config_path: Option<PathBuf>,
}

impl CliContext {
    /// Create a new CLI context
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        if !workspace_root.is_dir() {
            return Err(ApiError::ConfigError(format!(
                "Workspace root {} is not a directory",
                workspace_root.display()
            )));
        }
        Ok(Self {
            workspace_root,
            config_path,
        })
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Load and validate the project configuration.
    pub fn load_config(&self) -> Result<ProjectConfig, ApiError> {
        ConfigLoader::resolve(&self.workspace_root, self.config_path.as_deref())
    }

    /// Execute a CLI invocation
    pub fn execute(&self, invocation: &Invocation) -> Result<String, ApiError> {
        debug!(?invocation, workspace = %self.workspace_root.display(), "Executing");
        match invocation {
            Invocation::Load {
                command_group,
                target,
            } => {
                let config = self.load_config()?;
                let result = LoadCommandService::run(
                    &self.workspace_root,
                    &config,
                    command_group.as_deref(),
                    target,
                )?;
                Ok(result.text)
            }
            Invocation::Cmd(CmdCommands::Init) => {
                let summary =
                    InitCommandService::run(&self.workspace_root, self.config_path.as_deref())?;
                Ok(format_init_summary(&summary, &self.workspace_root))
            }
            Invocation::Cmd(CmdCommands::Generate { force }) => {
                let config = self.load_config()?;
                let summary = GenerateCommandService::run(&self.workspace_root, &config, *force)?;
                Ok(format_generate_summary(&summary, &self.workspace_root))
            }
            Invocation::Cmd(CmdCommands::List { format }) => {
                let config = self.load_config()?;
                let result = ListCommandService::run(&self.workspace_root, &config)?;
                match format.as_str() {
                    "json" => format_agent_list_json(&result),
                    "text" => Ok(format_agent_list_text(&result)),
                    other => Err(ApiError::ConfigError(format!(
                        "Invalid format: {} (must be 'text' or 'json')",
                        other
                    ))),
                }
            }
        }
    }
}

/// Path relative to the workspace when possible, for display.
fn display_path(path: &Path, workspace_root: &Path) -> String {
    path.strip_prefix(workspace_root)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn format_generate_summary(summary: &GenerateSummary, workspace_root: &Path) -> String {
    let mut output = String::new();
    for agent in &summary.agents {
        output.push_str(&format!(
            "Found {} rules for {}\n",
            agent.rules,
            agent.agent.if_supports_color(Stream::Stdout, |t| t.bold())
        ));
    }
    output.push_str(&format!(
        "\nGenerated unified cache file: {}",
        display_path(&summary.cache_path, workspace_root)
    ));
    output
}

fn format_init_summary(summary: &InitSummary, workspace_root: &Path) -> String {
    let mut output = String::from("Initializing code-editor-agent...\n\n");
    for path in &summary.created {
        output.push_str(&format!(
            "  {} {}\n",
            "created".if_supports_color(Stream::Stdout, |t| t.green()),
            display_path(path, workspace_root)
        ));
    }
    for path in &summary.skipped {
        output.push_str(&format!(
            "  {} {} (already exists)\n",
            "skipped".if_supports_color(Stream::Stdout, |t| t.yellow()),
            display_path(path, workspace_root)
        ));
    }
    output.push('\n');
    output.push_str(&format_generate_summary(&summary.generate, workspace_root));
    output
}

fn format_agent_list_text(result: &AgentListResult) -> String {
    if result.agents.is_empty() {
        return "No agents configured.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Agent", "Command group", "Rule files", "References", "Cached rules"]);
    for agent in &result.agents {
        let references = if agent.references.is_empty() {
            "-".to_string()
        } else {
            agent.references.join(", ")
        };
        table.add_row(vec![
            agent.name.clone(),
            agent
                .command_group
                .clone()
                .unwrap_or_else(|| "null".to_string()),
            agent.rule_file_pattern.clone(),
            references,
            agent
                .cached_rules
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    let mut output = format!("{}\n", table);
    if !result.cache_present {
        output.push_str("\nNo rule cache yet. Run `code-editor-agent cmd init` or `cmd generate --force`.");
    }
    output
}

fn format_agent_list_json(result: &AgentListResult) -> Result<String, ApiError> {
    serde_json::to_string_pretty(result)
        .map_err(|e| ApiError::serialization("agent list", e))
}
