//! code-editor-agent CLI binary

use clap::Parser;
use code_editor_agent::logging::init_logging;
use code_editor_agent::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    let context = match CliContext::new(cli.workspace.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error initializing workspace: {}", e);
            process::exit(1);
        }
    };

    // Config errors surface from execute; logging falls back to defaults here.
    let logging_config = context.load_config().ok().and_then(|c| c.logging);
    if let Err(e) = init_logging(
        logging_config.as_ref(),
        &cli.log_overrides(),
        Some(context.workspace_root()),
    ) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    let result = cli
        .invocation()
        .and_then(|invocation| context.execute(&invocation));
    match result {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
