use clap::{CommandFactory, Parser};
use code_editor_agent::tooling::cli::{Cli, CmdCommands, Invocation};

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["code-editor-agent", "src/a.ts"],
        vec!["code-editor-agent", "react", "src/a.tsx"],
        vec!["code-editor-agent", "--workspace", "/tmp", "src/a.ts"],
        vec!["code-editor-agent", "--log-level", "debug", "--log-format", "json", "src/a.ts"],
        vec!["code-editor-agent", "cmd", "init"],
        vec!["code-editor-agent", "cmd", "generate"],
        vec!["code-editor-agent", "cmd", "generate", "--force"],
        vec!["code-editor-agent", "cmd", "list"],
        vec!["code-editor-agent", "cmd", "list", "--format", "json"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_invalid_forms() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["code-editor-agent"],
        vec!["code-editor-agent", "a", "b", "c"],
        vec!["code-editor-agent", "cmd"],
        vec!["code-editor-agent", "cmd", "unknown"],
        vec!["code-editor-agent", "--bogus", "src/a.ts"],
    ];

    for args in cases {
        assert!(
            Cli::try_parse_from(args.clone()).is_err(),
            "expected parse failure for args: {args:?}"
        );
    }
}

#[test]
fn cmd_is_never_read_as_a_command_group() {
    let cli = Cli::try_parse_from(["code-editor-agent", "cmd", "list"]).unwrap();
    assert_eq!(
        cli.invocation().unwrap(),
        Invocation::Cmd(CmdCommands::List {
            format: "text".to_string()
        })
    );
}

#[test]
fn version_flags_print_version() {
    for flag in ["-v", "--version"] {
        let err = Cli::try_parse_from(["code-editor-agent", flag]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}

#[test]
fn help_lists_builtin_commands() {
    let mut command = Cli::command();
    command.build();
    let cmd = command
        .find_subcommand("cmd")
        .expect("cmd subcommand");
    let names: Vec<&str> = cmd.get_subcommands().map(|c| c.get_name()).collect();
    assert_eq!(names, vec!["init", "generate", "list"]);
    let help = command.render_help().to_string();
    assert!(help.contains("--workspace"));
}
