use crate::integration::support::{rule, Workspace};
use code_editor_agent::config::rule_cache_path;
use code_editor_agent::error::ApiError;
use code_editor_agent::rules::RuleCache;
use code_editor_agent::tooling::cli::{CmdCommands, Invocation};

fn sample_workspace() -> Workspace {
    let ws = Workspace::new();
    ws.write(
        "src/b.code-editor-agent.md",
        &rule("patterns: \"**/*.ts\"\npriority: 3\ntags: [core]", "B"),
    )
    .write(
        "a.code-editor-agent.md",
        &rule("patterns:\n  - \"**/*.tsx\"\n  - \"**/*.ts\"\nreferencesAlways: core", "A"),
    )
    .write(
        "node_modules/pkg/x.code-editor-agent.md",
        &rule("patterns: \"**\"", "vendored"),
    );
    ws
}

#[test]
fn generate_writes_sorted_cache_and_skips_excluded() {
    let ws = sample_workspace();
    let output = ws.generate();
    assert!(output.contains("Found 2 rules for"));

    let cache = RuleCache::load(&rule_cache_path(ws.root())).unwrap();
    let entries = cache.get("code-editor").unwrap();
    let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["a.code-editor-agent.md", "src/b.code-editor-agent.md"]);

    assert_eq!(entries[0].patterns, vec!["**/*.tsx", "**/*.ts"]);
    assert_eq!(entries[0].references_always, vec!["core"]);
    assert_eq!(entries[1].patterns, vec!["**/*.ts"]);
    assert_eq!(entries[1].priority, Some(3));
}

#[test]
fn regenerating_unchanged_workspace_is_byte_identical() {
    let ws = sample_workspace();
    ws.generate();
    let first = ws.cache_text();
    ws.generate();
    assert_eq!(first, ws.cache_text());
    assert!(first.ends_with('\n'));
}

#[test]
fn generate_without_force_needs_existing_cache() {
    let ws = sample_workspace();
    let err = ws
        .context()
        .execute(&Invocation::Cmd(CmdCommands::Generate { force: false }))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotInitialized(_)));

    ws.generate();
    ws.context()
        .execute(&Invocation::Cmd(CmdCommands::Generate { force: false }))
        .unwrap();
}

#[test]
fn invalid_document_fails_build_and_keeps_previous_cache() {
    let ws = sample_workspace();
    ws.generate();
    let before = ws.cache_text();

    ws.write("bad.code-editor-agent.md", &rule("priority: 1", "no patterns"));
    let err = ws
        .context()
        .execute(&Invocation::Cmd(CmdCommands::Generate { force: true }))
        .unwrap_err();
    assert!(err.to_string().contains("bad.code-editor-agent.md"));
    assert_eq!(before, ws.cache_text());
}

#[test]
fn init_scaffolds_workspace_once() {
    let ws = Workspace::new();
    let output = ws
        .context()
        .execute(&Invocation::Cmd(CmdCommands::Init))
        .unwrap();
    assert!(output.contains(".config/code-editor-agent.jsonc"));
    assert!(ws.root().join("RENAME-ME.code-editor-agent.md").exists());
    assert!(ws.root().join(".claude/agents/code-editor.md").exists());

    let cache = RuleCache::load(&rule_cache_path(ws.root())).unwrap();
    assert_eq!(cache.get("code-editor").map(<[_]>::len), Some(1));

    let err = ws
        .context()
        .execute(&Invocation::Cmd(CmdCommands::Init))
        .unwrap_err();
    assert!(matches!(err, ApiError::AlreadyInitialized(_)));
}

#[test]
fn list_reports_agents_as_json() {
    let ws = sample_workspace();
    ws.write_config(
        r#"{
  // two agents
  "agents": {
    "code-editor": { "ruleFilePattern": "**/*.code-editor-agent.md", "commandGroup": null },
    "react": { "ruleFilePattern": "**/*.react.md", "commandGroup": "react", "references": ["code-editor"] },
  },
}"#,
    );
    ws.generate();
    let output = ws
        .context()
        .execute(&Invocation::Cmd(CmdCommands::List {
            format: "json".to_string(),
        }))
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    let agents = value["agents"].as_array().unwrap();
    assert_eq!(agents.len(), 2);
    assert_eq!(agents[1]["name"], "react");
    assert_eq!(agents[1]["commandGroup"], "react");
    assert_eq!(value["cachePresent"], true);
}
