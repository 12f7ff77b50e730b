use crate::integration::support::{rule, Workspace};
use code_editor_agent::error::ApiError;
use code_editor_agent::tooling::cli::Invocation;

const TRAILER: &str = "* * *\n\nEnd of additional context for src/app.ts. Continue.";

#[test]
fn priority_budget_keeps_only_highest_of_three() {
    let ws = Workspace::new();
    for (name, priority) in [("p0", 0), ("p1", 1), ("p2", 2)] {
        ws.write(
            &format!("{}.code-editor-agent.md", name),
            &rule(&format!("patterns: \"**/*.ts\"\npriority: {}", priority), name),
        );
    }
    ws.generate();
    assert_eq!(ws.load(None, "src/app.ts"), format!("p2\n{}", TRAILER));
}

#[test]
fn always_reference_pulls_in_unmatched_tagged_rule() {
    let ws = Workspace::new();
    ws.write(
        "x.code-editor-agent.md",
        &rule("patterns: \"src/**\"\nreferencesAlways: [core]\norder: 2", "X"),
    )
    .write(
        "y.code-editor-agent.md",
        &rule("patterns: \"docs/**\"\ntags: [core]\norder: 1", "Y"),
    );
    ws.generate();
    assert_eq!(ws.load(None, "./src/app.ts"), format!("Y\nX\n{}", TRAILER.replace("src/app.ts", "./src/app.ts")));
}

#[test]
fn ignored_rule_is_absent_unless_referenced() {
    let ws = Workspace::new();
    ws.write(
        "a.code-editor-agent.md",
        &rule("patterns: \"**/*.ts\"\nignorePatterns: \"src/**\"", "ignored"),
    )
    .write("b.code-editor-agent.md", &rule("patterns: \"**/*.ts\"", "kept"));
    ws.generate();
    assert_eq!(ws.load(None, "src/app.ts"), format!("kept\n{}", TRAILER));
}

#[test]
fn no_matching_rules_prints_notice() {
    let ws = Workspace::new();
    ws.write("a.code-editor-agent.md", &rule("patterns: \"**/*.rs\"", "rust"));
    ws.generate();
    assert_eq!(
        ws.load(None, "src/app.ts"),
        "No additional context found for src/app.ts. Continue."
    );
}

#[test]
fn command_group_selects_agent_and_its_references() {
    let ws = Workspace::new();
    ws.write_config(
        r#"{
  "agents": {
    "code-editor": { "ruleFilePattern": "**/*.code-editor-agent.md", "commandGroup": null },
    "react": { "ruleFilePattern": "**/*.react.md", "commandGroup": "react", "references": ["code-editor"] }
  }
}"#,
    )
    .write("base.code-editor-agent.md", &rule("patterns: \"**/*.tsx\"", "base"))
    .write("hooks.react.md", &rule("patterns: \"**/*.tsx\"", "hooks"));
    ws.generate();

    let react = ws.load(Some("react"), "src/App.tsx");
    assert!(react.starts_with("hooks\nbase\n"), "{}", react);

    let plain = ws.load(None, "src/App.tsx");
    assert!(plain.starts_with("base\n* * *"), "{}", plain);

    let err = ws
        .context()
        .execute(&Invocation::Load {
            command_group: Some("vue".to_string()),
            target: "src/App.tsx".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::CommandGroupNotFound(_)));
}

#[test]
fn load_before_generate_reports_missing_cache() {
    let ws = Workspace::new();
    let result = ws.context().execute(&Invocation::Load {
        command_group: None,
        target: "src/app.ts".to_string(),
    });
    assert!(result.is_err());
}

#[test]
fn mixed_case_agent_reference_contributes_rules() {
    let ws = Workspace::new();
    ws.write_config(
        r#"{
  "agents": {
    "CodeEditor": { "ruleFilePattern": "**/*.code-editor-agent.md", "commandGroup": null },
    "ReactAgent": { "ruleFilePattern": "**/*.react.md", "commandGroup": "react", "references": ["CodeEditor"] }
  }
}"#,
    )
    .write("base.code-editor-agent.md", &rule("patterns: \"**/*.tsx\"", "base"))
    .write("hooks.react.md", &rule("patterns: \"**/*.tsx\"", "hooks"));
    ws.generate();

    let cache = ws.cache_text();
    assert!(cache.contains("\"CodeEditor\""), "{}", cache);
    let react = ws.load(Some("react"), "src/App.tsx");
    assert!(react.starts_with("hooks\nbase\n"), "{}", react);
}
