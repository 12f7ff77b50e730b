//! Files written by `cmd init`.

/// Sample rule document, relative to the workspace root.
pub const SAMPLE_RULE_PATH: &str = "RENAME-ME.code-editor-agent.md";

/// Agent definition read by the editor, relative to the workspace root.
pub const AGENT_DEFINITION_PATH: &str = ".claude/agents/code-editor.md";

pub const SAMPLE_RULE: &str = r#"---
# Glob pattern, or list of glob patterns, of files this rule applies to
patterns: ["**/*.code-editor-agent.md", "**/code-editor-agent.md"]
---

# `code-editor-agent` file-specific rules

Files named `*.code-editor-agent.md` or `code-editor-agent.md` hold extra context that the `code-editor` agent loads for the files it edits.

## How it works

1. The main session delegates file edits to the `code-editor` agent.
2. Before editing a file, the agent reads the output of `npx code-editor-agent ${FILE_PATH_TO_EDIT}`.
3. That command prints only the rules that apply to the given file.
4. These documents are therefore meta rules. Edit them deliberately.

## Format

A Markdown document that starts with a YAML front matter block. Recognized fields:

- `patterns` (required): glob pattern or list of patterns. The rule applies to files matching any of them.
- `ignorePatterns` (optional): glob pattern or list of patterns. A file matching any of them is not matched by this rule directly.
- `priority` (optional, recommended): non-negative number. When more rules are loaded than a rule's priority, it may be dropped. Omitted means it is never dropped.
- `tags` (optional): label or list of labels other rules can reference.
- `referencesIfTop` (optional): tags of rules to load as well, only when this rule matched the file directly.
- `referencesAlways` (optional): tags of rules to load as well, whenever this rule is loaded.
- `order` (optional): non-negative number. Lower numbers are printed first. Omitted means last.

Only the body, below the front matter, is printed.

## Example

Given these rule files:

- `A.code-editor-agent.md` with patterns `src/**/*.tsx`
- `B.code-editor-agent.md` with patterns `**/lib/**` and referencesAlways `WillCalled`
- `C.code-editor-agent.md` with patterns matching nothing, tags `WillCalled`, referencesIfTop `WillNotCalled`
- `D.code-editor-agent.md` with patterns matching nothing and tags `WillNotCalled`

When the agent edits `src/lib/Button.tsx`:

- A is loaded because it matches the path.
- B is loaded because it matches the path, and it pulls in every rule tagged `WillCalled`.
- C is loaded because B references its tag. It did not match the path itself, so its `referencesIfTop` is ignored.
- D is not loaded: it does not match, and nothing that applies references it.

## Notes

- After changing these files, run `npx code-editor-agent cmd generate` to rebuild the rule cache.
- These are not source files. They exist only to guide the agent.
"#;

pub const AGENT_DEFINITION: &str = r#"---
name: code-editor
description: For every code editing
tools: Bash, Read, Edit, Write, Grep, Glob
model: sonnet
color: orange
---

You must read full output of `npx code-editor-agent "${RELATIVE_PATH_OF_FILE_TO_EDIT_FROM_PROJECT_ROOT_EXCLUDING_LEADING_DOT_SLASH}"` before create/update/delete any file.
"#;
