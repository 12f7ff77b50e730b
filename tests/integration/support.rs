use code_editor_agent::config::{config_file_path, rule_cache_path};
use code_editor_agent::tooling::cli::{CliContext, CmdCommands, Invocation};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A scratch workspace on disk.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, relative: &str, content: &str) -> &Self {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        self
    }

    pub fn write_config(&self, json: &str) -> &Self {
        let path = config_file_path(self.root());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, json).unwrap();
        self
    }

    pub fn cache_text(&self) -> String {
        fs::read_to_string(rule_cache_path(self.root())).unwrap()
    }

    pub fn context(&self) -> CliContext {
        CliContext::new(self.root().to_path_buf(), None).unwrap()
    }

    pub fn generate(&self) -> String {
        self.context()
            .execute(&Invocation::Cmd(CmdCommands::Generate { force: true }))
            .unwrap()
    }

    pub fn load(&self, group: Option<&str>, target: &str) -> String {
        self.context()
            .execute(&Invocation::Load {
                command_group: group.map(str::to_string),
                target: target.to_string(),
            })
            .unwrap()
    }
}

/// A rule document with the given metadata lines and body.
pub fn rule(metadata: &str, body: &str) -> String {
    format!("---\n{}\n---\n\n{}", metadata.trim(), body)
}
