use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Scratch config pointing at a database inside a temp dir
pub struct Sandbox {
    pub dir: TempDir,
    pub config_path: PathBuf,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("diary.db");
        let config_path = dir.path().join("config.toml");
        let contents = format!(
            "database_path = '{}'\nfetch_quote = false\n",
            db_path.display()
        );
        std::fs::write(&config_path, contents).unwrap();
        Self { dir, config_path }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("diary").unwrap();
        cmd.env_remove("RUST_LOG");
        cmd.arg("--config").arg(&self.config_path);
        cmd
    }
}
