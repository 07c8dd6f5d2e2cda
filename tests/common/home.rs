//! Isolated kotobaten home directories for integration tests
//!
//! `KOTOBATEN_HOME` points both the config and the data directory into a
//! temporary directory, so tests can seed and inspect the store files directly.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use assert_cmd::Command;
use tempfile::TempDir;

/// Nothing listens on the discard port, so requests fail fast.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9/";

pub struct TestHome {
    pub dir: TempDir,
}

impl TestHome {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    pub fn store_dir(&self) -> PathBuf {
        self.dir.path().join("data").join("store")
    }

    pub fn config_file(&self) -> PathBuf {
        self.dir.path().join("config").join("config.json")
    }

    pub fn write_key(&self, key: &str, value: &str) -> anyhow::Result<()> {
        fs::create_dir_all(self.store_dir())?;
        fs::write(self.store_dir().join(key), value)?;
        Ok(())
    }

    pub fn read_key(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.store_dir().join(key)).ok()
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.store_dir().join(key).exists()
    }

    pub fn login(&self) -> anyhow::Result<()> {
        self.write_key("auth_token", "test-token")
    }

    /// Seed a cache generation of three words written `age_ms` ago.
    pub fn seed_words(&self, index: usize, age_ms: i64) -> anyhow::Result<()> {
        let words = r#"[
            {"sense":"house","kanji":"家","kana":"いえ"},
            {"sense":"hello"},
            {"sense":"goodbye","kana":"さよなら"}
        ]"#;
        let timestamp = chrono::Utc::now().timestamp_millis() - age_ms;

        self.write_key("practice_menubar_words", words)?;
        self.write_key("practice_menubar_index", &index.to_string())?;
        self.write_key("practice_menubar_timestamp", &timestamp.to_string())?;
        Ok(())
    }

    /// The kotobaten binary bound to this home and an unreachable API.
    pub fn command(&self) -> anyhow::Result<Command> {
        let mut cmd = Command::cargo_bin("kotobaten")?;
        cmd.env("KOTOBATEN_HOME", self.dir.path())
            .env("NO_COLOR", "1")
            .arg("--api-url")
            .arg(UNREACHABLE_API);
        Ok(cmd)
    }
}
