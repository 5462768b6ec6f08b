//! Common test utilities for indented-include integration tests
//!
//! [`TestProject`] is an isolated working directory. Commands run with that
//! directory as cwd and with the configuration lookup pointed away from the
//! real user configuration.

// Not every test module uses every helper
#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use indented_include::test_utils::TemplateFixture;

/// Temporary project with a `templates/` directory
pub struct TestProject {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    project_dir: PathBuf,
    config_home: PathBuf,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("project");
        let config_home = temp_dir.path().join("config-home");
        fs::create_dir_all(project_dir.join("templates"))?;
        fs::create_dir_all(&config_home)?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
            config_home,
        })
    }

    pub fn project_path(&self) -> &Path {
        &self.project_dir
    }

    pub fn templates_path(&self) -> PathBuf {
        self.project_dir.join("templates")
    }

    /// Directory used as the user configuration directory
    pub fn config_home(&self) -> &Path {
        &self.config_home
    }

    /// Write a file relative to the project directory
    pub fn write_file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.project_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Write a template relative to `templates/`
    pub fn write_template(&self, name: &str, content: &str) -> Result<PathBuf> {
        self.write_file(&format!("templates/{name}"), content)
    }

    /// Write a fixture into `templates/` and its context to `context.json`
    pub fn write_fixture(&self, fixture: &TemplateFixture) -> Result<PathBuf> {
        fixture.write_to(&self.templates_path())?;
        self.write_file("context.json", &fixture.context)
    }

    pub fn read_file(&self, relative: &str) -> Result<String> {
        let path = self.project_dir.join(relative);
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Command for the binary, isolated from the user's configuration
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("indented-include").expect("binary is built");
        cmd.current_dir(&self.project_dir)
            .env("XDG_CONFIG_HOME", &self.config_home)
            .env("HOME", &self.config_home)
            .env_remove("INDENTED_INCLUDE_CONFIG")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    /// Run the binary and collect its output
    pub fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = self.command().args(args).output()?;
        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }
}

/// Captured output of a finished command
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Assert the command succeeded
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.success,
            "Command failed with code {:?}\nStderr: {}",
            self.code, self.stderr
        );
        self
    }

    /// Assert the command failed with exit code 1
    pub fn assert_failure(&self) -> &Self {
        assert!(!self.success, "Command unexpectedly succeeded\nStdout: {}", self.stdout);
        assert_eq!(self.code, Some(1), "Stderr: {}", self.stderr);
        self
    }

    /// Assert stderr contains the given text
    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "Expected stderr to contain '{}'\nActual stderr: {}",
            text,
            self.stderr
        );
        self
    }
}
