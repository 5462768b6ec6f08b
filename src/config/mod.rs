//! Configuration for indented-include.
//!
//! Settings describe the host environment the preprocessor runs in: its
//! delimiters and the whitespace options MiniJinja is created with. All keys
//! are optional; missing ones take the defaults shown here.
//!
//! ```toml
//! template_dir = "templates"
//! keep_trailing_newline = false
//! trim_blocks = false
//! lstrip_blocks = false
//!
//! [syntax]
//! block_start = "{%"
//! block_end = "%}"
//! variable_start = "{{"
//! variable_end = "}}"
//! comment_start = "{#"
//! comment_end = "#}"
//! ```
//!
//! # Resolution Order
//!
//! 1. `--config <path>` (must exist)
//! 2. `INDENTED_INCLUDE_CONFIG` environment variable (must exist)
//! 3. `indented-include.toml` in the current directory
//! 4. `<config dir>/indented-include/config.toml`, e.g.
//!    `~/.config/indented-include/config.toml` on Linux
//! 5. Built-in defaults

mod parser;

pub use parser::parse_config;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::IncludeError;
use crate::preprocess::Delimiters;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "INDENTED_INCLUDE_CONFIG";

/// Configuration file looked up in the current directory.
pub const PROJECT_CONFIG_FILE: &str = "indented-include.toml";

const GLOBAL_CONFIG_DIR: &str = "indented-include";
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncludeConfig {
    /// Directory templates are loaded from by `render`
    pub template_dir: PathBuf,

    /// Keep the final newline of each template instead of stripping it
    pub keep_trailing_newline: bool,

    /// Remove the first newline after a block statement
    pub trim_blocks: bool,

    /// Strip whitespace in front of a block statement on its line
    pub lstrip_blocks: bool,

    pub syntax: SyntaxSettings,
}

impl Default for IncludeConfig {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from("templates"),
            keep_trailing_newline: false,
            trim_blocks: false,
            lstrip_blocks: false,
            syntax: SyntaxSettings::default(),
        }
    }
}

/// Delimiters of the host template syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxSettings {
    pub block_start: String,
    pub block_end: String,
    pub variable_start: String,
    pub variable_end: String,
    pub comment_start: String,
    pub comment_end: String,
}

impl Default for SyntaxSettings {
    fn default() -> Self {
        Self {
            block_start: "{%".to_string(),
            block_end: "%}".to_string(),
            variable_start: "{{".to_string(),
            variable_end: "}}".to_string(),
            comment_start: "{#".to_string(),
            comment_end: "#}".to_string(),
        }
    }
}

impl SyntaxSettings {
    /// Block delimiters, which are all the preprocessor needs.
    pub fn delimiters(&self) -> Delimiters {
        Delimiters::new(self.block_start.clone(), self.block_end.clone())
    }

    /// Reject empty delimiters and identical block delimiters.
    pub fn validate(&self) -> Result<(), IncludeError> {
        let named = [
            ("block_start", &self.block_start),
            ("block_end", &self.block_end),
            ("variable_start", &self.variable_start),
            ("variable_end", &self.variable_end),
            ("comment_start", &self.comment_start),
            ("comment_end", &self.comment_end),
        ];

        if let Some((name, _)) = named.iter().find(|(_, value)| value.is_empty()) {
            return Err(IncludeError::InvalidSyntax {
                reason: format!("syntax.{name} must not be empty"),
            });
        }

        if self.block_start == self.block_end {
            return Err(IncludeError::InvalidSyntax {
                reason: format!(
                    "block_start and block_end are both '{}'; the end of a statement would be indistinguishable from the start",
                    self.block_start
                ),
            });
        }

        Ok(())
    }
}

impl IncludeConfig {
    /// Load configuration following the resolution order in the module docs.
    ///
    /// # Errors
    ///
    /// Fails if an explicitly named file is missing, if a file cannot be
    /// parsed, or if the resulting syntax is invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let located = locate_config(
            explicit,
            std::env::var(CONFIG_ENV_VAR).ok(),
            Path::new("."),
            dirs::config_dir(),
        )?;

        let config = match located {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                parse_config::<Self>(&path)?
            }
            None => {
                tracing::debug!("No configuration file found, using defaults");
                Self::default()
            }
        };

        config.syntax.validate()?;
        Ok(config)
    }

    /// Replace the block delimiters with command-line overrides, if given.
    ///
    /// # Errors
    ///
    /// Fails if the overridden syntax no longer validates.
    pub fn with_block_delimiters(
        mut self,
        block_start: Option<String>,
        block_end: Option<String>,
    ) -> Result<Self, IncludeError> {
        if let Some(start) = block_start {
            self.syntax.block_start = start;
        }
        if let Some(end) = block_end {
            self.syntax.block_end = end;
        }
        self.syntax.validate()?;
        Ok(self)
    }
}

/// Pick the configuration file to read, if any.
fn locate_config(
    explicit: Option<&Path>,
    env_value: Option<String>,
    project_dir: &Path,
    global_dir: Option<PathBuf>,
) -> Result<Option<PathBuf>, IncludeError> {
    if let Some(path) = explicit {
        return require_file(path).map(Some);
    }

    if let Some(value) = env_value.filter(|value| !value.is_empty()) {
        return require_file(Path::new(&value)).map(Some);
    }

    let project = project_dir.join(PROJECT_CONFIG_FILE);
    if project.is_file() {
        return Ok(Some(project));
    }

    Ok(global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_DIR).join(GLOBAL_CONFIG_FILE))
        .filter(|path| path.is_file()))
}

fn require_file(path: &Path) -> Result<PathBuf, IncludeError> {
    if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err(IncludeError::ConfigNotFound {
            path: path.display().to_string(),
        })
    }
}
