//! Command-line interface for indented-include.
//!
//! Each command lives in its own module with its own argument struct and an
//! `execute` method taking the loaded [`IncludeConfig`].
//!
//! # Available Commands
//!
//! - `rewrite` - Expand `indented-include` directives and print the result
//! - `check` - Report every misplaced directive, failing if any is found
//! - `render` - Render a template through MiniJinja with the preprocessor installed
//!
//! # Global Options
//!
//! All commands support these global options:
//! - `--verbose` - Enable debug output
//! - `--quiet` - Disable logging entirely
//! - `--config` - Path to a configuration file
//!
//! Logging goes to stderr, so output on stdout can be piped.
//!
//! # Example
//!
//! ```bash
//! # Expand directives in a template
//! indented-include rewrite templates/deploy.yaml.j2
//!
//! # Check a whole directory of templates in CI
//! indented-include check templates/*.j2
//!
//! # Render with debug logging
//! indented-include --verbose render deploy.yaml.j2 --context values.json
//! ```

mod check;
pub mod common;
mod render;
mod rewrite;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::IncludeConfig;

/// Runtime configuration for CLI execution.
///
/// Collected from the global flags before any command runs, so logging and
/// configuration lookup can be set up (or tested) independently of parsing.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive.
    ///
    /// - `Some("debug")` for `--verbose`
    /// - `Some("off")` for `--quiet`
    /// - `None` to use `RUST_LOG`, falling back to `warn`
    pub log_level: Option<String>,

    /// Configuration file given with `--config`
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter for the stderr subscriber
    pub fn env_filter(&self) -> EnvFilter {
        match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        }
    }

    /// Install the global tracing subscriber.
    ///
    /// Does nothing if one is already installed.
    pub fn init_logging(&self) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(self.env_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Main CLI structure
#[derive(Parser)]
#[command(
    name = "indented-include",
    about = "Expand indented-include directives in Jinja-style templates",
    version,
    long_about = "indented-include rewrites `{% indented-include \"file\" %}` into an include wrapped in an indent filter, so included templates keep the indentation of the line they are included on."
)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all logging
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite directives into plain include statements
    Rewrite(rewrite::RewriteCommand),

    /// Report misplaced directives
    Check(check::CheckCommand),

    /// Render a template with indented-include support
    Render(render::RenderCommand),
}

impl Cli {
    /// Execute the parsed command.
    ///
    /// # Errors
    ///
    /// Returns whatever the command or configuration loading fails with;
    /// `main` turns it into a user-friendly report.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Build the runtime configuration from the global flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("off".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Execute with an explicit runtime configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        let include_config = IncludeConfig::load(config.config_path.as_deref())?;

        match self.command {
            Commands::Rewrite(cmd) => cmd.execute(include_config).await,
            Commands::Check(cmd) => cmd.execute(include_config).await,
            Commands::Render(cmd) => cmd.execute(include_config).await,
        }
    }
}
