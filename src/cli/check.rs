//! Report misplaced `indented-include` directives.
//!
//! Unlike `rewrite`, which stops at the first bad directive, `check` scans
//! each file completely and lists every directive that has text other than
//! whitespace in front of it. The command fails when at least one is found,
//! which makes it usable as a CI or pre-commit step.
//!
//! # Examples
//!
//! ```bash
//! indented-include check templates/*.j2
//!
//! # Machine-readable results
//! indented-include check --format json templates/page.j2
//! ```
//!
//! # Output Formats
//!
//! ## Text Format (Default)
//! ```text
//! ✓ templates/ok.j2 (2 directives)
//! ✗ line contains non-whitespace characters before include statement (templates/bad.j2, line 7)
//! ```
//!
//! ## JSON Format
//! ```json
//! {
//!   "valid": false,
//!   "files": [
//!     {
//!       "path": "templates/bad.j2",
//!       "directives": 1,
//!       "errors": [
//!         { "line": 7, "message": "line contains non-whitespace characters before include statement" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::common::{build_preprocessor, input_name, read_input};
use crate::config::IncludeConfig;
use crate::core::IncludeError;
use crate::preprocess::DirectiveSyntaxError;

/// Command to check directive placement
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Template files to check
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Block start delimiter, overriding the configuration
    #[arg(long, value_name = "S", allow_hyphen_values = true)]
    pub block_start: Option<String>,

    /// Block end delimiter, overriding the configuration
    #[arg(long, value_name = "S", allow_hyphen_values = true)]
    pub block_end: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for check results
#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One colored line per file or error
    Text,
    /// A single JSON document on stdout
    Json,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    valid: bool,
    files: Vec<FileReport>,
}

#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    directives: usize,
    errors: Vec<ErrorReport>,
}

#[derive(Debug, Serialize)]
struct ErrorReport {
    line: usize,
    message: String,
}

impl From<&DirectiveSyntaxError> for ErrorReport {
    fn from(error: &DirectiveSyntaxError) -> Self {
        Self {
            line: error.line,
            message: error.message.clone(),
        }
    }
}

impl CheckCommand {
    pub async fn execute(self, config: IncludeConfig) -> Result<()> {
        let preprocessor = build_preprocessor(config, self.block_start, self.block_end)?;

        let mut report = CheckReport {
            valid: true,
            files: Vec::with_capacity(self.files.len()),
        };
        let mut error_count = 0;

        for path in &self.files {
            let source = read_input(Some(path)).await?;
            let name = input_name(Some(path));
            let directives = preprocessor.find_directives(&source).len();
            let errors = preprocessor.check(&source, &name, Some(path));

            tracing::debug!("{}: {} directive(s), {} misplaced", name, directives, errors.len());

            if matches!(self.format, OutputFormat::Text) {
                if errors.is_empty() {
                    println!("{} {} ({} directives)", "✓".green(), name, directives);
                }
                for error in &errors {
                    println!("{} {}", "✗".red(), error);
                }
            }

            error_count += errors.len();
            report.files.push(FileReport {
                path: name,
                directives,
                errors: errors.iter().map(ErrorReport::from).collect(),
            });
        }

        report.valid = error_count == 0;
        if matches!(self.format, OutputFormat::Json) {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        if error_count > 0 {
            return Err(IncludeError::CheckFailed {
                count: error_count,
            }
            .into());
        }

        Ok(())
    }
}
