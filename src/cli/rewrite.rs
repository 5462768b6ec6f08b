//! Rewrite `indented-include` directives into plain template syntax.
//!
//! The output is what the host engine would parse: every directive replaced
//! by an `indent` filter block around a regular `include`. Useful for
//! inspecting the expansion, or for precompiling templates for an engine
//! that has no preprocessing hook.
//!
//! # Examples
//!
//! ```bash
//! # Rewrite a file to stdout
//! indented-include rewrite templates/config.yaml.j2
//!
//! # Rewrite stdin with custom delimiters
//! cat page.tpl | indented-include rewrite --block-start '<%' --block-end '%>'
//!
//! # Write the result to a file
//! indented-include rewrite page.j2 --output build/page.j2
//! ```
//!
//! With several files the results are written one after another, in the
//! order given.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::common::{build_preprocessor, input_name, read_input, write_output};
use crate::config::IncludeConfig;

/// Command to rewrite templates
#[derive(Args, Debug)]
pub struct RewriteCommand {
    /// Template files to rewrite (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Write the result to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Block start delimiter, overriding the configuration
    #[arg(long, value_name = "S", allow_hyphen_values = true)]
    pub block_start: Option<String>,

    /// Block end delimiter, overriding the configuration
    #[arg(long, value_name = "S", allow_hyphen_values = true)]
    pub block_end: Option<String>,
}

impl RewriteCommand {
    pub async fn execute(self, config: IncludeConfig) -> Result<()> {
        let preprocessor = build_preprocessor(config, self.block_start, self.block_end)?;

        let inputs: Vec<Option<PathBuf>> = if self.files.is_empty() {
            vec![None]
        } else {
            self.files.into_iter().map(Some).collect()
        };

        let mut rewritten = String::new();
        for input in &inputs {
            let path = input.as_deref();
            let source = read_input(path).await?;
            let name = input_name(path);

            rewritten.push_str(&preprocessor.preprocess(&source, &name, path)?);
            tracing::debug!("Rewrote {}", name);
        }

        write_output(self.output.as_deref(), &rewritten).await
    }
}
