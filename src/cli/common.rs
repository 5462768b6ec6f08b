//! Input and output helpers shared by the CLI commands

use anyhow::{Context, Result};
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::config::IncludeConfig;
use crate::core::IncludeError;
use crate::preprocess::IndentedInclude;

/// Name used in error reports for templates read from stdin
pub const STDIN_NAME: &str = "<stdin>";

/// Read a template from `path`, or from stdin when no path is given.
///
/// # Errors
/// Returns [`IncludeError::InputNotFound`] for a missing file, or the IO error
/// with the path attached.
pub async fn read_input(path: Option<&Path>) -> Result<String> {
    let Some(path) = path else {
        let mut source = String::new();
        tokio::io::stdin()
            .read_to_string(&mut source)
            .await
            .context("Failed to read template from stdin")?;
        return Ok(source);
    };

    if !path.exists() {
        return Err(IncludeError::InputNotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read template: {}", path.display()))
}

/// Write `content` to `output`, or to stdout when no path is given.
///
/// Parent directories of `output` are created as needed.
pub async fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    let Some(path) = output else {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(content.as_bytes()).await.context("Failed to write to stdout")?;
        stdout.flush().await.context("Failed to flush stdout")?;
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write output: {}", path.display()))?;
    tracing::debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// Template name for reports: the path as given, or [`STDIN_NAME`].
pub fn input_name(path: Option<&Path>) -> String {
    path.map_or_else(|| STDIN_NAME.to_string(), |path| path.display().to_string())
}

/// Apply `--block-start`/`--block-end` overrides and build the preprocessor.
///
/// # Errors
/// Fails if the resulting delimiters are invalid.
pub fn build_preprocessor(
    config: IncludeConfig,
    block_start: Option<String>,
    block_end: Option<String>,
) -> Result<IndentedInclude> {
    let config = config.with_block_delimiters(block_start, block_end)?;
    let preprocessor = IndentedInclude::new(config.syntax.delimiters()).map_err(|e| {
        IncludeError::InvalidSyntax {
            reason: e.to_string(),
        }
    })?;
    Ok(preprocessor)
}
