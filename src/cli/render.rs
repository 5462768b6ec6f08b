//! Render a template through MiniJinja with `indented-include` enabled.
//!
//! Templates are looked up by name in the template directory (from the
//! configuration, or `--template-dir`). Every template the engine loads,
//! including ones pulled in by `include`, `extends` and `import`, is
//! preprocessed first.
//!
//! # Examples
//!
//! ```bash
//! indented-include render config.yaml --template-dir templates --context vars.json
//! indented-include render page.html --output build/page.html
//! ```

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use super::common::write_output;
use crate::config::IncludeConfig;
use crate::core::IncludeError;
use crate::templating::{TemplateError, TemplateRenderer};

/// Command to render a template
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Template name, relative to the template directory
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Directory templates are loaded from, overriding the configuration
    #[arg(long, value_name = "DIR")]
    pub template_dir: Option<PathBuf>,

    /// JSON file with the render context (must hold an object)
    #[arg(long, value_name = "FILE")]
    pub context: Option<PathBuf>,

    /// Write the result to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl RenderCommand {
    pub async fn execute(self, mut config: IncludeConfig) -> Result<()> {
        if let Some(dir) = self.template_dir {
            config.template_dir = dir;
        }
        if !config.template_dir.is_dir() {
            tracing::warn!(
                "Template directory {} does not exist",
                config.template_dir.display()
            );
        }

        let context = match &self.context {
            Some(path) => load_context(path).await?,
            None => serde_json::Value::Object(serde_json::Map::new()),
        };

        let renderer = TemplateRenderer::new(&config)?;
        let rendered = renderer
            .render(&self.name, &context)
            .map_err(|e| render_error(e, renderer.template_dir()))?;

        write_output(self.output.as_deref(), &rendered).await
    }
}

/// Read the render context, which has to be a JSON object.
async fn load_context(path: &Path) -> Result<serde_json::Value> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read context file: {}", path.display()))?;

    let value: serde_json::Value = serde_json::from_str(&content)
        .map_err(IncludeError::from)
        .with_context(|| format!("Invalid JSON in context file: {}", path.display()))?;

    if !value.is_object() {
        return Err(IncludeError::ConfigError {
            message: format!("context file {} must contain a JSON object", path.display()),
        }
        .into());
    }

    Ok(value)
}

/// Lift engine errors into the application error type.
fn render_error(error: TemplateError, template_dir: &Path) -> IncludeError {
    match error {
        TemplateError::DirectivePlacement(directive) => IncludeError::DirectiveSyntax(directive),
        TemplateError::TemplateNotFound {
            name,
            ..
        } => IncludeError::TemplateNotFound {
            name,
            template_dir: template_dir.display().to_string(),
        },
        other => IncludeError::Template(other),
    }
}
