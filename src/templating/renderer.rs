//! Template rendering engine with MiniJinja.
//!
//! [`TemplateRenderer`] owns a MiniJinja environment configured from
//! [`IncludeConfig`]. Its loader reads templates from the template directory
//! and runs every source through [`IndentedInclude::preprocess`] before the
//! engine parses it, which is how `indented-include` becomes available in
//! every template, including ones pulled in by `include`, `extends` or
//! `import`.

use anyhow::Result;
use minijinja::{AutoEscape, Environment, Error, ErrorKind, Value};
use std::path::{Component, Path, PathBuf};

use super::error::TemplateError;
use super::filters;
use crate::config::IncludeConfig;
use crate::core::IncludeError;
use crate::preprocess::IndentedInclude;

/// Template renderer with the `indented-include` preprocessor installed.
pub struct TemplateRenderer {
    env: Environment<'static>,
    preprocessor: IndentedInclude,
    template_dir: PathBuf,
}

impl TemplateRenderer {
    /// Create a renderer for the templates under `config.template_dir`.
    ///
    /// # Errors
    ///
    /// Fails if the configured delimiters are rejected by the preprocessor or
    /// by MiniJinja.
    pub fn new(config: &IncludeConfig) -> Result<Self> {
        let syntax = &config.syntax;
        let preprocessor = IndentedInclude::new(syntax.delimiters()).map_err(|e| {
            IncludeError::InvalidSyntax {
                reason: e.to_string(),
            }
        })?;

        let syntax_config = minijinja::syntax::SyntaxConfig::builder()
            .block_delimiters(syntax.block_start.clone(), syntax.block_end.clone())
            .variable_delimiters(syntax.variable_start.clone(), syntax.variable_end.clone())
            .comment_delimiters(syntax.comment_start.clone(), syntax.comment_end.clone())
            .build()
            .map_err(|e| IncludeError::InvalidSyntax {
                reason: e.to_string(),
            })?;

        let mut env = Environment::new();
        env.set_syntax(syntax_config);
        env.set_keep_trailing_newline(config.keep_trailing_newline);
        env.set_trim_blocks(config.trim_blocks);
        env.set_lstrip_blocks(config.lstrip_blocks);
        // Plain text output, nothing is HTML
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_filter("indent", filters::indent);

        let template_dir = config.template_dir.clone();
        let loader_dir = template_dir.clone();
        let loader_preprocessor = preprocessor.clone();
        env.set_loader(move |name| load_template(&loader_dir, name, &loader_preprocessor));

        tracing::debug!(
            template_dir = %template_dir.display(),
            block_start = %syntax.block_start,
            block_end = %syntax.block_end,
            "Created template renderer"
        );

        Ok(Self {
            env,
            preprocessor,
            template_dir,
        })
    }

    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    /// Render the template `name` from the template directory.
    pub fn render(&self, name: &str, context: &serde_json::Value) -> Result<String, TemplateError> {
        tracing::debug!("Rendering template '{}'", name);

        let template = self.env.get_template(name).map_err(|e| self.engine_error(&e, name))?;
        template.render(Value::from_serialize(context)).map_err(|e| self.engine_error(&e, name))
    }

    /// Render an in-memory template. Templates it includes still come from
    /// the template directory.
    pub fn render_str(
        &self,
        name: &str,
        source: &str,
        context: &serde_json::Value,
    ) -> Result<String, TemplateError> {
        let rewritten = self
            .preprocessor
            .preprocess(source, name, None)
            .map_err(TemplateError::DirectivePlacement)?;

        self.env
            .render_named_str(name, &rewritten, Value::from_serialize(context))
            .map_err(|e| self.engine_error(&e, name))
    }

    fn engine_error(&self, error: &Error, name: &str) -> TemplateError {
        TemplateError::from_engine(error, name, Some(&self.template_dir))
    }
}

/// Loader callback: read `name` below `dir` and preprocess it.
///
/// Returns `Ok(None)` for names that do not resolve to a file, which MiniJinja
/// reports as "template not found".
fn load_template(
    dir: &Path,
    name: &str,
    preprocessor: &IndentedInclude,
) -> Result<Option<String>, Error> {
    let Some(path) = resolve_template_path(dir, name) else {
        tracing::warn!("Refusing to load template outside the template directory: {}", name);
        return Ok(None);
    };

    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(Error::new(
                ErrorKind::InvalidOperation,
                format!("could not read template '{}'", path.display()),
            )
            .with_source(e));
        }
    };

    tracing::debug!("Loaded template '{}' from {}", name, path.display());

    match preprocessor.preprocess(&source, name, Some(&path)) {
        Ok(rewritten) => Ok(Some(rewritten)),
        // Keep the original error as the source so its line survives
        Err(directive) => {
            Err(Error::new(ErrorKind::SyntaxError, directive.to_string()).with_source(directive))
        }
    }
}

/// Join `name` onto `dir` unless it is absolute or climbs out with `..`.
fn resolve_template_path(dir: &Path, name: &str) -> Option<PathBuf> {
    let relative = Path::new(name);
    let contained = relative
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));

    contained.then(|| dir.join(relative))
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
