//! Structured errors for rendering through the host engine
//!
//! MiniJinja errors are flattened into [`TemplateError`] with an
//! [`ErrorLocation`], so the CLI can print where a failure happened without
//! exposing engine internals. Directive placement errors raised by the loader
//! keep their own location, which refers to the original (unrewritten) source.

use std::path::{Path, PathBuf};

use crate::preprocess::DirectiveSyntaxError;

/// Template errors with location context
#[derive(Debug)]
pub enum TemplateError {
    /// `indented-include` preceded by non-whitespace text
    DirectivePlacement(DirectiveSyntaxError),

    TemplateNotFound {
        name: String,
        location: Box<ErrorLocation>,
    },

    SyntaxError {
        message: String,
        location: Box<ErrorLocation>,
    },

    RenderFailed {
        message: String,
        location: Box<ErrorLocation>,
    },
}

/// Location information for template errors
#[derive(Debug, Clone, Default)]
pub struct ErrorLocation {
    /// Template being rendered, or the one that failed inside an include
    pub template_name: String,
    /// File path if the template came from disk
    pub file_path: Option<PathBuf>,
    /// Line number if reported by the engine
    pub line_number: Option<usize>,
}

impl TemplateError {
    /// Convert a MiniJinja error raised while loading or rendering `requested`.
    pub(crate) fn from_engine(
        error: &minijinja::Error,
        requested: &str,
        template_dir: Option<&Path>,
    ) -> Self {
        if let Some(directive) = find_directive_error(error) {
            return Self::DirectivePlacement(directive.clone());
        }

        let template_name = error.name().unwrap_or(requested).to_string();
        let location = Box::new(ErrorLocation {
            file_path: template_dir.map(|dir| dir.join(&template_name)),
            template_name,
            line_number: error.line(),
        });
        let message = error.detail().map_or_else(|| error.to_string(), str::to_string);

        match error.kind() {
            minijinja::ErrorKind::TemplateNotFound => Self::TemplateNotFound {
                name: location.template_name.clone(),
                location,
            },
            minijinja::ErrorKind::SyntaxError => Self::SyntaxError {
                message,
                location,
            },
            _ => Self::RenderFailed {
                message,
                location,
            },
        }
    }

    /// Location of the failure, if known
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::DirectivePlacement(directive) => Some(directive.line),
            Self::TemplateNotFound {
                location,
                ..
            }
            | Self::SyntaxError {
                location,
                ..
            }
            | Self::RenderFailed {
                location,
                ..
            } => location.line_number,
        }
    }

    /// Multi-line report with location and a hint, for terminal output
    pub fn format_with_context(&self) -> String {
        match self {
            Self::DirectivePlacement(directive) => format_directive_error(directive),
            Self::TemplateNotFound {
                name,
                location,
            } => format_not_found_error(name, location),
            Self::SyntaxError {
                message,
                location,
            } => format_syntax_error(message, location),
            Self::RenderFailed {
                message,
                location,
            } => format_render_error(message, location),
        }
    }
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectivePlacement(directive) => write!(f, "{directive}"),
            Self::TemplateNotFound {
                name,
                ..
            } => write!(f, "Template not found: '{name}'"),
            Self::SyntaxError {
                message,
                ..
            } => write!(f, "Template syntax error: {message}"),
            Self::RenderFailed {
                message,
                ..
            } => write!(f, "Template rendering failed: {message}"),
        }
    }
}

impl std::error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DirectivePlacement(directive) => Some(directive),
            _ => None,
        }
    }
}

/// Walk the source chain for a directive error attached by the loader.
fn find_directive_error(error: &minijinja::Error) -> Option<&DirectiveSyntaxError> {
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        if let Some(directive) = cause.downcast_ref::<DirectiveSyntaxError>() {
            return Some(directive);
        }
        source = cause.source();
    }
    None
}

fn push_location(msg: &mut String, location: &ErrorLocation) {
    msg.push_str(&format!("Template: {}\n", location.template_name));
    if let Some(path) = &location.file_path {
        msg.push_str(&format!("File: {}\n", path.display()));
    }
    if let Some(line) = location.line_number {
        msg.push_str(&format!("Line: {line}\n"));
    }
}

fn format_directive_error(directive: &DirectiveSyntaxError) -> String {
    let mut msg = String::new();

    msg.push_str("ERROR: Misplaced indented-include\n\n");
    msg.push_str(&format!("Error: {}\n", directive.message));
    push_location(
        &mut msg,
        &ErrorLocation {
            template_name: directive.name.clone(),
            file_path: directive.filename.clone(),
            line_number: Some(directive.line),
        },
    );

    msg.push_str("\nSUGGESTION: Put the directive on its own line. Only indentation may precede it.\n");
    msg
}

fn format_not_found_error(name: &str, location: &ErrorLocation) -> String {
    let mut msg = String::new();

    msg.push_str("ERROR: Template Not Found\n\n");
    msg.push_str(&format!("Requested: {name}\n"));
    if let Some(path) = &location.file_path {
        msg.push_str(&format!("Looked for: {}\n", path.display()));
    }

    msg.push_str("\nSUGGESTION: Template names are relative to the template directory.\n");
    msg.push_str("Names with '..' segments or absolute paths are never loaded.\n");
    msg
}

fn format_syntax_error(message: &str, location: &ErrorLocation) -> String {
    let mut msg = String::new();

    msg.push_str("ERROR: Template Syntax Error\n\n");
    msg.push_str(&format!("Error: {message}\n"));
    push_location(&mut msg, location);

    msg.push_str("\nSUGGESTION: Check template syntax for unclosed tags or invalid expressions.\n");
    msg.push_str("Common issues:\n");
    msg.push_str("  - Unclosed block or variable delimiters\n");
    msg.push_str("  - Block delimiters that differ from the configured syntax\n");
    msg.push_str("  - Missing quotes around include paths\n");
    msg
}

fn format_render_error(message: &str, location: &ErrorLocation) -> String {
    let mut msg = String::new();

    msg.push_str("ERROR: Template Rendering Failed\n\n");
    msg.push_str(&format!("Error: {message}\n"));
    push_location(&mut msg, location);
    msg
}
