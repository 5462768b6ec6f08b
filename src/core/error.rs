//! Error handling for indented-include
//!
//! Two layers, as in most of the crate:
//! 1. **Strongly-typed errors** ([`IncludeError`]) for precise handling in code
//! 2. **User-friendly reports** ([`ErrorContext`]) with details and an actionable
//!    suggestion, built by [`user_friendly_error`] for CLI display
//!
//! Library code returns typed errors (`DirectiveSyntaxError`, `TemplateError`,
//! [`IncludeError`]); CLI code propagates them through `anyhow` with added
//! context and converts at the very end.
//!
//! # Examples
//!
//! ```rust,no_run
//! use indented_include::core::{IncludeError, user_friendly_error};
//!
//! let error = IncludeError::TemplateNotFound {
//!     name: "page.html".to_string(),
//!     template_dir: "templates".to_string(),
//! };
//! let context = user_friendly_error(anyhow::Error::from(error));
//! context.display(); // colored report on stderr
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::preprocess::DirectiveSyntaxError;
use crate::templating::TemplateError;

/// The main error type for indented-include operations
#[derive(Error, Debug)]
pub enum IncludeError {
    /// An `indented-include` directive is not alone on its line
    #[error(transparent)]
    DirectiveSyntax(#[from] DirectiveSyntaxError),

    /// Rendering through the host engine failed
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Named template does not exist in the template directory
    #[error("Template '{name}' not found in {template_dir}")]
    TemplateNotFound {
        name: String,
        template_dir: String,
    },

    /// Input file given on the command line does not exist
    #[error("Input file not found: {path}")]
    InputNotFound {
        path: String,
    },

    /// Configuration is structurally valid TOML but semantically wrong
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    /// Explicitly requested configuration file is missing
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        path: String,
    },

    /// Delimiters rejected by the pattern builder or the host engine
    #[error("Invalid delimiter configuration: {reason}")]
    InvalidSyntax {
        reason: String,
    },

    /// Some directives could not be validated
    #[error("{count} misplaced indented-include directive(s) found")]
    CheckFailed {
        count: usize,
    },

    /// JSON parsing error (render context files)
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Other error
    #[error("{message}")]
    Other {
        message: String,
    },
}

/// Error wrapper with user-facing details and a suggestion.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: IncludeError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(error: IncludeError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error (shown in green)
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error (shown in yellow)
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the report to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`]
///
/// Typed errors from this crate get tailored suggestions; anything else is
/// reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let error = match error.downcast::<IncludeError>() {
        Ok(include_error) => return create_error_context(include_error),
        Err(error) => error,
    };

    let error = match error.downcast::<DirectiveSyntaxError>() {
        Ok(syntax_error) => return create_error_context(syntax_error.into()),
        Err(error) => error,
    };

    let error = match error.downcast::<TemplateError>() {
        Ok(template_error) => return create_error_context(template_error.into()),
        Err(error) => error,
    };

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(IncludeError::Other {
                    message: error_with_chain(&error),
                })
                .with_suggestion("Check file ownership and permissions")
                .with_details("The file could not be read or written");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(IncludeError::Other {
                    message: error_with_chain(&error),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if error.downcast_ref::<toml::de::Error>().is_some() {
        return ErrorContext::new(IncludeError::ConfigError {
            message: error_with_chain(&error),
        })
        .with_suggestion("Check the TOML syntax of your configuration file. Verify quotes and brackets")
        .with_details("Delimiters are plain strings, e.g. block_start = \"{%\"");
    }

    ErrorContext::new(IncludeError::Other {
        message: error_with_chain(&error),
    })
}

/// Error message followed by its numbered causes
fn error_with_chain(error: &anyhow::Error) -> String {
    let mut message = error.to_string();

    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

fn create_error_context(error: IncludeError) -> ErrorContext {
    match &error {
        IncludeError::DirectiveSyntax(syntax_error) => {
            let details = format!(
                "Only whitespace may precede indented-include on line {}; that whitespace becomes the indentation of the included template",
                syntax_error.line
            );
            ErrorContext::new(error)
                .with_suggestion("Move the indented-include directive onto its own line, or use a plain include")
                .with_details(details)
        }

        IncludeError::Template(template_error) => {
            let details = template_error.format_with_context();
            ErrorContext::new(error).with_details(details)
        }

        IncludeError::TemplateNotFound {
            template_dir,
            ..
        } => {
            let suggestion = format!(
                "Check the template name and that it exists under {template_dir}, or pass --template-dir"
            );
            ErrorContext::new(error).with_suggestion(suggestion)
        }

        IncludeError::InputNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the path, or omit it to read the template from stdin"),

        IncludeError::ConfigError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Fix the configuration file or override the value on the command line"),

        IncludeError::ConfigNotFound {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Check the --config path or the INDENTED_INCLUDE_CONFIG environment variable",
        ),

        IncludeError::InvalidSyntax {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Use non-empty, distinct delimiters for blocks, variables and comments"),

        IncludeError::CheckFailed {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Move each reported directive onto its own line"),

        IncludeError::JsonError(_) => ErrorContext::new(error)
            .with_suggestion("The render context must be a JSON object, e.g. {\"name\": \"value\"}"),

        IncludeError::Other {
            ..
        } => ErrorContext::new(error),
    }
}
