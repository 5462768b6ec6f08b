//! Error raised when an `indented-include` directive is misplaced.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Message reported for a directive preceded by non-whitespace text.
pub const NON_WHITESPACE_LEAD_MESSAGE: &str =
    "line contains non-whitespace characters before include statement";

/// Syntax error carrying the same location data the host engine reports for
/// its own parse errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} ({}, line {line})", location_label(.filename, .name))]
pub struct DirectiveSyntaxError {
    pub message: String,
    /// 1-based line of the directive in the original source
    pub line: usize,
    /// Template name as known to the host engine
    pub name: String,
    /// File the template was loaded from, if any
    pub filename: Option<PathBuf>,
}

impl DirectiveSyntaxError {
    pub fn non_whitespace_lead(
        line: usize,
        name: impl Into<String>,
        filename: Option<PathBuf>,
    ) -> Self {
        Self {
            message: NON_WHITESPACE_LEAD_MESSAGE.to_string(),
            line,
            name: name.into(),
            filename,
        }
    }
}

/// File path when known, template name otherwise
fn location_label(filename: &Option<PathBuf>, name: &str) -> String {
    filename.as_deref().map_or_else(|| name.to_string(), |path: &Path| path.display().to_string())
}
