//! Source preprocessing for the `indented-include` directive.
//!
//! Template sources are rewritten before the host engine parses them. Every
//!
//! ```text
//!     {% indented-include "list.txt" %}
//! ```
//!
//! becomes
//!
//! ```text
//!     {% filter indent("    ") %}{% include "list.txt" %}{% endfilter %}
//! ```
//!
//! so that each line of the included template is indented to the column of
//! the directive. The directive must be the first non-whitespace text on its
//! line; anything else is reported as a [`DirectiveSyntaxError`] with the
//! template name, file and 1-based line.
//!
//! The rewrite is purely textual. Argument text (paths, lists,
//! `ignore missing`, `with context`) is copied verbatim into the generated
//! `include` and only interpreted later by the host engine. An end delimiter
//! inside a quoted argument terminates the directive early; this is a known
//! limitation of the regex-based recognition.
//!
//! # Example
//!
//! ```rust
//! use indented_include::preprocess::{Delimiters, IndentedInclude};
//!
//! # fn main() -> anyhow::Result<()> {
//! let preprocessor = IndentedInclude::new(Delimiters::default())?;
//! let rewritten = preprocessor.preprocess("  {% indented-include 'x.txt' %}", "page", None)?;
//! assert_eq!(
//!     rewritten,
//!     r#"  {% filter indent("  ") %}{% include 'x.txt' %}{% endfilter %}"#
//! );
//! # Ok(())
//! # }
//! ```

mod error;
mod pattern;
mod rewriter;

use std::path::Path;

pub use error::{DirectiveSyntaxError, NON_WHITESPACE_LEAD_MESSAGE};
pub use pattern::{DIRECTIVE_KEYWORD, Delimiters, DirectiveMatch, DirectivePattern};
pub use rewriter::{check, rewrite};

/// Preprocessor registered with a host environment.
///
/// Holds the delimiters of one environment together with the pattern compiled
/// for them, so the regex is built once and reused for every template.
#[derive(Debug, Clone)]
pub struct IndentedInclude {
    pattern: DirectivePattern,
}

impl IndentedInclude {
    pub fn new(delimiters: Delimiters) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: DirectivePattern::new(delimiters)?,
        })
    }

    pub fn delimiters(&self) -> &Delimiters {
        self.pattern.delimiters()
    }

    pub fn pattern(&self) -> &DirectivePattern {
        &self.pattern
    }

    /// Rewrite `source` for the host parser. See [`rewrite`].
    pub fn preprocess(
        &self,
        source: &str,
        name: &str,
        filename: Option<&Path>,
    ) -> Result<String, DirectiveSyntaxError> {
        rewrite(source, name, filename, &self.pattern)
    }

    /// All placement errors in `source`. See [`check`].
    pub fn check(
        &self,
        source: &str,
        name: &str,
        filename: Option<&Path>,
    ) -> Vec<DirectiveSyntaxError> {
        check(source, name, filename, &self.pattern)
    }

    /// Directives found in `source`, valid or not.
    pub fn find_directives<'s>(&self, source: &'s str) -> Vec<DirectiveMatch<'s>> {
        self.pattern.matches(source).collect()
    }
}
