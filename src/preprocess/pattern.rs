//! Regex construction for the `indented-include` directive.
//!
//! The pattern is parameterized over the host engine's block delimiters. Both
//! delimiters are escaped, so any pair of strings (`{%`/`%}`, `<<`/`>>`,
//! `|$`/`$|`, ...) is treated as literal text.
//!
//! The recognized shape, using `{%`/`%}` as an example:
//!
//! ```text
//! <lead>{%<mod> indented-include <args> <mod>%}
//! ```
//!
//! - `lead` is everything between the start of the line and the start
//!   delimiter. The rewriter rejects it unless it is whitespace only.
//! - `mod` is an optional `+` or `-` trim marker, preserved verbatim.
//! - `args` is everything up to the first end delimiter, passed through
//!   unexamined. It may span lines.

use std::ops::Range;

use regex::{Captures, Regex};

/// Keyword recognized inside a block statement.
pub const DIRECTIVE_KEYWORD: &str = "indented-include";

const GROUP_LEAD: &str = "lead";
const GROUP_START_MODIFIER: &str = "start_modifier";
const GROUP_ARGS: &str = "args";
const GROUP_END_MODIFIER: &str = "end_modifier";

/// Block statement delimiters of the host engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    pub block_start: String,
    pub block_end: String,
}

impl Delimiters {
    pub fn new(block_start: impl Into<String>, block_end: impl Into<String>) -> Self {
        Self {
            block_start: block_start.into(),
            block_end: block_end.into(),
        }
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::new("{%", "%}")
    }
}

/// One occurrence of the directive in a template source.
///
/// Borrowed from the source it was found in and only meant to live for the
/// duration of a single substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveMatch<'s> {
    /// Text on the directive's line before the start delimiter
    pub lead: &'s str,
    /// Trim marker right after the start delimiter (`""`, `"+"` or `"-"`)
    pub start_modifier: &'s str,
    /// Argument text between the keyword and the end delimiter
    pub args: &'s str,
    /// Trim marker right before the end delimiter (`""`, `"+"` or `"-"`)
    pub end_modifier: &'s str,
    /// Byte range of the whole match, lead included
    pub span: Range<usize>,
}

impl DirectiveMatch<'_> {
    /// Byte offset of the match, which is also the start of its line.
    pub fn offset(&self) -> usize {
        self.span.start
    }

    /// Whether only whitespace (or nothing) precedes the directive on its line.
    pub fn has_valid_lead(&self) -> bool {
        self.lead.chars().all(char::is_whitespace)
    }
}

/// Compiled matcher for `indented-include` directives.
///
/// Cheap to clone; the compiled regex is reference counted internally.
#[derive(Debug, Clone)]
pub struct DirectivePattern {
    regex: Regex,
    delimiters: Delimiters,
}

impl DirectivePattern {
    /// Build the matcher for the given block delimiters.
    ///
    /// # Errors
    ///
    /// Only fails if the compiled program exceeds the regex size limit, which
    /// requires absurdly long delimiters.
    pub fn new(delimiters: Delimiters) -> Result<Self, regex::Error> {
        let regex = Regex::new(&build_pattern(&delimiters.block_start, &delimiters.block_end))?;
        tracing::debug!(
            block_start = %delimiters.block_start,
            block_end = %delimiters.block_end,
            "Compiled {} pattern",
            DIRECTIVE_KEYWORD
        );
        Ok(Self {
            regex,
            delimiters,
        })
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// Whether `source` contains at least one directive.
    pub fn is_match(&self, source: &str) -> bool {
        self.regex.is_match(source)
    }

    /// Iterate over all directives in `source`, left to right, non-overlapping.
    pub fn matches<'s>(&self, source: &'s str) -> impl Iterator<Item = DirectiveMatch<'s>> {
        self.regex.captures_iter(source).filter_map(|caps| directive_from_captures(&caps))
    }
}

/// Regex source for the directive between `block_start` and `block_end`.
///
/// Not compiled in verbose mode: `regex::escape` leaves whitespace and `#`
/// untouched in some positions, and delimiters may contain either.
fn build_pattern(block_start: &str, block_end: &str) -> String {
    [
        // ^ matches after every newline; . stops at the line end
        r"(?m)(?P<lead>^.*)",
        &regex::escape(block_start),
        r"(?P<start_modifier>[+-]?)",
        r"\s*",
        &regex::escape(DIRECTIVE_KEYWORD),
        r"\b\s*",
        // lazy, so the first end delimiter closes the directive
        r"(?P<args>(?s:.*?))",
        r"\s*",
        r"(?P<end_modifier>[+-]?)",
        &regex::escape(block_end),
    ]
    .concat()
}

fn directive_from_captures<'s>(caps: &Captures<'s>) -> Option<DirectiveMatch<'s>> {
    let whole = caps.get(0)?;
    let group = |name: &str| caps.name(name).map_or("", |m| m.as_str());

    Some(DirectiveMatch {
        lead: group(GROUP_LEAD),
        start_modifier: group(GROUP_START_MODIFIER),
        args: group(GROUP_ARGS),
        end_modifier: group(GROUP_END_MODIFIER),
        span: whole.range(),
    })
}
