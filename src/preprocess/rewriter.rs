//! Expansion of `indented-include` directives into standard statements.
//!
//! Each directive becomes three statements (shown with `{%`/`%}`):
//!
//! ```text
//! <lead>{%<start-mod> filter indent("<lead>") %}{% include <args> %}{% endfilter <end-mod>%}
//! ```
//!
//! The lead is emitted once in front of the opening statement, so the first
//! line of the included content sits where the directive was. The `indent`
//! filter prefixes every following line with the same lead.

use std::path::Path;

use super::error::DirectiveSyntaxError;
use super::pattern::{Delimiters, DirectiveMatch, DirectivePattern};

/// Byte offsets of every newline in a source, for offset to line lookups.
#[derive(Debug)]
pub(crate) struct LineIndex {
    newlines: Vec<usize>,
}

impl LineIndex {
    pub(crate) fn new(source: &str) -> Self {
        Self {
            newlines: source.match_indices('\n').map(|(offset, _)| offset).collect(),
        }
    }

    /// 1-based line containing `offset`.
    pub(crate) fn line_of(&self, offset: usize) -> usize {
        self.newlines.partition_point(|&newline| newline < offset) + 1
    }
}

/// Rewrite every directive in `source` in a single left-to-right pass.
///
/// Matches are found against the original text only; replacement text is
/// never rescanned.
///
/// # Errors
///
/// Fails on the first directive preceded by non-whitespace text on its line.
/// Nothing is returned for the directives rewritten before it.
pub fn rewrite(
    source: &str,
    name: &str,
    filename: Option<&Path>,
    pattern: &DirectivePattern,
) -> Result<String, DirectiveSyntaxError> {
    let delimiters = pattern.delimiters();
    let mut output = String::with_capacity(source.len());
    let mut copied_up_to = 0;
    let mut rewritten = 0usize;

    for directive in pattern.matches(source) {
        if !directive.has_valid_lead() {
            let line = LineIndex::new(source).line_of(directive.offset());
            tracing::debug!(
                template = name,
                line,
                "Rejecting indented-include after non-whitespace"
            );
            return Err(DirectiveSyntaxError::non_whitespace_lead(
                line,
                name,
                filename.map(Path::to_path_buf),
            ));
        }

        output.push_str(&source[copied_up_to..directive.span.start]);
        let replacement = expand(&directive, delimiters);
        tracing::trace!(template = name, "{}", replacement);
        output.push_str(&replacement);
        copied_up_to = directive.span.end;
        rewritten += 1;
    }

    output.push_str(&source[copied_up_to..]);

    if rewritten > 0 {
        tracing::debug!(template = name, count = rewritten, "Rewrote indented-include directives");
    }
    Ok(output)
}

/// Collect a placement error for every misplaced directive in `source`.
///
/// Unlike [`rewrite`], this does not stop at the first error. An empty vector
/// means [`rewrite`] would succeed.
pub fn check(
    source: &str,
    name: &str,
    filename: Option<&Path>,
    pattern: &DirectivePattern,
) -> Vec<DirectiveSyntaxError> {
    let mut lines = None;

    pattern
        .matches(source)
        .filter(|directive| !directive.has_valid_lead())
        .map(|directive| {
            let index = lines.get_or_insert_with(|| LineIndex::new(source));
            DirectiveSyntaxError::non_whitespace_lead(
                index.line_of(directive.offset()),
                name,
                filename.map(Path::to_path_buf),
            )
        })
        .collect()
}

/// Replacement text for one validated directive.
pub(crate) fn expand(directive: &DirectiveMatch<'_>, delimiters: &Delimiters) -> String {
    let Delimiters {
        block_start,
        block_end,
    } = delimiters;
    let lead = directive.lead;

    let start_modifier = directive.start_modifier;
    // The lead is whitespace only, so it cannot close the string literal
    let open = format!("{lead}{block_start}{start_modifier} filter indent(\"{lead}\") {block_end}");
    let include = format!("{block_start} include {} {block_end}", directive.args);
    let close = format!("{block_start} endfilter {}{block_end}", directive.end_modifier);

    [open, include, close].concat()
}
