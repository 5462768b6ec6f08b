//! Custom MiniJinja filters.
//!
//! MiniJinja's builtin `indent` only takes a width. Rewritten templates call
//! `indent("<lead>")` with the exact whitespace found in front of the
//! directive, which may contain tabs, so the filter is replaced with one that
//! follows Jinja2: the argument is either a prefix string or a number of
//! spaces, the first line is left alone unless `first` is true, and blank
//! lines are left alone unless `blank` is true.

use minijinja::{Error, ErrorKind, Value};

/// Width used when `indent` is called without arguments.
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// `indent(prefix=4, first=false, blank=false)`
pub fn indent(
    value: String,
    width: Option<Value>,
    first: Option<bool>,
    blank: Option<bool>,
) -> Result<String, Error> {
    let prefix = indent_prefix(width.as_ref())?;
    Ok(indent_lines(&value, &prefix, first.unwrap_or(false), blank.unwrap_or(false)))
}

fn indent_prefix(width: Option<&Value>) -> Result<String, Error> {
    let Some(width) = width else {
        return Ok(" ".repeat(DEFAULT_INDENT_WIDTH));
    };

    if let Some(prefix) = width.as_str() {
        return Ok(prefix.to_string());
    }
    if let Some(count) = width.as_usize() {
        return Ok(" ".repeat(count));
    }

    Err(Error::new(
        ErrorKind::InvalidOperation,
        format!("indent expects a string or a non-negative integer, got {}", width.kind()),
    ))
}

/// Prefix the lines of `text` with `prefix`.
///
/// Lines are separated by `\n`; a trailing newline yields a final empty line,
/// which counts as blank.
pub fn indent_lines(text: &str, prefix: &str, first: bool, blank: bool) -> String {
    let mut out = String::with_capacity(text.len() + prefix.len() * 8);

    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let wanted = if i == 0 {
            first
        } else {
            blank || !line.is_empty()
        };
        if wanted {
            out.push_str(prefix);
        }
        out.push_str(line);
    }

    out
}
