//! indented-include - indentation-preserving includes for Jinja-style templates
//!
//! Plain `include` pastes a sub-template verbatim, so only its first line lands
//! at the column of the include statement. This crate adds a custom
//! `indented-include` directive that is rewritten, before the template is
//! parsed, into an `include` wrapped in an `indent` filter. Every line of the
//! included template then carries the whitespace that preceded the directive.
//!
//! ```text
//! services:
//!   {% indented-include "web.yaml" %}
//! ```
//!
//! # Architecture Overview
//!
//! The pipeline is linear: raw source text, directive pattern match, rewritten
//! text, host parser.
//!
//! # Core Modules
//!
//! - [`preprocess`] - Directive pattern and the source rewriter
//! - [`templating`] - MiniJinja integration: preprocessing loader and `indent` filter
//! - [`config`] - TOML configuration for delimiters and engine options
//! - [`core`] - Error types and user-facing error reports
//! - [`cli`] - Command-line interface (`rewrite`, `check`, `render`)
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Show the expanded template
//! indented-include rewrite templates/compose.yaml.j2
//!
//! # Fail if any directive shares its line with other text
//! indented-include check templates/*.j2
//!
//! # Render with a JSON context
//! indented-include render compose.yaml.j2 --template-dir templates --context vars.json
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod preprocess;
pub mod templating;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
