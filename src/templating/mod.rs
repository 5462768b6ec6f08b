//! MiniJinja host integration for the `indented-include` preprocessor.
//!
//! The preprocessor itself only rewrites text. This module is where it gets
//! wired into a real engine: [`TemplateRenderer`] installs a loader that runs
//! every template source through [`crate::preprocess::IndentedInclude`]
//! before MiniJinja parses it, and registers an `indent` filter that accepts a
//! string prefix the way Jinja2 does.
//!
//! # Example
//!
//! With `templates/config.yaml`:
//!
//! ```text
//! server:
//!   {% indented-include "listen.yaml" %}
//! ```
//!
//! and `templates/listen.yaml`:
//!
//! ```text
//! host: {{ host }}
//! port: {{ port }}
//! ```
//!
//! rendering `config.yaml` yields:
//!
//! ```text
//! server:
//!   host: 0.0.0.0
//!   port: 8080
//! ```
//!
//! Both lines of the included template carry the two spaces that precede the
//! directive.

pub mod error;
pub mod filters;
mod renderer;

pub use error::{ErrorLocation, TemplateError};
pub use renderer::TemplateRenderer;
