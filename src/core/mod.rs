//! Core types shared across indented-include
//!
//! Currently this is the error layer: [`IncludeError`] for typed failures,
//! [`ErrorContext`] and [`user_friendly_error`] for CLI reporting.

pub mod error;

pub use error::{ErrorContext, IncludeError, user_friendly_error};
