//! Integration test suite for indented-include
//!
//! End-to-end tests that run the `indented-include` binary in temporary
//! projects and check its output, files and exit codes.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **rewrite**: Directive expansion from files and stdin
//! - **check**: Placement reports in text and JSON
//! - **render**: Rendering through MiniJinja, including nested templates
//! - **config_lookup**: Configuration file resolution and overrides

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod check;
mod config_lookup;
mod render;
mod rewrite;
