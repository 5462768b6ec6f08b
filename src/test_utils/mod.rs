//! Test utilities shared by unit and integration tests
//!
//! Available to this crate's own tests and, through the `test-utils`
//! feature, to the `integration` test target.
//!
//! # Example
//!
//! ```rust,no_run
//! use indented_include::test_utils::{TemplateFixture, init_test_logging};
//!
//! init_test_logging(None);
//! let fixture = TemplateFixture::yaml_service();
//! # let dir = std::path::Path::new("templates");
//! fixture.write_to(dir).unwrap();
//! ```

pub mod fixtures;

pub use fixtures::TemplateFixture;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Installs a test-writer subscriber once per process. Uses `level` when
/// given, otherwise `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=indented_include=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
