//! Generic configuration parsing utilities.
//!
//! Reads a TOML file and deserializes it into any `DeserializeOwned` type,
//! attaching the file path to read and parse failures.
//!
//! Example error output:
//! ```text
//! Failed to parse config file: /path/to/indented-include.toml
//! Caused by:
//!     invalid type: integer `1`, expected a string
//! ```

use anyhow::{Context, Result};
use std::path::Path;

/// Parse a TOML configuration file into the specified type.
///
/// # Examples
///
/// ```rust,no_run
/// use indented_include::config::{IncludeConfig, parse_config};
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// let config: IncludeConfig = parse_config(Path::new("indented-include.toml"))?;
/// println!("Templates live in {}", config.template_dir.display());
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Fails if the file cannot be read, is not valid TOML, or does not match `T`.
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: T = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}
