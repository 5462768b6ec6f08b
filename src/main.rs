//! indented-include CLI entry point
//!
//! Parses arguments, runs the command and prints a user-friendly report on
//! failure. Commands:
//! - `rewrite` - Expand `indented-include` directives
//! - `check` - Report misplaced directives
//! - `render` - Render a template with the preprocessor installed

use anyhow::Result;
use clap::Parser;
use indented_include::cli;
use indented_include::core::error::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
