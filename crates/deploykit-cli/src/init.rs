//! `deploykit init` — write a starter config file.
//!
//! Writes the built-in defaults with secrets stripped. An existing file is
//! left untouched.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use deploykit_core::config::{defaults, save};

use crate::helpers::print_header;

/// Run the init command.
pub fn run(path: &Path) -> Result<()> {
    print_header("Deploykit — Setup");

    if write_defaults(path)? {
        println!("  {} created config at {}", "✓".green(), path.display());
    } else {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            path.display()
        );
    }

    println!();
    println!(
        "{}",
        "  Secrets are read from the environment (PRIVATE_KEY, TBSC_PRIVATE_KEY, *_API_KEY) or a .env file."
            .dimmed()
    );
    println!();

    Ok(())
}

/// Write the defaults to `path` unless it exists. Returns whether a file was written.
fn write_defaults(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save(&defaults::builtin(), path)
        .with_context(|| format!("failed to write config to {}", path.display()))?;
    Ok(true)
}
