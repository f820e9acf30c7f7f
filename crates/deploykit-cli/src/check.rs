//! `deploykit check` — load, validate, and report warnings.
//!
//! Structural errors propagate and the process exits non-zero; warnings
//! are printed but do not fail the check.

use anyhow::Result;
use colored::Colorize;

use deploykit_core::config::LoadOptions;

use crate::helpers::{self, print_header};

/// Run the check command.
pub fn run(options: &LoadOptions) -> Result<()> {
    let report = helpers::load(options)?;

    print_header("Configuration Check");

    if report.warnings.is_empty() {
        println!("  {} no warnings", "✓".green());
    } else {
        for warning in &report.warnings {
            println!("  {} {}", "!".yellow().bold(), warning);
        }
    }

    println!();
    println!(
        "  {} configuration valid ({} networks enabled)",
        "✓".green(),
        report.config.enabled_networks().count()
    );
    println!();

    Ok(())
}
