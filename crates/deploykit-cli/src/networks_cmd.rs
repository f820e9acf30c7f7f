//! `deploykit networks` — table of declared networks.

use anyhow::Result;
use colored::Colorize;

use deploykit_core::config::{LoadOptions, ToolchainConfig};
use deploykit_core::ConfigError;

use crate::helpers::{self, print_header};

/// Row for the networks table.
struct NetworkRow {
    name: String,
    chain_id: u64,
    url: String,
    enabled: bool,
    signer: String,
}

/// Run the networks command.
pub fn run(options: &LoadOptions) -> Result<()> {
    let report = helpers::load(options)?;
    let rows = build_rows(&report.config);

    print_header("Networks");
    println!(
        "  {:<12} {:>8}  {:<9} {:<28} {}",
        "Name".bold(),
        "Chain".bold(),
        "State".bold(),
        "Signer".bold(),
        "Endpoint".bold()
    );

    for row in &rows {
        let state = if row.enabled {
            "enabled".green().to_string()
        } else {
            "disabled".dimmed().to_string()
        };
        println!(
            "  {:<12} {:>8}  {:<9} {:<28} {}",
            row.name,
            row.chain_id,
            state,
            row.signer,
            row.url.dimmed()
        );
    }
    println!();

    Ok(())
}

fn build_rows(config: &ToolchainConfig) -> Vec<NetworkRow> {
    config
        .networks
        .iter()
        .map(|(name, net)| NetworkRow {
            name: name.clone(),
            chain_id: net.chain_id,
            url: net.url.clone(),
            enabled: net.enabled,
            signer: signer_status(config, name),
        })
        .collect()
}

/// Human-readable result of `signer_for`, never showing the key itself.
fn signer_status(config: &ToolchainConfig, name: &str) -> String {
    match config.signer_for(name) {
        Ok(_) => "key set".to_string(),
        Err(ConfigError::MissingSigningKey { env_var, .. }) => format!("missing ({env_var})"),
        Err(ConfigError::NetworkDisabled(_)) => "-".to_string(),
        Err(e) => e.to_string(),
    }
}
