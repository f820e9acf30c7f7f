//! `deploykit show` — print the resolved configuration.
//!
//! - Summary view: compiler, optimizer, size report, verification keys
//! - `--json`: the toolchain-shaped JSON, disabled networks omitted

use anyhow::{Context, Result};
use colored::Colorize;

use deploykit_core::config::{LoadOptions, ToolchainConfig};

use crate::helpers::{self, masked, print_header, status_mark};

/// Run the show command.
pub fn run(options: &LoadOptions, json: bool, reveal: bool) -> Result<()> {
    let report = helpers::load(options)?;

    if json {
        let out = serde_json::to_string_pretty(&toolchain_json(&report.config, reveal))
            .context("failed to serialize configuration")?;
        println!("{out}");
        return Ok(());
    }

    print_summary(&report.config, reveal, options);
    Ok(())
}

/// Toolchain JSON, with secrets masked unless `reveal`.
fn toolchain_json(config: &ToolchainConfig, reveal: bool) -> serde_json::Value {
    if reveal {
        config.to_toolchain_json()
    } else {
        masked(config).to_toolchain_json()
    }
}

fn print_summary(resolved: &ToolchainConfig, reveal: bool, options: &LoadOptions) {
    let shown = if reveal {
        resolved.clone()
    } else {
        masked(resolved)
    };
    let config = &shown;

    print_header("Deploykit Configuration");

    let source = options
        .config_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(built-in defaults)".dimmed().to_string());
    println!("  {:<18} {}", "Config:".bold(), source);

    // Compiler
    let settings = &config.solidity.settings;
    println!("  {:<18} {}", "Compiler:".bold(), config.solidity.version);
    println!(
        "  {:<18} {} | metadata hash: {}",
        "EVM target:".bold(),
        settings.evm_version,
        format!("{:?}", settings.metadata.bytecode_hash).to_lowercase().dimmed(),
    );
    println!(
        "  {:<18} {} | runs: {}",
        "Optimizer:".bold(),
        if settings.optimizer.enabled {
            "enabled".green().to_string()
        } else {
            "disabled".yellow().to_string()
        },
        settings.optimizer.runs,
    );

    // Size report
    let sizer = &config.contract_sizer;
    println!(
        "  {:<18} {}",
        "Size report:".bold(),
        format!(
            "alphaSort: {} | runOnCompile: {} | disambiguatePaths: {}",
            sizer.alpha_sort, sizer.run_on_compile, sizer.disambiguate_paths
        )
        .dimmed(),
    );

    // Verification keys
    println!();
    println!("  {}", "Verification keys:".bold());
    for (network_id, key) in &config.etherscan.api_key {
        let env_var = config
            .etherscan
            .api_key_env
            .get(network_id)
            .map(String::as_str)
            .unwrap_or("-");
        println!(
            "    {:<22} {:<16} {}",
            network_id,
            env_var.dimmed(),
            status_mark(resolved.etherscan.is_configured(network_id), key)
        );
    }

    println!();
    println!(
        "  {} networks declared, {} enabled (see `deploykit networks`)",
        config.networks.len(),
        config.enabled_networks().count()
    );
    println!();
}
