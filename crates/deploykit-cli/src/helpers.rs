//! Shared CLI helpers — path expansion, loading, masking, and headers.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;

use deploykit_core::config::{load_with, LoadOptions, LoadReport, ToolchainConfig};
use deploykit_core::env::ProcessEnv;
use deploykit_core::utils::mask_secret;

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs_next::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// Load the configuration from the process environment.
pub fn load(options: &LoadOptions) -> Result<LoadReport> {
    load_with(options, &ProcessEnv).context("failed to load toolchain configuration")
}

/// A copy with every non-empty secret replaced by its masked form.
///
/// Unset secrets stay `""` so the toolchain JSON never carries a fake value.
pub fn masked(config: &ToolchainConfig) -> ToolchainConfig {
    let mut out = config.clone();
    let secrets = out
        .etherscan
        .api_key
        .values_mut()
        .chain(out.networks.values_mut().flat_map(|n| n.accounts.iter_mut()));
    for secret in secrets.filter(|s| !s.is_empty()) {
        *secret = mask_secret(secret.as_str());
    }
    out
}

/// Print a section header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", format!("⛓ {title}").cyan().bold());
    println!();
}

/// `✓ detail` when set, dimmed `· not configured` otherwise.
pub fn status_mark(configured: bool, detail: &str) -> String {
    if configured {
        format!("{} {}", "✓".green(), detail)
    } else {
        format!("{}", "· not configured".dimmed())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_tilde_home() {
        let result = expand_tilde("~/foo/bar");
        assert!(result.ends_with("foo/bar"));
        assert!(!result.starts_with("~"));
    }

    #[test]
    fn expand_tilde_no_tilde() {
        let result = expand_tilde("/absolute/path");
        assert_eq!(result, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn expand_tilde_relative() {
        let result = expand_tilde("relative/path");
        assert_eq!(result, PathBuf::from("relative/path"));
    }

    #[test]
    fn masked_hides_secrets() {
        let mut config = ToolchainConfig::default();
        config
            .etherscan
            .api_key
            .insert("goerli".into(), "ABCDEFGHIJKLMNOP".into());
        config.networks.get_mut("fuji").unwrap().accounts = vec!["abc123".into()];
        config.networks.get_mut("goerli").unwrap().accounts = vec![String::new()];

        let out = masked(&config);
        assert_eq!(out.networks["goerli"].accounts, vec![String::new()]);
        assert!(!out.etherscan.api_key["goerli"].contains("IJKL"));
        assert_eq!(out.etherscan.api_key["bsc"], "");
        assert_eq!(out.networks["fuji"].accounts, vec!["******".to_string()]);
        // Original untouched
        assert_eq!(config.networks["fuji"].accounts, vec!["abc123".to_string()]);
    }
}
