//! Structural validation and advisory warnings.
//!
//! Errors abort loading. Warnings are logged and returned so the CLI can
//! show them, but never stop the record from being used.

use std::collections::BTreeMap;
use std::fmt;

use tracing::warn;
use url::Url;

use super::schema::ToolchainConfig;
use crate::error::{ConfigError, Result};
use crate::utils::env_key_segment;

/// Something suspicious that does not make the record unusable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    /// Two enabled networks claim the same chain id.
    DuplicateChainId { chain_id: u64, networks: Vec<String> },
    /// Verification against this explorer will be rejected.
    EmptyApiKey { network_id: String, env_var: Option<String> },
    /// An enabled network has a key binding but no key was supplied.
    NoSigningKey { network: String, env_var: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::DuplicateChainId { chain_id, networks } => write!(
                f,
                "chain id {chain_id} is shared by networks {}",
                networks.join(", ")
            ),
            Warning::EmptyApiKey {
                network_id,
                env_var: Some(var),
            } => write!(f, "verification key for `{network_id}` is empty ({var} unset or empty)"),
            Warning::EmptyApiKey {
                network_id,
                env_var: None,
            } => write!(f, "verification key for `{network_id}` is empty"),
            Warning::NoSigningKey { network, env_var } => write!(
                f,
                "network `{network}` has no signing key ({env_var} unset or empty); signed operations will fail"
            ),
        }
    }
}

/// Validate a fully resolved record.
pub fn validate(config: &ToolchainConfig) -> Result<Vec<Warning>> {
    check_compiler_version(&config.solidity.version)?;

    if config.solidity.settings.optimizer.runs == 0 {
        return Err(ConfigError::structural(
            "solidity.settings.optimizer.runs",
            "0",
            "must be a positive integer",
        ));
    }

    for (name, net) in &config.networks {
        if name.trim().is_empty() {
            return Err(ConfigError::structural(
                "networks",
                name.as_str(),
                "network name must not be empty",
            ));
        }
        if net.chain_id == 0 {
            return Err(ConfigError::structural(
                format!("networks.{name}.chainId"),
                "0",
                "must be a positive integer",
            ));
        }
        check_endpoint(name, &net.url)?;
    }

    check_override_keys(config)?;

    let warnings = collect_warnings(config);
    for w in &warnings {
        warn!("{w}");
    }
    Ok(warnings)
}

/// `MAJOR.MINOR.PATCH`, digits only.
fn check_compiler_version(version: &str) -> Result<()> {
    let parts: Vec<&str> = version.split('.').collect();
    let well_formed = parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()));

    if well_formed {
        Ok(())
    } else {
        Err(ConfigError::structural(
            "solidity.version",
            version,
            "expected MAJOR.MINOR.PATCH",
        ))
    }
}

fn check_endpoint(network: &str, raw: &str) -> Result<()> {
    let field = format!("networks.{network}.url");
    let url = Url::parse(raw).map_err(|e| ConfigError::structural(&field, raw, e.to_string()))?;

    match url.scheme() {
        "http" | "https" | "ws" | "wss" => {}
        other => {
            return Err(ConfigError::structural(
                field,
                raw,
                format!("unsupported scheme `{other}`"),
            ))
        }
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::structural(field, raw, "missing host"));
    }
    Ok(())
}

/// Each network must own its `DEPLOYKIT_NETWORKS__<NAME>__*` keys.
fn check_override_keys(config: &ToolchainConfig) -> Result<()> {
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();
    for name in config.networks.keys() {
        let segment = env_key_segment(name);
        if let Some(other) = seen.insert(segment.clone(), name) {
            return Err(ConfigError::structural(
                "networks",
                name.as_str(),
                format!("shares override key segment `{segment}` with network `{other}`"),
            ));
        }
    }
    Ok(())
}

fn collect_warnings(config: &ToolchainConfig) -> Vec<Warning> {
    let mut warnings = Vec::new();

    let mut by_chain: BTreeMap<u64, Vec<String>> = BTreeMap::new();
    for (name, net) in config.enabled_networks() {
        by_chain.entry(net.chain_id).or_default().push(name.to_string());
    }
    for (chain_id, networks) in by_chain {
        if networks.len() > 1 {
            warnings.push(Warning::DuplicateChainId { chain_id, networks });
        }
    }

    for (network_id, key) in &config.etherscan.api_key {
        if key.is_empty() {
            warnings.push(Warning::EmptyApiKey {
                network_id: network_id.clone(),
                env_var: config.etherscan.api_key_env.get(network_id).cloned(),
            });
        }
    }

    for (name, net) in config.enabled_networks() {
        if let Some(var) = &net.accounts_env {
            if !net.can_sign() {
                warnings.push(Warning::NoSigningKey {
                    network: name.to_string(),
                    env_var: var.clone(),
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::NetworkConfig;

    fn network(url: &str, chain_id: u64) -> NetworkConfig {
        NetworkConfig {
            url: url.to_string(),
            chain_id,
            ..Default::default()
        }
    }

    #[test]
    fn test_builtin_is_valid() {
        let warnings = validate(&ToolchainConfig::default()).unwrap();
        // No secrets set: every api key and every enabled signer is flagged.
        assert!(warnings
            .iter()
            .any(|w| matches!(w, Warning::EmptyApiKey { network_id, .. } if network_id == "goerli")));
        assert!(warnings
            .iter()
            .any(|w| matches!(w, Warning::NoSigningKey { network, .. } if network == "fuji")));
        // Disabled mainnet is not nagged about.
        assert!(!warnings
            .iter()
            .any(|w| matches!(w, Warning::NoSigningKey { network, .. } if network == "bsc")));
    }

    #[test]
    fn test_bad_compiler_version() {
        for bad in ["0.8", "v0.8.19", "0.8.x", "", "0..19"] {
            let mut config = ToolchainConfig::default();
            config.solidity.version = bad.to_string();
            assert!(
                matches!(validate(&config), Err(ConfigError::Structural { .. })),
                "{bad:?} accepted"
            );
        }
    }

    #[test]
    fn test_zero_runs_rejected() {
        let mut config = ToolchainConfig::default();
        config.solidity.settings.optimizer.runs = 0;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("optimizer.runs"));
    }

    #[test]
    fn test_zero_chain_id_rejected() {
        let mut config = ToolchainConfig::default();
        config.networks.insert("local".into(), network("http://127.0.0.1:8545", 0));
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("networks.local.chainId"));
    }

    #[test]
    fn test_bad_urls_rejected() {
        for bad in ["not a url", "ftp://example.com", "file:///tmp/rpc"] {
            let mut config = ToolchainConfig::default();
            config.networks.insert("local".into(), network(bad, 1337));
            assert!(
                matches!(validate(&config), Err(ConfigError::Structural { .. })),
                "{bad:?} accepted"
            );
        }
    }

    #[test]
    fn test_ws_url_accepted() {
        let mut config = ToolchainConfig::default();
        config.networks.insert("local".into(), network("ws://localhost:8546", 1337));
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_duplicate_chain_id_is_warning_only() {
        let mut config = ToolchainConfig::default();
        config
            .networks
            .insert("fuji2".into(), network("https://fuji.example.com/rpc", 43113));

        let warnings = validate(&config).unwrap();
        assert!(warnings.contains(&Warning::DuplicateChainId {
            chain_id: 43113,
            networks: vec!["fuji".into(), "fuji2".into()],
        }));
    }

    #[test]
    fn test_duplicate_with_disabled_network_ignored() {
        let mut config = ToolchainConfig::default();
        let mut shadow = network("https://bsc.example.com", 97);
        shadow.enabled = false;
        config.networks.insert("bscShadow".into(), shadow);

        let warnings = validate(&config).unwrap();
        assert!(!warnings
            .iter()
            .any(|w| matches!(w, Warning::DuplicateChainId { .. })));
    }

    #[test]
    fn test_warning_display() {
        let w = Warning::NoSigningKey {
            network: "goerli".into(),
            env_var: "PRIVATE_KEY".into(),
        };
        assert!(w.to_string().contains("PRIVATE_KEY unset or empty"));

        let w = Warning::EmptyApiKey {
            network_id: "goerli".into(),
            env_var: Some("ETH_API_KEY".into()),
        };
        assert!(w.to_string().contains("ETH_API_KEY unset or empty"));
    }

    #[test]
    fn test_case_collision_rejected() {
        let mut config = ToolchainConfig::default();
        config
            .networks
            .insert("bsctest".into(), network("https://bsc.example.com", 1097));
        match validate(&config) {
            Err(ConfigError::Structural { reason, .. }) => assert!(reason.contains("BSCTEST")),
            other => panic!("expected Structural error, got {other:?}"),
        }
    }

    #[test]
    fn test_distinct_segments_accepted() {
        let mut config = ToolchainConfig::default();
        config
            .networks
            .insert("bsc-test".into(), network("https://bsc.example.com", 1097));
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_punctuation_collision_rejected() {
        let mut config = ToolchainConfig::default();
        config
            .networks
            .insert("my-net".into(), network("https://a.example.com", 1001));
        config
            .networks
            .insert("my.net".into(), network("https://b.example.com", 1002));
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Structural { .. })
        ));
    }
}
