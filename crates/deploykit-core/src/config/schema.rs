//! Configuration schema — the typed toolchain record.
//!
//! Hierarchy: `ToolchainConfig` → `SolidityConfig`, `EtherscanConfig`,
//! `NetworkConfig` (per network), `ContractSizerConfig`.
//!
//! JSON on disk uses **camelCase** keys, the same keys the external build
//! toolchain reads. Rust uses snake_case; `#[serde(rename_all = "camelCase")]`
//! handles the conversion.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::defaults;
use crate::error::{ConfigError, Result};

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration handed to the compile/deploy toolchain.
///
/// Built once per process by [`load`](super::load) and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolchainConfig {
    pub solidity: SolidityConfig,
    pub etherscan: EtherscanConfig,
    pub networks: BTreeMap<String, NetworkConfig>,
    pub contract_sizer: ContractSizerConfig,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            solidity: SolidityConfig::default(),
            etherscan: EtherscanConfig::default(),
            networks: defaults::builtin_networks(),
            contract_sizer: ContractSizerConfig::default(),
        }
    }
}

impl ToolchainConfig {
    /// Look up a network by name.
    pub fn network(&self, name: &str) -> Option<&NetworkConfig> {
        self.networks.get(name)
    }

    /// Networks with `enabled = true`, in name order.
    pub fn enabled_networks(&self) -> impl Iterator<Item = (&str, &NetworkConfig)> {
        self.networks
            .iter()
            .filter(|(_, n)| n.enabled)
            .map(|(name, n)| (name.as_str(), n))
    }

    /// The signing key to use for `network`.
    ///
    /// This is where a missing secret finally becomes an error: loading
    /// succeeds without keys, asking for a signer does not.
    pub fn signer_for(&self, network: &str) -> Result<&str> {
        let net = self
            .network(network)
            .ok_or_else(|| ConfigError::UnknownNetwork(network.to_string()))?;

        if !net.enabled {
            return Err(ConfigError::NetworkDisabled(network.to_string()));
        }

        match net.accounts.first() {
            Some(key) if !key.is_empty() => Ok(key.as_str()),
            _ => Err(ConfigError::MissingSigningKey {
                network: network.to_string(),
                env_var: net
                    .accounts_env
                    .clone()
                    .unwrap_or_else(|| format!("networks.{network}.accounts")),
            }),
        }
    }

    /// Verification API key for a network identifier, or `""` when unset.
    pub fn verification_key(&self, network_id: &str) -> &str {
        self.etherscan.api_key(network_id)
    }

    /// A copy with every secret emptied (API keys, signing keys).
    ///
    /// Env bindings are kept so the stripped copy can be re-resolved later.
    pub fn without_secrets(&self) -> Self {
        let mut stripped = self.clone();
        for key in stripped.etherscan.api_key.values_mut() {
            key.clear();
        }
        for net in stripped.networks.values_mut() {
            net.accounts.clear();
        }
        stripped
    }

    /// The record in the shape the external toolchain consumes.
    ///
    /// Disabled networks are omitted, as are deploykit-only fields
    /// (`enabled`, `accountsEnv`, `apiKeyEnv`).
    pub fn to_toolchain_json(&self) -> serde_json::Value {
        let networks: serde_json::Map<String, serde_json::Value> = self
            .enabled_networks()
            .map(|(name, n)| {
                (
                    name.to_string(),
                    serde_json::json!({
                        "url": n.url,
                        "chainId": n.chain_id,
                        "accounts": n.accounts,
                    }),
                )
            })
            .collect();

        serde_json::json!({
            "solidity": self.solidity,
            "etherscan": { "apiKey": self.etherscan.api_key },
            "networks": networks,
            "contractSizer": self.contract_sizer,
        })
    }
}

// ─────────────────────────────────────────────
// Compiler
// ─────────────────────────────────────────────

/// Compiler version and settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolidityConfig {
    /// Compiler release, `MAJOR.MINOR.PATCH`.
    pub version: String,
    pub settings: CompilerSettings,
}

impl Default for SolidityConfig {
    fn default() -> Self {
        Self {
            version: defaults::COMPILER_VERSION.to_string(),
            settings: CompilerSettings::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerSettings {
    pub evm_version: EvmVersion,
    pub metadata: MetadataSettings,
    pub optimizer: OptimizerSettings,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            evm_version: defaults::EVM_VERSION,
            metadata: MetadataSettings::default(),
            optimizer: OptimizerSettings::default(),
        }
    }
}

/// Virtual-machine feature set the compiled bytecode must run on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EvmVersion {
    Homestead,
    TangerineWhistle,
    SpuriousDragon,
    Byzantium,
    Constantinople,
    Petersburg,
    Istanbul,
    Berlin,
    London,
    Paris,
    Shanghai,
    Cancun,
}

impl EvmVersion {
    pub const ALL: &'static [EvmVersion] = &[
        EvmVersion::Homestead,
        EvmVersion::TangerineWhistle,
        EvmVersion::SpuriousDragon,
        EvmVersion::Byzantium,
        EvmVersion::Constantinople,
        EvmVersion::Petersburg,
        EvmVersion::Istanbul,
        EvmVersion::Berlin,
        EvmVersion::London,
        EvmVersion::Paris,
        EvmVersion::Shanghai,
        EvmVersion::Cancun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EvmVersion::Homestead => "homestead",
            EvmVersion::TangerineWhistle => "tangerineWhistle",
            EvmVersion::SpuriousDragon => "spuriousDragon",
            EvmVersion::Byzantium => "byzantium",
            EvmVersion::Constantinople => "constantinople",
            EvmVersion::Petersburg => "petersburg",
            EvmVersion::Istanbul => "istanbul",
            EvmVersion::Berlin => "berlin",
            EvmVersion::London => "london",
            EvmVersion::Paris => "paris",
            EvmVersion::Shanghai => "shanghai",
            EvmVersion::Cancun => "cancun",
        }
    }
}

impl fmt::Display for EvmVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvmVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        EvmVersion::ALL
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ConfigError::structural(
                    "solidity.settings.evmVersion",
                    s,
                    "unknown EVM version label",
                )
            })
    }
}

/// Whether and how a metadata hash is appended to the bytecode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BytecodeHash {
    /// No hash; output is reproducible regardless of metadata.
    None,
    Ipfs,
    Bzzr1,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetadataSettings {
    pub bytecode_hash: BytecodeHash,
}

impl Default for MetadataSettings {
    fn default() -> Self {
        Self {
            bytecode_hash: defaults::BYTECODE_HASH,
        }
    }
}

/// Optimizer toggle and expected execution count.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptimizerSettings {
    pub enabled: bool,
    /// Higher values favour cheap execution over cheap deployment. Must be > 0.
    pub runs: u32,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            runs: defaults::OPTIMIZER_RUNS,
        }
    }
}

// ─────────────────────────────────────────────
// Verification
// ─────────────────────────────────────────────

/// Contract verification service credentials.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EtherscanConfig {
    /// Network identifier → API key. Unset keys are `""`, never absent.
    pub api_key: BTreeMap<String, String>,
    /// Network identifier → env var the key is read from.
    pub api_key_env: BTreeMap<String, String>,
}

impl Default for EtherscanConfig {
    fn default() -> Self {
        let api_key_env: BTreeMap<String, String> = defaults::VERIFICATION_BINDINGS
            .iter()
            .map(|b| (b.network_id.to_string(), b.env_var.to_string()))
            .collect();
        let api_key = api_key_env
            .keys()
            .map(|id| (id.clone(), String::new()))
            .collect();
        Self {
            api_key,
            api_key_env,
        }
    }
}

impl EtherscanConfig {
    /// API key for `network_id`, `""` when unset.
    pub fn api_key(&self, network_id: &str) -> &str {
        self.api_key.get(network_id).map(String::as_str).unwrap_or("")
    }

    /// Whether a non-empty key is present for `network_id`.
    pub fn is_configured(&self, network_id: &str) -> bool {
        !self.api_key(network_id).is_empty()
    }
}

// ─────────────────────────────────────────────
// Networks
// ─────────────────────────────────────────────

/// One RPC network the toolchain can deploy to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkConfig {
    /// RPC endpoint.
    pub url: String,
    pub chain_id: u64,
    /// Signing keys, in order. Empty when no key is configured.
    pub accounts: Vec<String>,
    /// Disabled networks stay in the record but are not handed to the toolchain.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Env var the signing key is read from. `None` means never.
    pub accounts_env: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            chain_id: 0,
            accounts: Vec::new(),
            enabled: true,
            accounts_env: None,
        }
    }
}

impl NetworkConfig {
    /// Whether a usable (non-empty) signing key is present.
    pub fn can_sign(&self) -> bool {
        self.accounts.iter().any(|k| !k.is_empty())
    }
}

// ─────────────────────────────────────────────
// Contract size report
// ─────────────────────────────────────────────

/// Settings for the contract-size reporting plugin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContractSizerConfig {
    pub alpha_sort: bool,
    pub run_on_compile: bool,
    pub disambiguate_paths: bool,
}

impl Default for ContractSizerConfig {
    fn default() -> Self {
        Self {
            alpha_sort: true,
            run_on_compile: true,
            disambiguate_paths: false,
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ToolchainConfig::default();
        assert_eq!(config.solidity.version, "0.8.19");
        assert_eq!(config.solidity.settings.evm_version, EvmVersion::Paris);
        assert_eq!(
            config.solidity.settings.metadata.bytecode_hash,
            BytecodeHash::None
        );
        assert!(config.solidity.settings.optimizer.enabled);
        assert_eq!(config.solidity.settings.optimizer.runs, 1_000_000);
        assert!(config.contract_sizer.alpha_sort);
        assert!(config.contract_sizer.run_on_compile);
        assert!(!config.contract_sizer.disambiguate_paths);
    }

    #[test]
    fn test_default_secrets_are_empty_not_absent() {
        let config = ToolchainConfig::default();
        for id in ["avalancheFujiTestnet", "bscTestnet", "goerli", "bsc"] {
            assert_eq!(config.etherscan.api_key.get(id).map(String::as_str), Some(""));
        }
        for net in config.networks.values() {
            assert!(net.accounts.is_empty());
        }
    }

    #[test]
    fn test_config_json_uses_camel_case() {
        let json = serde_json::to_value(ToolchainConfig::default()).unwrap();
        assert_eq!(json["solidity"]["settings"]["evmVersion"], "paris");
        assert_eq!(json["solidity"]["settings"]["metadata"]["bytecodeHash"], "none");
        assert_eq!(json["networks"]["fuji"]["chainId"], 43113);
        assert!(json["contractSizer"].get("alphaSort").is_some());
        assert!(json["contractSizer"].get("alpha_sort").is_none());
        assert!(json["etherscan"].get("apiKey").is_some());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = serde_json::json!({
            "solidity": { "settings": { "optimizer": { "runs": 200 } } }
        });
        let config: ToolchainConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.solidity.settings.optimizer.runs, 200);
        assert!(config.solidity.settings.optimizer.enabled);
        assert_eq!(config.solidity.version, "0.8.19");
        assert_eq!(config.networks.len(), 5);
    }

    #[test]
    fn test_network_json_defaults_enabled() {
        let json = serde_json::json!({
            "networks": { "local": { "url": "http://127.0.0.1:8545", "chainId": 31337 } }
        });
        let config: ToolchainConfig = serde_json::from_value(json).unwrap();
        let local = config.network("local").unwrap();
        assert!(local.enabled);
        assert!(local.accounts.is_empty());
        assert_eq!(local.accounts_env, None);
        // An explicit networks map replaces the built-in one.
        assert!(config.network("fuji").is_none());
    }

    #[test]
    fn test_evm_version_from_str() {
        assert_eq!("paris".parse::<EvmVersion>().unwrap(), EvmVersion::Paris);
        assert_eq!(
            "TangerineWhistle".parse::<EvmVersion>().unwrap(),
            EvmVersion::TangerineWhistle
        );
        assert!(matches!(
            "frontier".parse::<EvmVersion>(),
            Err(ConfigError::Structural { .. })
        ));
    }

    #[test]
    fn test_evm_version_serde_matches_as_str() {
        for v in EvmVersion::ALL {
            let json = serde_json::to_value(v).unwrap();
            assert_eq!(json, v.as_str());
        }
    }

    #[test]
    fn test_unknown_evm_version_in_json_is_rejected() {
        let json = serde_json::json!({
            "solidity": { "settings": { "evmVersion": "frontier" } }
        });
        assert!(serde_json::from_value::<ToolchainConfig>(json).is_err());
    }

    #[test]
    fn test_signer_for_missing_key() {
        let config = ToolchainConfig::default();
        match config.signer_for("fuji") {
            Err(ConfigError::MissingSigningKey { network, env_var }) => {
                assert_eq!(network, "fuji");
                assert_eq!(env_var, "PRIVATE_KEY");
            }
            other => panic!("expected MissingSigningKey, got {other:?}"),
        }
    }

    #[test]
    fn test_signer_for_disabled_and_unknown() {
        let config = ToolchainConfig::default();
        assert!(matches!(
            config.signer_for("bsc"),
            Err(ConfigError::NetworkDisabled(_))
        ));
        assert!(matches!(
            config.signer_for("mainnet"),
            Err(ConfigError::UnknownNetwork(_))
        ));
    }

    #[test]
    fn test_signer_for_empty_key_counts_as_missing() {
        let mut config = ToolchainConfig::default();
        config.networks.get_mut("goerli").unwrap().accounts = vec![String::new()];
        assert!(matches!(
            config.signer_for("goerli"),
            Err(ConfigError::MissingSigningKey { .. })
        ));
        assert!(!config.network("goerli").unwrap().can_sign());
    }

    #[test]
    fn test_signer_for_present_key() {
        let mut config = ToolchainConfig::default();
        config.networks.get_mut("tomoTest").unwrap().accounts = vec!["k1".into(), "k2".into()];
        assert_eq!(config.signer_for("tomoTest").unwrap(), "k1");
    }

    #[test]
    fn test_without_secrets() {
        let mut config = ToolchainConfig::default();
        config.etherscan.api_key.insert("goerli".into(), "eth-key".into());
        config.networks.get_mut("fuji").unwrap().accounts = vec!["abc".into()];

        let stripped = config.without_secrets();
        assert_eq!(stripped.verification_key("goerli"), "");
        assert!(stripped.network("fuji").unwrap().accounts.is_empty());
        assert_eq!(
            stripped.network("fuji").unwrap().accounts_env.as_deref(),
            Some("PRIVATE_KEY")
        );
        assert_eq!(stripped.etherscan.api_key_env.get("goerli").unwrap(), "ETH_API_KEY");
    }

    #[test]
    fn test_toolchain_json_shape() {
        let json = ToolchainConfig::default().to_toolchain_json();
        assert!(json["networks"].get("bsc").is_none());
        assert_eq!(json["networks"]["bscTest"]["chainId"], 97);
        assert!(json["networks"]["fuji"].get("enabled").is_none());
        assert!(json["networks"]["fuji"].get("accountsEnv").is_none());
        assert!(json["etherscan"].get("apiKeyEnv").is_none());
        assert_eq!(json["etherscan"]["apiKey"]["bsc"], "");
        assert_eq!(json["solidity"]["settings"]["optimizer"]["runs"], 1_000_000);
        assert_eq!(json["contractSizer"]["runOnCompile"], true);
    }

    #[test]
    fn test_verification_key_unknown_is_empty() {
        let config = ToolchainConfig::default();
        assert_eq!(config.verification_key("polygon"), "");
        assert!(!config.etherscan.is_configured("goerli"));
    }
}
