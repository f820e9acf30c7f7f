//! Built-in values: compiler settings, declared networks, and which env var
//! feeds each secret.
//!
//! Every secret is bound to an env var here. No key material lives in source.

use std::collections::BTreeMap;

use super::schema::{BytecodeHash, EvmVersion, NetworkConfig, ToolchainConfig};

pub const COMPILER_VERSION: &str = "0.8.19";
pub const EVM_VERSION: EvmVersion = EvmVersion::Paris;
pub const BYTECODE_HASH: BytecodeHash = BytecodeHash::None;
pub const OPTIMIZER_RUNS: u32 = 1_000_000;

/// Static description of one declared network.
#[derive(Clone, Debug)]
pub struct NetworkSpec {
    /// Key in the `networks` map (e.g. `"bscTest"`).
    pub name: &'static str,
    pub url: &'static str,
    pub chain_id: u64,
    /// Env var holding the signing key.
    pub accounts_env: Option<&'static str>,
    pub enabled: bool,
}

/// Declared networks, in declaration order.
pub static NETWORKS: &[NetworkSpec] = &[
    NetworkSpec {
        name: "fuji",
        url: "https://api.avax-test.network/ext/bc/C/rpc",
        chain_id: 43113,
        accounts_env: Some("PRIVATE_KEY"),
        enabled: true,
    },
    // Mainnet; kept declared but off until explicitly enabled.
    NetworkSpec {
        name: "bsc",
        url: "https://bsc-dataseed1.binance.org/",
        chain_id: 56,
        accounts_env: Some("MAINTAINER_KEY"),
        enabled: false,
    },
    NetworkSpec {
        name: "bscTest",
        url: "https://data-seed-prebsc-1-s2.binance.org:8545/",
        chain_id: 97,
        accounts_env: Some("TBSC_PRIVATE_KEY"),
        enabled: true,
    },
    NetworkSpec {
        name: "goerli",
        url: "https://goerli.infura.io/v3/9aa3d95b3bc440fa88ea12eaa4456161",
        chain_id: 5,
        accounts_env: Some("PRIVATE_KEY"),
        enabled: true,
    },
    NetworkSpec {
        name: "tomoTest",
        url: "https://rpc.testnet.tomochain.com",
        chain_id: 89,
        accounts_env: Some("PRIVATE_KEY"),
        enabled: true,
    },
];

/// Binds a verification-service network identifier to the env var holding its API key.
#[derive(Clone, Debug)]
pub struct VerificationBinding {
    pub network_id: &'static str,
    pub env_var: &'static str,
}

pub static VERIFICATION_BINDINGS: &[VerificationBinding] = &[
    VerificationBinding {
        network_id: "avalancheFujiTestnet",
        env_var: "FUJI_API_KEY",
    },
    VerificationBinding {
        network_id: "bscTestnet",
        env_var: "TBSC_API_KEY",
    },
    VerificationBinding {
        network_id: "goerli",
        env_var: "ETH_API_KEY",
    },
    // Mainnet explorer shares the testnet key.
    VerificationBinding {
        network_id: "bsc",
        env_var: "TBSC_API_KEY",
    },
];

impl From<&NetworkSpec> for NetworkConfig {
    fn from(spec: &NetworkSpec) -> Self {
        NetworkConfig {
            url: spec.url.to_string(),
            chain_id: spec.chain_id,
            accounts: Vec::new(),
            enabled: spec.enabled,
            accounts_env: spec.accounts_env.map(str::to_string),
        }
    }
}

/// The declared networks as a `networks` map, secrets empty.
pub fn builtin_networks() -> BTreeMap<String, NetworkConfig> {
    NETWORKS
        .iter()
        .map(|spec| (spec.name.to_string(), NetworkConfig::from(spec)))
        .collect()
}

/// The full literal record with every secret left empty.
pub fn builtin() -> ToolchainConfig {
    ToolchainConfig::default()
}
