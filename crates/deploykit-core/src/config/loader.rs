//! Config loader — builds the toolchain record from defaults, an optional
//! JSON file, an optional `.env` file, and the environment.
//!
//! # Loading precedence
//! 1. Built-in defaults (`defaults::builtin()`)
//! 2. JSON file, only when a path is given
//! 3. Secrets from the environment, with `.env` values underneath
//! 4. Structural overrides `DEPLOYKIT_<SECTION>__<FIELD>`
//! 5. Validation
//!
//! Unlike secrets, a malformed file or override aborts the load.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::defaults;
use super::schema::{EvmVersion, ToolchainConfig};
use super::validate::{validate, Warning};
use crate::env::{EnvSource, LayeredEnv, MapEnv};
use crate::error::{ConfigError, Result};
use crate::utils::env_key_segment;

/// Env var that suppresses `.env` loading.
pub const DOTENV_DISABLED_VAR: &str = "DEPLOYKIT_DOTENV_DISABLED";

/// Prefix for structural overrides.
pub const OVERRIDE_PREFIX: &str = "DEPLOYKIT";

/// Where to look besides the environment.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    /// JSON config file. `None` means built-in defaults only.
    pub config_path: Option<PathBuf>,
    /// Explicit `.env` file. `None` means search from the working directory.
    pub dotenv_path: Option<PathBuf>,
    /// Whether to read a `.env` file at all.
    pub use_dotenv: bool,
}

/// A loaded record plus the advisory warnings raised while validating it.
#[derive(Clone, Debug)]
pub struct LoadReport {
    pub config: ToolchainConfig,
    pub warnings: Vec<Warning>,
}

/// Load from built-in defaults and `env` only.
pub fn load<E: EnvSource>(env: &E) -> Result<ToolchainConfig> {
    load_with(&LoadOptions::default(), env).map(|report| report.config)
}

/// Load with an optional config file and `.env` layer.
pub fn load_with<E: EnvSource>(options: &LoadOptions, env: &E) -> Result<LoadReport> {
    let mut config = match &options.config_path {
        Some(path) => read_config_file(path)?,
        None => {
            debug!("No config file given, using built-in defaults");
            defaults::builtin()
        }
    };

    let dotenv = if options.use_dotenv && !dotenv_disabled(env) {
        read_dotenv(options.dotenv_path.as_deref())?
    } else {
        MapEnv::new()
    };
    let env = LayeredEnv::new(env, dotenv);

    resolve_secrets(&mut config, &env);
    apply_overrides(&mut config, &env)?;
    let warnings = validate(&config)?;

    info!(
        networks = config.networks.len(),
        enabled = config.enabled_networks().count(),
        warnings = warnings.len(),
        "Toolchain configuration loaded"
    );

    Ok(LoadReport { config, warnings })
}

/// Save configuration to disk as pretty JSON, with every secret stripped.
pub fn save(config: &ToolchainConfig, path: &Path) -> Result<()> {
    let io_err = |source: std::io::Error| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let json = serde_json::to_string_pretty(&config.without_secrets()).map_err(|source| {
        ConfigError::Json {
            path: path.to_path_buf(),
            source,
        }
    })?;

    std::fs::write(path, json).map_err(io_err)?;
    debug!("Config saved to {}", path.display());
    Ok(())
}

fn read_config_file(path: &Path) -> Result<ToolchainConfig> {
    debug!("Loading config from {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config: ToolchainConfig =
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    // Secrets only ever come from the environment or `.env`.
    let stripped = config.without_secrets();
    if stripped != config {
        warn!(
            "Ignoring secrets in config file {}; supply them via the environment",
            path.display()
        );
    }
    Ok(stripped)
}

fn dotenv_disabled<E: EnvSource>(env: &E) -> bool {
    env.get(DOTENV_DISABLED_VAR)
        .map(|v| !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false"))
        .unwrap_or(false)
}

/// Read a `.env` file into a map. A missing file yields an empty map.
fn read_dotenv(path: Option<&Path>) -> Result<MapEnv> {
    let iter = match path {
        Some(p) => dotenvy::from_path_iter(p),
        None => dotenvy::from_filename_iter(".env"),
    };

    let iter = match iter {
        Ok(iter) => iter,
        Err(e) if e.not_found() => {
            debug!("No .env file found");
            return Ok(MapEnv::new());
        }
        Err(e) => return Err(e.into()),
    };

    let vars = iter.collect::<std::result::Result<MapEnv, _>>()?;
    debug!("Loaded .env file");
    Ok(vars)
}

/// Fill API keys and signing keys from their bound env vars.
///
/// Absent variables leave the existing value, which is always empty since
/// config files are stripped of secrets. An API key set to `""` counts as unset; a signing key
/// set to `""` is still taken, and fails later at `signer_for`.
fn resolve_secrets<E: EnvSource>(config: &mut ToolchainConfig, env: &E) {
    let etherscan = &mut config.etherscan;
    for (network_id, var) in &etherscan.api_key_env {
        let slot = etherscan.api_key.entry(network_id.clone()).or_default();
        match env.get(var) {
            Some(value) if !value.is_empty() => {
                debug!(network_id = %network_id, env_var = %var, "Verification key set from environment");
                *slot = value;
            }
            _ => {}
        }
    }

    for (name, net) in config.networks.iter_mut() {
        let Some(var) = &net.accounts_env else {
            continue;
        };
        if let Some(key) = env.get(var) {
            debug!(network = %name, env_var = %var, "Signing key set from environment");
            net.accounts = vec![key];
        }
    }
}

/// Apply `DEPLOYKIT_*` structural overrides.
///
/// Supported overrides:
/// - `DEPLOYKIT_NETWORKS__<NAME>__URL` → `networks.<name>.url`
/// - `DEPLOYKIT_NETWORKS__<NAME>__CHAIN_ID` → `networks.<name>.chainId`
/// - `DEPLOYKIT_NETWORKS__<NAME>__ENABLED` → `networks.<name>.enabled`
/// - `DEPLOYKIT_SOLIDITY__EVM_VERSION` → `solidity.settings.evmVersion`
fn apply_overrides<E: EnvSource>(config: &mut ToolchainConfig, env: &E) -> Result<()> {
    if let Some(val) = env.get(&format!("{OVERRIDE_PREFIX}_SOLIDITY__EVM_VERSION")) {
        config.solidity.settings.evm_version = val.parse::<EvmVersion>()?;
    }

    for (name, net) in config.networks.iter_mut() {
        let key = |field: &str| {
            format!(
                "{OVERRIDE_PREFIX}_NETWORKS__{}__{field}",
                env_key_segment(name)
            )
        };

        if let Some(val) = env.get(&key("URL")) {
            net.url = val;
        }
        if let Some(val) = env.get(&key("CHAIN_ID")) {
            net.chain_id = val.trim().parse::<u64>().map_err(|e| {
                ConfigError::structural(format!("networks.{name}.chainId"), &val, e.to_string())
            })?;
        }
        if let Some(val) = env.get(&key("ENABLED")) {
            net.enabled = parse_bool(&val).ok_or_else(|| {
                ConfigError::structural(
                    format!("networks.{name}.enabled"),
                    &val,
                    "expected true, false, 1, or 0",
                )
            })?;
        }
    }

    Ok(())
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
