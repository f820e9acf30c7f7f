//! Error taxonomy for configuration loading and use-time lookups.
//!
//! Missing secrets never produce an error at load time. They only surface
//! through [`ConfigError::MissingSigningKey`] when a caller asks for a signer.

use std::path::PathBuf;

/// Everything that can go wrong while building or consulting a
/// [`ToolchainConfig`](crate::config::ToolchainConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required field could not be parsed or failed validation.
    #[error("invalid configuration for `{field}` (value {value:?}): {reason}")]
    Structural {
        field: String,
        value: String,
        reason: String,
    },

    /// The config file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for the schema.
    #[error("failed to parse config file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A `.env` file exists but could not be parsed.
    #[error("failed to load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    #[error("unknown network `{0}`")]
    UnknownNetwork(String),

    #[error("network `{0}` is disabled")]
    NetworkDisabled(String),

    /// The network has no signing key; set the named variable to enable signing.
    #[error("network `{network}` has no signing key (set {env_var})")]
    MissingSigningKey { network: String, env_var: String },
}

impl ConfigError {
    /// Shorthand for a [`ConfigError::Structural`] error.
    pub fn structural(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::Structural {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
