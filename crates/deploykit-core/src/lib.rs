//! Deploykit core — the configuration record for a contract compile/deploy
//! toolchain.
//!
//! This crate contains:
//! - **config**: schema, built-in defaults, layered loader, validation
//! - **env**: environment sources the loader reads from
//! - **error**: the `ConfigError` taxonomy
//! - **utils**: secret masking and small helpers

pub mod config;
pub mod env;
pub mod error;
pub mod utils;

pub use config::{load, load_with, LoadOptions, ToolchainConfig};
pub use error::ConfigError;
