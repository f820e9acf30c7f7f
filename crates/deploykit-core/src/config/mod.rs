//! Configuration system — schema, built-in defaults, loading, and validation.
//!
//! # Usage
//! ```no_run
//! use deploykit_core::config;
//! use deploykit_core::env::ProcessEnv;
//!
//! let cfg = config::load(&ProcessEnv).expect("invalid configuration");
//! println!("Compiler: {}", cfg.solidity.version);
//! ```

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validate;

// Re-export key types
pub use loader::{load, load_with, save, LoadOptions, LoadReport};
pub use schema::{
    BytecodeHash, ContractSizerConfig, EtherscanConfig, EvmVersion, NetworkConfig,
    OptimizerSettings, SolidityConfig, ToolchainConfig,
};
pub use validate::{validate, Warning};
