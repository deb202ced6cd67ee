//! Common types and configurations shared across the name-state crates.
//!
//! This crate provides the chain parameters that drive the auction phase
//! arithmetic, the network presets they come from, and configuration loading.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;

// Re-export commonly used config types at crate root.
pub use config::network::{
    ChainParams, Network, MAINNET_PARAMS, REGTEST_DEFAULT_PARAMS, TESTNET_PARAMS,
};
pub use config::{load_config, NameStateConfig};
pub use error::ConfigError;
