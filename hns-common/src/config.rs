//! Name-state configuration.

pub mod network;

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::ConfigError;
use network::{ChainParams, Network};

/// Config information required to evaluate auction state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NameStateConfig {
    /// Network chain type.
    pub network: Network,
    /// Replaces the network's preset periods when Some.
    pub params_override: Option<ChainParams>,
}

impl NameStateConfig {
    /// The chain parameters in effect.
    pub fn chain_params(&self) -> ChainParams {
        self.params_override
            .unwrap_or_else(|| self.network.params())
    }

    /// Performs checks on config data.
    pub fn check_config(&self) -> Result<(), ConfigError> {
        self.chain_params()
            .validate()
            .map_err(ConfigError::InvalidParams)
    }
}

/// Attempts to load config data from a TOML file at the specified path.
///
/// Sources are layered: Env > TOML > Defaults. Environment variables use the
/// `HNS_` prefix, with `__` separating nested keys
/// (e.g. `HNS_PARAMS_OVERRIDE__BIDDING_PERIOD`). A missing file is treated
/// as empty.
pub fn load_config(file_path: &Path) -> Result<NameStateConfig, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(NameStateConfig::default()))
        .merge(Toml::file(file_path))
        .merge(Env::prefixed("HNS_").split("__"));

    match figment.extract::<NameStateConfig>() {
        Ok(config) => {
            config.check_config()?;
            info!(
                network = %config.network,
                "Loaded name-state config from '{}'",
                file_path.display()
            );
            Ok(config)
        }
        Err(figment_error) => {
            error!(
                "Failed to extract configuration using figment: {}",
                figment_error
            );
            Err(figment_error.into())
        }
    }
}
