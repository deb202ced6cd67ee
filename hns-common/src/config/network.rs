//! Network type and chain parameters for name-state configuration.

use serde::{Deserialize, Serialize};

/// Mainnet auction periods: 5 days of bidding, 10 days of reveal, renew every 2 years.
pub const MAINNET_PARAMS: ChainParams = ChainParams {
    bidding_period: 720,
    reveal_period: 1440,
    renewal_window: 105_120,
};

/// Testnet auction periods.
pub const TESTNET_PARAMS: ChainParams = ChainParams {
    bidding_period: 144,
    reveal_period: 288,
    renewal_window: 10_080,
};

/// Short periods used for local testing.
pub const REGTEST_DEFAULT_PARAMS: ChainParams = ChainParams {
    bidding_period: 5,
    reveal_period: 10,
    renewal_window: 5_000,
};

/// Network type for name-state configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "NetworkDeserialize", into = "NetworkDeserialize")]
pub enum Network {
    /// Mainnet network
    Mainnet,
    /// Testnet network
    Testnet,
    /// Regtest network (for local testing)
    Regtest(ChainParams),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum NetworkDeserialize {
    Mainnet,
    Testnet,
    // Custom regtest periods are configured through `params_override`,
    // a bare "regtest" always maps to the default periods.
    Regtest,
}

impl From<NetworkDeserialize> for Network {
    fn from(value: NetworkDeserialize) -> Self {
        match value {
            NetworkDeserialize::Mainnet => Network::Mainnet,
            NetworkDeserialize::Testnet => Network::Testnet,
            NetworkDeserialize::Regtest => Network::Regtest(REGTEST_DEFAULT_PARAMS),
        }
    }
}

impl From<Network> for NetworkDeserialize {
    fn from(value: Network) -> Self {
        match value {
            Network::Mainnet => NetworkDeserialize::Mainnet,
            Network::Testnet => NetworkDeserialize::Testnet,
            Network::Regtest(_) => NetworkDeserialize::Regtest,
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        Network::Mainnet
    }
}

impl Network {
    /// Chain parameters for this network.
    pub fn params(&self) -> ChainParams {
        match self {
            Network::Mainnet => MAINNET_PARAMS,
            Network::Testnet => TESTNET_PARAMS,
            Network::Regtest(params) => *params,
        }
    }

    /// Lowercase network name, as used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Regtest(_) => "regtest",
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Height deltas that drive the auction phase machine.
///
/// The total period is derived as `bidding_period + reveal_period`, so it can
/// never be shorter than the bidding period.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Copy)]
#[serde(deny_unknown_fields)]
pub struct ChainParams {
    /// Number of blocks, from the start of an auction cycle, during which bids are accepted.
    pub bidding_period: u32,
    /// Number of blocks after bidding during which bids are revealed.
    pub reveal_period: u32,
    /// Maximum number of blocks a closed name may go without renewal.
    pub renewal_window: u32,
}

impl ChainParams {
    /// Bidding plus reveal, in blocks.
    ///
    /// Saturates rather than wrapping; [`ChainParams::validate`] rejects
    /// parameters where that would matter.
    pub fn total_period(&self) -> u32 {
        self.bidding_period.saturating_add(self.reveal_period)
    }

    /// Checks the parameters are usable by the phase machine.
    pub fn validate(&self) -> Result<(), String> {
        if self.bidding_period == 0 {
            return Err("bidding_period must be non-zero".to_string());
        }
        if self.bidding_period.checked_add(self.reveal_period).is_none() {
            return Err(format!(
                "bidding_period ({}) + reveal_period ({}) overflows a u32 height",
                self.bidding_period, self.reveal_period
            ));
        }
        if self.renewal_window == 0 {
            return Err("renewal_window must be non-zero".to_string());
        }
        Ok(())
    }
}

impl Default for ChainParams {
    fn default() -> Self {
        MAINNET_PARAMS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for network in [
            Network::Mainnet,
            Network::Testnet,
            Network::Regtest(REGTEST_DEFAULT_PARAMS),
        ] {
            assert!(network.params().validate().is_ok(), "{network}");
            assert!(network.params().total_period() >= network.params().bidding_period);
        }
    }

    #[test]
    fn regtest_total_period() {
        assert_eq!(REGTEST_DEFAULT_PARAMS.bidding_period, 5);
        assert_eq!(REGTEST_DEFAULT_PARAMS.total_period(), 15);
    }

    #[test]
    fn rejects_overflowing_periods() {
        let params = ChainParams {
            bidding_period: u32::MAX,
            reveal_period: 1,
            renewal_window: 10,
        };
        assert!(params.validate().is_err());
        assert_eq!(params.total_period(), u32::MAX);
    }

    #[test]
    fn rejects_zero_bidding_period() {
        let params = ChainParams {
            bidding_period: 0,
            ..MAINNET_PARAMS
        };
        assert!(params.validate().is_err());
    }
}
