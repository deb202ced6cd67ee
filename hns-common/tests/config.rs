use figment::Jail;
use std::path::PathBuf;

use hns_common::{
    load_config, ChainParams, ConfigError, Network, MAINNET_PARAMS, REGTEST_DEFAULT_PARAMS,
    TESTNET_PARAMS,
};

#[test]
// A missing file falls back to mainnet defaults.
fn test_missing_file_uses_defaults() {
    Jail::expect_with(|jail| {
        let path = jail.directory().join("does_not_exist.toml");
        let config = load_config(&path).expect("defaults to load");

        assert_eq!(config.network, Network::Mainnet);
        assert_eq!(config.params_override, None);
        assert_eq!(config.chain_params(), MAINNET_PARAMS);
        Ok(())
    });
}

#[test]
fn test_network_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file("name_state.toml", r#"network = "testnet""#)?;
        let config = load_config(&PathBuf::from("name_state.toml")).unwrap();

        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.chain_params(), TESTNET_PARAMS);
        Ok(())
    });
}

#[test]
fn test_regtest_with_params_override() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "name_state.toml",
            r#"
            network = "regtest"

            [params_override]
            bidding_period = 2
            reveal_period = 3
            renewal_window = 50
            "#,
        )?;
        let config = load_config(&PathBuf::from("name_state.toml")).unwrap();

        assert_eq!(config.network, Network::Regtest(REGTEST_DEFAULT_PARAMS));
        let params = config.chain_params();
        assert_eq!(params.bidding_period, 2);
        assert_eq!(params.total_period(), 5);
        assert_eq!(params.renewal_window, 50);
        Ok(())
    });
}

#[test]
// Environment variables override values from the TOML file.
fn test_env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file("name_state.toml", r#"network = "testnet""#)?;
        jail.set_env("HNS_NETWORK", "regtest");

        let config = load_config(&PathBuf::from("name_state.toml")).unwrap();
        assert_eq!(config.network, Network::Regtest(REGTEST_DEFAULT_PARAMS));
        assert_eq!(config.chain_params().total_period(), 15);
        Ok(())
    });
}

#[test]
fn test_invalid_params_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "name_state.toml",
            r#"
            [params_override]
            bidding_period = 0
            reveal_period = 3
            renewal_window = 50
            "#,
        )?;
        let result = load_config(&PathBuf::from("name_state.toml"));
        assert!(matches!(result, Err(ConfigError::InvalidParams(_))));
        Ok(())
    });
}

#[test]
fn test_unknown_network_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file("name_state.toml", r#"network = "simnet""#)?;
        let result = load_config(&PathBuf::from("name_state.toml"));
        assert!(matches!(result, Err(ConfigError::Figment(_))));
        Ok(())
    });
}

#[test]
fn test_override_takes_precedence_over_network() {
    let params = ChainParams {
        bidding_period: 10,
        reveal_period: 20,
        renewal_window: 1000,
    };
    let config = hns_common::NameStateConfig {
        network: Network::Mainnet,
        params_override: Some(params),
    };
    assert_eq!(config.chain_params(), params);
    assert!(config.check_config().is_ok());
}
