//! Fixed network constant tests.

use std::str::FromStr;

use proptest::prelude::*;

use super::*;

#[test]
fn magic_values_are_distinct() {
    let _init_guard = sprout_test::init();

    assert_ne!(Network::Mainnet.magic_value(), Network::Testnet.magic_value());
    assert_ne!(Network::Mainnet.magic_value(), Network::Regtest.magic_value());
    assert_ne!(Network::Testnet.magic_value(), Network::Regtest.magic_value());
}

#[test]
fn regtest_shares_testnet_key_prefixes() {
    let _init_guard = sprout_test::init();

    let testnet = Network::Testnet.parameters();
    let regtest = Network::Regtest.parameters();

    assert_eq!(testnet.sprout_address_prefix, regtest.sprout_address_prefix);
    assert_eq!(
        testnet.sprout_viewing_key_prefix,
        regtest.sprout_viewing_key_prefix
    );
    assert_eq!(
        testnet.sprout_spending_key_prefix,
        regtest.sprout_spending_key_prefix
    );
    assert_eq!(regtest.sprout_value_pool_checkpoint, None);
}

#[test]
fn mainnet_checkpoints_are_ordered_hashes() {
    let _init_guard = sprout_test::init();

    let params = Network::Mainnet.parameters();

    assert_eq!(params.checkpoints.first().map(|c| c.1), params.genesis_hash);
    assert!(params.checkpoints.windows(2).all(|w| w[0].0 < w[1].0));

    for (_, hash) in params.checkpoints {
        let bytes = hex::decode(hash).expect("checkpoint hashes are hex");
        assert_eq!(bytes.len(), 32);
    }
}

#[test]
fn checkpoint_lookup() {
    let _init_guard = sprout_test::init();

    assert_eq!(Network::Mainnet.checkpoint_at_or_below(0).map(|c| c.0), Some(0));
    assert_eq!(
        Network::Mainnet.checkpoint_at_or_below(9_999).map(|c| c.0),
        Some(6000)
    );
    assert_eq!(
        Network::Mainnet.checkpoint_at_or_below(u32::MAX).map(|c| c.0),
        Some(263_300)
    );
    assert_eq!(Network::Testnet.checkpoint_at_or_below(u32::MAX), None);
}

proptest! {
    #[test]
    fn network_name_round_trip(network in any::<Network>()) {
        let _init_guard = sprout_test::init();

        prop_assert_eq!(Network::from_str(&network.to_string())?, network);
        prop_assert_eq!(Network::from_str(&network.bip70_network_name())?, network);
    }
}
