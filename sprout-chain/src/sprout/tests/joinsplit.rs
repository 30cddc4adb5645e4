//! Tests for JoinSplit descriptions and h_sig.

use proptest::prelude::*;

use crate::{
    primitives::ed25519,
    serialization::{ZcashDeserializeInto, ZcashSerialize},
    sprout::{
        joinsplit::{HSig, JoinSplit, RandomSeed, GROTH16_JOINSPLIT_SIZE},
        note::Nullifier,
        output_rho,
    },
};

/// Test vectors from `zcashd`'s `test_joinsplit.cpp`:
/// random seed, first nullifier, second nullifier, public key, h_sig.
///
/// The vectors are byte-reversed, because `zcashd` loads them with `uint256S()`.
const H_SIG_VECTORS: [[&str; 5]; 4] = [
    [
        "6161616161616161616161616161616161616161616161616161616161616161",
        "6262626262626262626262626262626262626262626262626262626262626262",
        "6363636363636363636363636363636363636363636363636363636363636363",
        "6464646464646464646464646464646464646464646464646464646464646464",
        "a8cba69f1fa329c055756b4af900f8a00b61e44f4cb8a1824ceb58b90a5b8113",
    ],
    [
        "0000000000000000000000000000000000000000000000000000000000000000",
        "0000000000000000000000000000000000000000000000000000000000000000",
        "0000000000000000000000000000000000000000000000000000000000000000",
        "0000000000000000000000000000000000000000000000000000000000000000",
        "697322276b5dd93b12fb1fcbd2144b2960f24c73aac6c6a0811447be1e7f1e19",
    ],
    [
        "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        "4961048919f0ca79d49c9378c36a91a8767060001f4212fe6f7d426f3ccf9f32",
    ],
    [
        "1f1e1d1c1b1a191817161514131211100f0e0d0c0b0a09080706050403020100",
        "1f1e1d1c1b1a191817161514131211100f0e0d0c0b0a09080706050403020100",
        "1f1e1d1c1b1a191817161514131211100f0e0d0c0b0a09080706050403020100",
        "1f1e1d1c1b1a191817161514131211100f0e0d0c0b0a09080706050403020100",
        "b61110ec162693bc3d9ca7fb0eec3afd2e278e2f41394b3ff11d7cb761ad4b27",
    ],
];

fn reversed(hex_str: &str) -> [u8; 32] {
    let mut bytes = <[u8; 32]>::try_from(hex::decode(hex_str).expect("valid hex"))
        .expect("32 byte vector");
    bytes.reverse();
    bytes
}

#[test]
fn h_sig_works() {
    let _init_guard = sprout_test::init();

    for t in H_SIG_VECTORS {
        let random_seed = RandomSeed::from(reversed(t[0]));
        let nullifiers = [Nullifier::from(reversed(t[1])), Nullifier::from(reversed(t[2]))];
        let pubkey = ed25519::VerificationKeyBytes::from(reversed(t[3]));

        let mut h_sig: [u8; 32] = HSig::new(&random_seed, &nullifiers, &pubkey).into();
        h_sig.reverse();

        assert_eq!(hex::encode(h_sig), t[4]);
    }
}

#[test]
fn h_sig_is_order_sensitive() {
    let _init_guard = sprout_test::init();

    let random_seed = RandomSeed::from([1; 32]);
    let pubkey = ed25519::VerificationKeyBytes::from([2; 32]);
    let nf1 = Nullifier::from([3; 32]);
    let nf2 = Nullifier::from([4; 32]);

    assert_ne!(
        HSig::new(&random_seed, &[nf1, nf2], &pubkey),
        HSig::new(&random_seed, &[nf2, nf1], &pubkey),
    );
}

#[test]
fn output_rho_is_index_separated() {
    let _init_guard = sprout_test::init();

    let phi = [5; 32];
    let h_sig = HSig::from([6; 32]);

    assert_ne!(output_rho(&phi, 0, &h_sig), output_rho(&phi, 1, &h_sig));
    assert_ne!(
        output_rho(&phi, 0, &h_sig),
        output_rho(&phi, 0, &HSig::from([7; 32]))
    );
}

proptest! {
    #[test]
    fn joinsplit_serialization(joinsplit in any::<JoinSplit>()) {
        let _init_guard = sprout_test::init();

        let bytes = joinsplit.zcash_serialize_to_vec()?;
        prop_assert_eq!(bytes.len(), GROTH16_JOINSPLIT_SIZE);

        let parsed: JoinSplit = bytes.as_slice().zcash_deserialize_into()?;
        prop_assert_eq!(parsed, joinsplit);
    }

    #[test]
    fn value_balance_is_vpub_new_minus_vpub_old(joinsplit in any::<JoinSplit>()) {
        let _init_guard = sprout_test::init();

        let expected = i128::from(joinsplit.vpub_new.zatoshis()) - i128::from(joinsplit.vpub_old.zatoshis());
        prop_assert_eq!(i128::from(joinsplit.value_balance()), expected);
    }
}
