//! Note model tests.

use proptest::prelude::*;
use rand_core::OsRng;

use crate::{amount::Amount, serialization::ZcashDeserializeInto};

use super::{super::keys::SpendingKey, *};

#[test]
fn commitment_vector() -> color_eyre::Result<()> {
    let _init_guard = sprout_test::init();

    let note = Note {
        paying_key: PayingKey([0x01; 32]),
        value: Amount::try_from(1_000_000)?,
        rho: NullifierSeed::from([0x02; 32]),
        rcm: CommitmentRandomness::from([0x03; 32]),
    };

    assert_eq!(hex::encode(<[u8; 32]>::from(note.commitment())), COMMITMENT);

    Ok(())
}

#[test]
fn nullifier_vector() {
    let _init_guard = sprout_test::init();

    let spending_key = SpendingKey::from([0x04; 32]);
    let nullifier = Nullifier::from((&spending_key, NullifierSeed::from([0x05; 32])));

    assert_eq!(hex::encode(<[u8; 32]>::from(nullifier)), NULLIFIER);
}

#[test]
fn empty_memo() {
    let _init_guard = sprout_test::init();

    let memo = Memo::default();

    assert!(memo.is_empty());
    assert_eq!(memo.as_bytes()[0], 0xF6);
    assert!(memo.as_bytes()[1..].iter().all(|b| *b == 0));

    assert!(Memo::try_from(&[0u8; MEMO_SIZE + 1][..]).is_err());
    assert!(!Memo::try_from(&b"hello"[..]).expect("short memo").is_empty());
}

#[test]
fn plaintext_rejects_unknown_lead_byte() {
    let _init_guard = sprout_test::init();

    let note = Note::dummy(&mut OsRng, SpendingKey::new(&mut OsRng).paying_key());
    let mut bytes = NotePlaintext::new(&note, Memo::default()).to_bytes();
    bytes[0] = 0x01;

    assert!(bytes[..].zcash_deserialize_into::<NotePlaintext>().is_err());
}

proptest! {
    /// The nullifier is a pure function of the key and rho,
    /// and changes when either does.
    #[test]
    fn nullifier_is_deterministic(
        spending_key in any::<SpendingKey>(),
        other_key in any::<SpendingKey>(),
        note in any::<Note>(),
        other_rho in any::<NullifierSeed>(),
    ) {
        let _init_guard = sprout_test::init();

        prop_assert_eq!(note.nullifier(&spending_key), note.nullifier(&spending_key));

        if other_key != spending_key {
            prop_assert_ne!(note.nullifier(&spending_key), note.nullifier(&other_key));
        }

        if other_rho != note.rho {
            let other_note = Note { rho: other_rho, ..note };
            prop_assert_ne!(note.nullifier(&spending_key), other_note.nullifier(&spending_key));
        }
    }

    #[test]
    fn plaintext_layout(note in any::<Note>(), memo in any::<Memo>()) {
        let _init_guard = sprout_test::init();

        let plaintext = NotePlaintext::new(&note, memo);
        let bytes = plaintext.to_bytes();

        prop_assert_eq!(bytes[0], 0x00);
        prop_assert_eq!(&bytes[1..9], &note.value.to_bytes()[..]);
        prop_assert_eq!(&bytes[9..41], note.rho.as_ref());
        prop_assert_eq!(&bytes[41..73], note.rcm.as_ref());

        let parsed: NotePlaintext = bytes[..].zcash_deserialize_into()?;
        prop_assert_eq!(parsed.note(note.paying_key), note);
    }
}

/// SHA-256(0xB0 || [0x01; 32] || 1_000_000 LE || [0x02; 32] || [0x03; 32])
const COMMITMENT: &str =
    "25d595d9c054883cf4c68ebb21fbee2d34a0d86e4b3ca8e0e47f5f64bbf2d86c";

/// PRF^nf([0x04; 32], [0x05; 32])
const NULLIFIER: &str =
    "db917d1a1c5f15ccedc02caea84760cd32bcc55be09271a575ef298be8d0e716";
