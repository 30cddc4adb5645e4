use proptest::{collection::vec, prelude::*};

use crate::amount::Amount;

use super::{
    super::{commitment::CommitmentRandomness, keys::PayingKey},
    EncryptedNote, Memo, Note, NullifierSeed, MEMO_SIZE, NOTE_CIPHERTEXT_SIZE,
};

impl Arbitrary for EncryptedNote {
    type Parameters = ();

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        vec(any::<u8>(), NOTE_CIPHERTEXT_SIZE)
            .prop_map(|v| {
                let mut bytes = [0; NOTE_CIPHERTEXT_SIZE];
                bytes.copy_from_slice(v.as_slice());
                Self(bytes)
            })
            .boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}

impl Arbitrary for Memo {
    type Parameters = ();

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        vec(any::<u8>(), MEMO_SIZE)
            .prop_map(|v| {
                let mut bytes = [0; MEMO_SIZE];
                bytes.copy_from_slice(v.as_slice());
                Self(bytes)
            })
            .boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}

impl Arbitrary for Note {
    type Parameters = ();

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        (
            any::<PayingKey>(),
            any::<Amount>(),
            any::<NullifierSeed>(),
            any::<CommitmentRandomness>(),
        )
            .prop_map(|(paying_key, value, rho, rcm)| Note {
                paying_key,
                value,
                rho,
                rcm,
            })
            .boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}
