use proptest::{array, prelude::*};

use crate::{amount::Amount, primitives::Groth16Proof};

use super::{commitment, joinsplit, note, tree, JoinSplit};

impl Arbitrary for JoinSplit {
    type Parameters = ();

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        (
            any::<Amount>(),
            any::<Amount>(),
            any::<tree::Root>(),
            array::uniform2(any::<note::Nullifier>()),
            array::uniform2(any::<commitment::NoteCommitment>()),
            array::uniform32(any::<u8>()),
            any::<joinsplit::RandomSeed>(),
            array::uniform2(any::<note::Mac>()),
            any::<Groth16Proof>(),
            array::uniform2(any::<note::EncryptedNote>()),
        )
            .prop_map(
                |(
                    vpub_old,
                    vpub_new,
                    anchor,
                    nullifiers,
                    commitments,
                    ephemeral_key_bytes,
                    random_seed,
                    vmacs,
                    zkproof,
                    enc_ciphertexts,
                )| {
                    Self {
                        vpub_old,
                        vpub_new,
                        anchor,
                        nullifiers,
                        commitments,
                        ephemeral_key: x25519_dalek::PublicKey::from(ephemeral_key_bytes),
                        random_seed,
                        vmacs,
                        zkproof,
                        enc_ciphertexts,
                    }
                },
            )
            .boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}
