//! Groth16 proof bytes.

use std::{fmt, io};

use serde_big_array::BigArray;

use crate::serialization::{SerializationError, ZcashDeserialize, ZcashSerialize};

/// The size of an encoded Groth16 proof over BLS12-381: `A`, `C` in G1 and `B` in G2,
/// all compressed.
pub const GROTH16_PROOF_SIZE: usize = 48 + 96 + 48;

/// An encoding of a Groth16 proof, as carried in a JoinSplit description.
///
/// This type does not check that the bytes are a valid proof encoding.
/// Malformed proofs are rejected when they are verified.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Groth16Proof(#[serde(with = "BigArray")] pub [u8; GROTH16_PROOF_SIZE]);

impl fmt::Debug for Groth16Proof {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Groth16Proof")
            .field(&hex::encode(&self.0[..]))
            .finish()
    }
}

impl From<[u8; GROTH16_PROOF_SIZE]> for Groth16Proof {
    fn from(bytes: [u8; GROTH16_PROOF_SIZE]) -> Groth16Proof {
        Self(bytes)
    }
}

impl From<Groth16Proof> for [u8; GROTH16_PROOF_SIZE] {
    fn from(proof: Groth16Proof) -> [u8; GROTH16_PROOF_SIZE] {
        proof.0
    }
}

impl AsRef<[u8]> for Groth16Proof {
    fn as_ref(&self) -> &[u8] {
        &self.0[..]
    }
}

impl ZcashSerialize for Groth16Proof {
    fn zcash_serialize<W: io::Write>(&self, mut writer: W) -> Result<(), io::Error> {
        writer.write_all(&self.0[..])
    }
}

impl ZcashDeserialize for Groth16Proof {
    fn zcash_deserialize<R: io::Read>(mut reader: R) -> Result<Self, SerializationError> {
        let mut bytes = [0; GROTH16_PROOF_SIZE];
        reader.read_exact(&mut bytes[..])?;
        Ok(Self(bytes))
    }
}

#[cfg(any(test, feature = "proptest-impl"))]
use proptest::{arbitrary::Arbitrary, collection::vec, prelude::*};

#[cfg(any(test, feature = "proptest-impl"))]
impl Arbitrary for Groth16Proof {
    type Parameters = ();

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        vec(any::<u8>(), GROTH16_PROOF_SIZE)
            .prop_map(|v| {
                let mut bytes = [0; GROTH16_PROOF_SIZE];
                bytes.copy_from_slice(v.as_slice());
                Self(bytes)
            })
            .boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}
