//! JoinSplit descriptions and the h_sig hash that binds them to a transaction.

use std::io;

use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::{
    amount::Amount,
    fmt::HexDebug,
    primitives::{ed25519, x25519, Groth16Proof, GROTH16_PROOF_SIZE},
    serialization::{
        ReadZcashExt, SerializationError, WriteZcashExt, ZcashDeserialize, ZcashDeserializeInto,
        ZcashSerialize,
    },
};

use super::{
    commitment::NoteCommitment,
    note::{EncryptedNote, Mac, Nullifier, NOTE_CIPHERTEXT_SIZE},
    tree,
};

/// The number of inputs of a JoinSplit description.
pub const NUM_JS_INPUTS: usize = 2;

/// The number of outputs of a JoinSplit description.
pub const NUM_JS_OUTPUTS: usize = 2;

/// A 256-bit seed that must be chosen independently at
/// random for each [JoinSplit description].
///
/// [JoinSplit description]: https://zips.z.cash/protocol/protocol.pdf#joinsplitencodingandconsensus
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[cfg_attr(
    any(test, feature = "proptest-impl"),
    derive(proptest_derive::Arbitrary)
)]
pub struct RandomSeed(HexDebug<[u8; 32]>);

impl RandomSeed {
    /// Samples a fresh seed.
    pub fn new<T>(csprng: &mut T) -> Self
    where
        T: RngCore + CryptoRng,
    {
        let mut bytes = [0u8; 32];
        csprng.fill_bytes(&mut bytes);

        Self(bytes.into())
    }
}

impl From<[u8; 32]> for RandomSeed {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes.into())
    }
}

impl From<RandomSeed> for [u8; 32] {
    fn from(rt: RandomSeed) -> [u8; 32] {
        *rt.0
    }
}

impl From<&RandomSeed> for [u8; 32] {
    fn from(random_seed: &RandomSeed) -> Self {
        (*random_seed).into()
    }
}

/// The output of the [h_{Sig} hash function][1], binding the proof and the
/// MACs of a JoinSplit to its transaction.
///
/// [1]: https://zips.z.cash/protocol/protocol.pdf#hsigcrh
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[cfg_attr(
    any(test, feature = "proptest-impl"),
    derive(proptest_derive::Arbitrary)
)]
pub struct HSig(HexDebug<[u8; 32]>);

impl HSig {
    /// Compute h_sig = BLAKE2b-256("ZcashComputehSig", randomSeed || nf_1 .. nf_N || joinSplitPubKey).
    ///
    /// The nullifiers are hashed in order, so reordering them changes h_sig.
    pub fn new(
        random_seed: &RandomSeed,
        nullifiers: &[Nullifier],
        joinsplit_pub_key: &ed25519::VerificationKeyBytes,
    ) -> HSig {
        let mut state = blake2b_simd::Params::new()
            .hash_length(32)
            .personal(b"ZcashComputehSig")
            .to_state();

        state.update(&<[u8; 32]>::from(random_seed)[..]);
        for nullifier in nullifiers {
            state.update(&<[u8; 32]>::from(nullifier)[..]);
        }
        state.update(joinsplit_pub_key.as_ref());

        let h_sig: [u8; 32] = state
            .finalize()
            .as_bytes()
            .try_into()
            .expect("32 byte array");

        HSig(h_sig.into())
    }
}

impl From<[u8; 32]> for HSig {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes.into())
    }
}

impl From<HSig> for [u8; 32] {
    fn from(h_sig: HSig) -> [u8; 32] {
        *h_sig.0
    }
}

impl From<&HSig> for [u8; 32] {
    fn from(h_sig: &HSig) -> [u8; 32] {
        *h_sig.0
    }
}

/// A _JoinSplit Description_ with a Groth16 proof, as described in
/// [protocol specification §7.2][ps].
///
/// [ps]: https://zips.z.cash/protocol/protocol.pdf#joinsplitencoding
#[derive(PartialEq, Eq, Clone, Debug, Serialize, Deserialize)]
pub struct JoinSplit {
    /// A value that the JoinSplit transfer removes from the transparent value
    /// pool.
    pub vpub_old: Amount,
    /// A value that the JoinSplit transfer inserts into the transparent value
    /// pool.
    pub vpub_new: Amount,
    /// A root of the Sprout note commitment tree at some block height in the
    /// past, or the root produced by a previous JoinSplit transfer in this
    /// transaction.
    pub anchor: tree::Root,
    /// A nullifier for the input notes.
    pub nullifiers: [Nullifier; NUM_JS_INPUTS],
    /// A note commitment for this output note.
    pub commitments: [NoteCommitment; NUM_JS_OUTPUTS],
    /// An X25519 public key.
    pub ephemeral_key: x25519::PublicKey,
    /// A 256-bit seed that must be chosen independently at random for each
    /// JoinSplit description.
    pub random_seed: RandomSeed,
    /// A message authentication tag.
    pub vmacs: [Mac; NUM_JS_INPUTS],
    /// A Groth16 JoinSplit proof.
    pub zkproof: Groth16Proof,
    /// A ciphertext component for this output note.
    pub enc_ciphertexts: [EncryptedNote; NUM_JS_OUTPUTS],
}

impl JoinSplit {
    /// Return the sprout value balance,
    /// the change in the transparent value pool due to this sprout [`JoinSplit`].
    pub fn value_balance(&self) -> i64 {
        // Both values are at most `MAX_MONEY`, so neither conversion nor
        // the subtraction can overflow.
        i64::try_from(self.vpub_new.zatoshis()).expect("valid amounts fit in i64")
            - i64::try_from(self.vpub_old.zatoshis()).expect("valid amounts fit in i64")
    }

    /// Recomputes the h_sig of this description under `joinsplit_pub_key`.
    pub fn h_sig(&self, joinsplit_pub_key: &ed25519::VerificationKeyBytes) -> HSig {
        HSig::new(&self.random_seed, &self.nullifiers, joinsplit_pub_key)
    }
}

impl ZcashSerialize for JoinSplit {
    fn zcash_serialize<W: io::Write>(&self, mut writer: W) -> Result<(), io::Error> {
        self.vpub_old.zcash_serialize(&mut writer)?;
        self.vpub_new.zcash_serialize(&mut writer)?;
        writer.write_32_bytes(&self.anchor.into())?;
        for nullifier in &self.nullifiers {
            writer.write_32_bytes(&nullifier.into())?;
        }
        for commitment in &self.commitments {
            writer.write_32_bytes(&commitment.into())?;
        }
        writer.write_32_bytes(self.ephemeral_key.as_bytes())?;
        writer.write_32_bytes(&(&self.random_seed).into())?;
        for mac in &self.vmacs {
            mac.zcash_serialize(&mut writer)?;
        }
        self.zkproof.zcash_serialize(&mut writer)?;
        for ciphertext in &self.enc_ciphertexts {
            ciphertext.zcash_serialize(&mut writer)?;
        }

        Ok(())
    }
}

impl ZcashDeserialize for JoinSplit {
    fn zcash_deserialize<R: io::Read>(mut reader: R) -> Result<Self, SerializationError> {
        Ok(JoinSplit {
            vpub_old: (&mut reader).zcash_deserialize_into()?,
            vpub_new: (&mut reader).zcash_deserialize_into()?,
            anchor: tree::Root::from(reader.read_32_bytes()?),
            nullifiers: [
                reader.read_32_bytes()?.into(),
                reader.read_32_bytes()?.into(),
            ],
            commitments: [
                NoteCommitment::from(reader.read_32_bytes()?),
                NoteCommitment::from(reader.read_32_bytes()?),
            ],
            ephemeral_key: x25519::PublicKey::from(reader.read_32_bytes()?),
            random_seed: RandomSeed::from(reader.read_32_bytes()?),
            vmacs: [
                Mac::zcash_deserialize(&mut reader)?,
                Mac::zcash_deserialize(&mut reader)?,
            ],
            zkproof: Groth16Proof::zcash_deserialize(&mut reader)?,
            enc_ciphertexts: [
                EncryptedNote::zcash_deserialize(&mut reader)?,
                EncryptedNote::zcash_deserialize(&mut reader)?,
            ],
        })
    }
}

/// The size of a JoinSplit description, excluding the proof.
///
/// An 8 byte vpub_old, an 8 byte vpub_new, a 32 byte anchor, two 32 byte
/// nullifiers, two 32 byte commitments, a 32 byte ephemeral key, a 32 byte
/// random seed, two 32 byte vmacs, and two encrypted notes.
const JOINSPLIT_SIZE_WITHOUT_ZKPROOF: usize =
    8 + 8 + 32 + (32 * 2) + (32 * 2) + 32 + 32 + (32 * 2) + (NOTE_CIPHERTEXT_SIZE * 2);

/// The size of a JoinSplit description with a Groth16 proof.
pub const GROTH16_JOINSPLIT_SIZE: usize = JOINSPLIT_SIZE_WITHOUT_ZKPROOF + GROTH16_PROOF_SIZE;
