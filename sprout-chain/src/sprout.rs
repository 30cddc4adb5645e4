//! Sprout-related functionality.

#[cfg(any(test, feature = "proptest-impl"))]
mod arbitrary;
mod prf;

pub mod address;
pub mod commitment;
pub mod joinsplit;
pub mod keys;
pub mod note;
pub mod note_encryption;
pub mod tree;

pub use commitment::{CommitmentRandomness, NoteCommitment};
pub use joinsplit::{HSig, JoinSplit, RandomSeed, NUM_JS_INPUTS, NUM_JS_OUTPUTS};
pub use keys::{PayingKey, PaymentAddress, ReceivingKey, SpendingKey};
pub use note::{EncryptedNote, Mac, Memo, Note, NotePlaintext, Nullifier, NullifierSeed};

/// Derives the nullifier seed of output `index` of a JoinSplit,
/// rho_i = PRF^rho_phi(i, h_sig).
///
/// `phi` is the fresh 252-bit secret sampled once per JoinSplit, and `index`
/// is zero-based.
pub fn output_rho(phi: &[u8; 32], index: usize, h_sig: &HSig) -> NullifierSeed {
    prf::prf_rho(phi, index, &h_sig.into()).into()
}
