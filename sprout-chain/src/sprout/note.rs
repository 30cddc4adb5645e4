//! Sprout notes

#![allow(clippy::unit_arg)]

#[cfg(any(test, feature = "proptest-impl"))]
mod arbitrary;
mod ciphertexts;
mod mac;
mod memo;
mod nullifiers;
mod plaintext;

#[cfg(test)]
mod tests;

use rand_core::{CryptoRng, RngCore};

use crate::amount::Amount;

use super::{
    commitment::{CommitmentRandomness, NoteCommitment},
    keys::{PayingKey, SpendingKey},
};

pub use ciphertexts::{EncryptedNote, NOTE_CIPHERTEXT_SIZE};
pub use mac::Mac;
pub use memo::{Memo, MEMO_SIZE};
pub use nullifiers::{Nullifier, NullifierSeed};
pub use plaintext::{NotePlaintext, NOTE_PLAINTEXT_SIZE};

/// A Note represents that a value is spendable by the recipient who
/// holds the spending key corresponding to a given shielded payment
/// address.
///
/// <https://zips.z.cash/protocol/protocol.pdf#notes>
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// The paying key of the recipient's shielded payment address
    pub paying_key: PayingKey,
    /// An integer representing the value of the note in zatoshi (1 ZEC
    /// = 10^8 zatoshi)
    pub value: Amount,
    /// Input to PRF^nf to derive the nullifier of the note
    pub rho: NullifierSeed,
    /// A random commitment trapdoor
    pub rcm: CommitmentRandomness,
}

impl Note {
    /// Creates a note with fresh commitment randomness.
    pub fn new<T>(csprng: &mut T, paying_key: PayingKey, value: Amount, rho: NullifierSeed) -> Note
    where
        T: RngCore + CryptoRng,
    {
        Note {
            paying_key,
            value,
            rho,
            rcm: CommitmentRandomness::new(csprng),
        }
    }

    /// Creates a zero value note with random `rho` and `rcm`, spendable
    /// by `paying_key`.
    pub fn dummy<T>(csprng: &mut T, paying_key: PayingKey) -> Note
    where
        T: RngCore + CryptoRng,
    {
        let mut rho = [0u8; 32];
        csprng.fill_bytes(&mut rho);

        Note::new(csprng, paying_key, Amount::zero(), rho.into())
    }

    /// Returns the commitment to this note.
    pub fn commitment(&self) -> NoteCommitment {
        NoteCommitment::from(self)
    }

    /// Returns the nullifier of this note, derived with the spending key
    /// that owns it.
    pub fn nullifier(&self, spending_key: &SpendingKey) -> Nullifier {
        Nullifier::from((spending_key, self.rho))
    }
}
