//! A keyed development proving system.
//!
//! Proofs are BLAKE2b MACs of the primary input under a secret key, created
//! only after the auxiliary input has been checked against the statement.
//! They are sound against anyone who does not hold the key, but are not zero
//! knowledge proofs and do not verify on the Zcash network. Use this system to
//! test wallet and node code without the Sprout parameter files.

use std::fmt;

use rand_core::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;

use sprout_chain::primitives::{Groth16Proof, GROTH16_PROOF_SIZE};

use crate::{
    circuit::{AuxiliaryInput, Statement},
    error::{ProverError, VerificationError},
};

use super::ProvingSystem;


/// The BLAKE2b output size used for each block of the proof.
const BLOCK_SIZE: usize = 64;

/// A development proving system that MACs the statement with a secret key.
#[derive(Clone)]
pub struct KeyedProvingSystem {
    key: [u8; 32],
}

impl KeyedProvingSystem {
    /// Generates a new random key.
    pub fn new<T>(csprng: &mut T) -> Self
    where
        T: RngCore + CryptoRng,
    {
        let mut key = [0u8; 32];
        csprng.fill_bytes(&mut key);

        Self { key }
    }

    /// Uses an existing key, so proofs can be checked by another instance.
    pub fn from_key(key: [u8; 32]) -> Self {
        Self { key }
    }

    fn tag(&self, statement: &Statement) -> Groth16Proof {
        let input = statement.primary_input_bytes();
        let mut tag = [0u8; GROTH16_PROOF_SIZE];

        for (counter, block) in (0u8..).zip(tag.chunks_mut(BLOCK_SIZE)) {
            let hash = blake2b_simd::Params::new()
                .hash_length(BLOCK_SIZE)
                .key(&self.key)
                .personal(b"SproutKeyedProof")
                .to_state()
                .update(&[counter])
                .update(&input)
                .finalize();
            block.copy_from_slice(hash.as_bytes());
        }

        Groth16Proof(tag)
    }
}

impl fmt::Debug for KeyedProvingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedProvingSystem")
            .field("key", &"<redacted>")
            .finish()
    }
}

impl ProvingSystem for KeyedProvingSystem {
    fn create_proof(
        &self,
        statement: &Statement,
        aux: &AuxiliaryInput,
    ) -> Result<Groth16Proof, ProverError> {
        aux.check(statement)?;

        Ok(self.tag(statement))
    }

    fn verify_proof(
        &self,
        statement: &Statement,
        proof: &Groth16Proof,
    ) -> Result<(), VerificationError> {
        let expected = self.tag(statement);

        if bool::from(expected.0[..].ct_eq(&proof.0[..])) {
            Ok(())
        } else {
            Err(VerificationError::InvalidProof)
        }
    }
}
