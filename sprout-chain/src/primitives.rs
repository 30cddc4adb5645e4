//! External primitives used in Sprout structures.
//!
//! This contains re-exports of the signature and key agreement libraries used
//! in the public API, and the byte encoding of the proofs this library
//! carries but does not create.

mod groth16;

pub use ed25519_zebra as ed25519;
pub use x25519_dalek as x25519;

pub use groth16::{Groth16Proof, GROTH16_PROOF_SIZE};
