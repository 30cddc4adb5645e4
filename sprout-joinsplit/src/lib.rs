//! Construction and verification of Sprout JoinSplit proofs.
//!
//! A JoinSplit spends two Sprout notes and creates two new ones, proving in
//! zero knowledge that:
//!
//! 1. each input note is in the note commitment tree at the anchor, and is
//!    owned by the spender,
//! 2. each input nullifier and MAC is correctly derived,
//! 3. each output commitment is correctly derived, and
//! 4. `sum(inputs) + vpub_old == sum(outputs) + vpub_new`.
//!
//! The public [`Statement`] reveals none of the note contents or long-term
//! keys.
//!
//! [`Prover`] checks the [`AuxiliaryInput`] against the statement natively
//! before doing any proving work, then hands both to a [`ProvingSystem`]:
//! either the [`Groth16`] backend over the Sprout Groth16 parameters, or the
//! [`KeyedProvingSystem`] development backend.
//!
//! [`verify`] and [`verify_joinsplit`] check proofs synchronously, and
//! [`Verifier`] is an async [`tower::Service`] that verifies on the rayon
//! thread pool.

#![doc(html_root_url = "https://docs.rs/sprout_joinsplit")]
// Standard lints
#![warn(missing_docs)]
#![allow(clippy::try_err)]
#![deny(clippy::await_holding_lock)]
#![forbid(unsafe_code)]

mod circuit;
mod config;
mod primitives;
mod prover;
mod service;
mod verifier;

pub mod error;


pub use circuit::{AuxiliaryInput, SpentNote, Statement};
pub use config::Config;
pub use error::{ConstraintError, ErrorKind, ParameterError, ProveError, ProverError, VerificationError};
pub use primitives::{
    groth16::{preload, Groth16},
    keyed::KeyedProvingSystem,
    spawn_fifo, spawn_fifo_and_convert, ProvingSystem,
};
pub use prover::{JsInput, JsOutput, ProveRequest, ProvedJoinSplit, Prover};
pub use service::{Item, Verifier};
pub use verifier::{verify, verify_joinsplit};

/// A boxed [`std::error::Error`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
