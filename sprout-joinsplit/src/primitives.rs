//! Proving systems for the JoinSplit statement, and helpers for running
//! them off the async executor.

use std::sync::Arc;

use tokio::sync::oneshot::error::RecvError;

use sprout_chain::primitives::Groth16Proof;

use crate::{
    circuit::{AuxiliaryInput, Statement},
    error::{ProverError, VerificationError},
    BoxError,
};

pub mod groth16;
pub mod keyed;

/// A proving system for the Sprout JoinSplit statement.
///
/// Both operations are CPU-bound and pure apart from proving randomness, so
/// a proving system can be shared between threads.
pub trait ProvingSystem {
    /// Creates a proof that `aux` satisfies `statement`.
    fn create_proof(
        &self,
        statement: &Statement,
        aux: &AuxiliaryInput,
    ) -> Result<Groth16Proof, ProverError>;

    /// Checks `proof` against `statement`.
    fn verify_proof(
        &self,
        statement: &Statement,
        proof: &Groth16Proof,
    ) -> Result<(), VerificationError>;
}

impl<P: ProvingSystem + ?Sized> ProvingSystem for Arc<P> {
    fn create_proof(
        &self,
        statement: &Statement,
        aux: &AuxiliaryInput,
    ) -> Result<Groth16Proof, ProverError> {
        (**self).create_proof(statement, aux)
    }

    fn verify_proof(
        &self,
        statement: &Statement,
        proof: &Groth16Proof,
    ) -> Result<(), VerificationError> {
        (**self).verify_proof(statement, proof)
    }
}

/// Fires off a task into the Rayon threadpool and awaits the result through a oneshot channel.
pub async fn spawn_fifo<
    E: 'static + std::error::Error + Sync + Send,
    F: 'static + FnOnce() -> Result<(), E> + Send,
>(
    f: F,
) -> Result<Result<(), E>, RecvError> {
    // Rayon doesn't have a spawn function that returns a value,
    // so we use a oneshot channel instead.
    let (rsp_tx, rsp_rx) = tokio::sync::oneshot::channel();

    rayon::spawn_fifo(move || {
        let _ = rsp_tx.send(f());
    });

    rsp_rx.await
}

/// Fires off a task into the Rayon threadpool, awaits the result through a oneshot channel,
/// then converts the error to a [`BoxError`].
pub async fn spawn_fifo_and_convert<
    E: 'static + std::error::Error + Into<BoxError> + Sync + Send,
    F: 'static + FnOnce() -> Result<(), E> + Send,
>(
    f: F,
) -> Result<(), BoxError> {
    spawn_fifo(f)
        .await
        .map_err(|_| "threadpool unexpectedly dropped response channel sender.")?
        .map_err(BoxError::from)
}
