//! Errors that can occur when proving or verifying JoinSplits.
//!
//! [`ProveError::kind`] tells callers which failures are worth retrying: a
//! [`ErrorKind::WitnessMismatch`] is fixed by refreshing the witnesses, while
//! invalid input is a caller bug and a backend failure is final for that
//! attempt.

use std::{io, path::PathBuf};

use thiserror::Error;

use sprout_chain::{
    amount::{self, Amount},
    sprout::{note_encryption::NoteEncryptionError, tree},
};

/// A JoinSplit relation that does not hold between a statement and its
/// auxiliary input.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
#[allow(missing_docs)]
pub enum ConstraintError {
    #[error("input {index} note is not spendable with its spending key")]
    WrongPayingKey { index: usize },

    #[error("input {index} is witnessed at a root other than the anchor")]
    AnchorMismatch { index: usize },

    #[error("input {index} witness is for a different note commitment")]
    WitnessedWrongCommitment { index: usize },

    #[error("input {index} nullifier is not derived from its note and spending key")]
    NullifierMismatch { index: usize },

    #[error("input {index} MAC does not bind its spending key to h_sig")]
    MacMismatch { index: usize },

    #[error("output {index} rho is not derived from phi and h_sig")]
    RhoMismatch { index: usize },

    #[error("output {index} commitment does not match its note")]
    CommitmentMismatch { index: usize },

    #[error("nonsensical JoinSplit value: {0}")]
    NonsensicalValue(#[from] amount::Error),

    #[error("JoinSplit does not balance: inputs and vpub_old {lhs}, outputs and vpub_new {rhs}")]
    Unbalanced { lhs: Amount, rhs: Amount },
}

/// Errors from a proving backend.
#[derive(Error, Debug)]
pub enum ProverError {
    /// The auxiliary input does not satisfy the statement.
    #[error("JoinSplit circuit is not satisfied: {0}")]
    Unsatisfied(#[from] ConstraintError),

    /// The backend was loaded without a proving key.
    #[error("no Sprout proving key is loaded")]
    MissingProvingKey,

    /// The backend produced a proof that could not be encoded.
    #[error("could not encode Groth16 proof")]
    Encoding(#[from] io::Error),
}

/// Errors when locating or reading the Sprout Groth16 parameters.
#[derive(Error, Debug)]
pub enum ParameterError {
    /// No parameter directory was configured, and there is no default.
    #[error("could not find the Zcash parameters folder")]
    NoParamsFolder,

    /// The parameter file could not be opened or parsed.
    #[error("could not load Sprout Groth16 parameters from {path:?}")]
    Io {
        /// The parameter file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
}

/// Errors when constructing a JoinSplit proof.
#[derive(Error, Debug)]
pub enum ProveError {
    /// The request can never produce a valid JoinSplit.
    #[error("invalid JoinSplit input: {0}")]
    InvalidInput(#[from] ConstraintError),

    /// An input witness is for a different tree state than the anchor.
    #[error("input {index} witness root {witness_root:?} does not match anchor {anchor:?}")]
    WitnessMismatch {
        /// The input index.
        index: usize,
        /// The root of the input's witness.
        witness_root: tree::Root,
        /// The requested anchor.
        anchor: tree::Root,
    },

    /// The proving backend failed.
    #[error("proving backend failed: {0}")]
    Backend(#[from] ProverError),

    /// The output notes could not be encrypted.
    #[error("output note encryption failed: {0}")]
    Encryption(#[from] NoteEncryptionError),
}

/// The kind of a [`ProveError`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// A caller bug: retrying with the same request fails the same way.
    InvalidInput,
    /// Recoverable: refresh the input witnesses and retry.
    WitnessMismatch,
    /// Fatal for this attempt.
    Backend,
}

impl ProveError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProveError::InvalidInput(_) => ErrorKind::InvalidInput,
            ProveError::WitnessMismatch { .. } => ErrorKind::WitnessMismatch,
            ProveError::Backend(_) | ProveError::Encryption(_) => ErrorKind::Backend,
        }
    }
}

/// Errors when verifying a JoinSplit proof.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum VerificationError {
    /// The proof bytes are not a valid encoding.
    #[error("malformed Groth16 proof: {0}")]
    MalformedProof(String),

    /// The proof does not verify against the statement.
    #[error("JoinSplit proof is invalid for its statement")]
    InvalidProof,
}
