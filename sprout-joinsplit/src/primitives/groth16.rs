//! The Sprout Groth16 proving system.
//!
//! Proofs are created with the Sprout circuit from `zcash_proofs`, and
//! checked against a prepared verifying key with `bellman`.

use std::{fmt, fs::File, io::BufReader, path::Path};

use bellman::{
    gadgets::multipack,
    groth16::{self, Parameters, PreparedVerifyingKey},
};
use bls12_381::Bls12;
use once_cell::sync::OnceCell;

use sprout_chain::primitives::{Groth16Proof, GROTH16_PROOF_SIZE};

use crate::{
    circuit::{AuxiliaryInput, Statement},
    config::Config,
    error::{ParameterError, ProverError, VerificationError},
};

use super::ProvingSystem;

/// The Sprout Groth16 parameters, loaded once per process by [`preload`] or
/// [`Groth16::shared`].
static SPROUT: OnceCell<Groth16> = OnceCell::new();

/// Loads the shared Sprout Groth16 parameters, unless the config skips the
/// preload.
pub fn preload(config: &Config) -> Result<(), ParameterError> {
    if config.debug_skip_parameter_preload {
        tracing::debug!("skipping Sprout Groth16 parameter preload");
        return Ok(());
    }

    Groth16::shared(config).map(|_| ())
}

/// The Sprout Groth16 proving system.
pub struct Groth16 {
    /// The full parameters, needed for proving.
    parameters: Option<Parameters<Bls12>>,
    /// The prepared verifying key.
    verifying_key: PreparedVerifyingKey<Bls12>,
}

impl Groth16 {
    /// Returns the process-wide Sprout parameters, loading them from the
    /// configured parameters folder on first use.
    pub fn shared(config: &Config) -> Result<&'static Groth16, ParameterError> {
        SPROUT.get_or_try_init(|| Groth16::load(config))
    }

    /// Loads the Sprout parameters from the configured parameters folder.
    pub fn load(config: &Config) -> Result<Groth16, ParameterError> {
        let path = config
            .sprout_parameters_path()
            .ok_or(ParameterError::NoParamsFolder)?;

        tracing::info!(network = ?config.network, ?path, "loading Sprout Groth16 parameters");

        Groth16::read(&path)
    }

    /// Reads the Sprout parameters from `path`.
    pub fn read(path: &Path) -> Result<Groth16, ParameterError> {
        let io_error = |source| ParameterError::Io {
            path: path.to_owned(),
            source,
        };

        let file = File::open(path).map_err(io_error)?;
        // The parameter file is trusted, so skip the expensive point checks.
        let parameters = Parameters::<Bls12>::read(BufReader::new(file), false).map_err(io_error)?;

        Ok(Groth16::from_parameters(parameters))
    }

    /// Uses already loaded parameters.
    pub fn from_parameters(parameters: Parameters<Bls12>) -> Groth16 {
        let verifying_key = groth16::prepare_verifying_key(&parameters.vk);

        Groth16 {
            parameters: Some(parameters),
            verifying_key,
        }
    }

    /// Uses a verifying key only. Proving with the result fails.
    pub fn verifying_only(verifying_key: &groth16::VerifyingKey<Bls12>) -> Groth16 {
        Groth16 {
            parameters: None,
            verifying_key: groth16::prepare_verifying_key(verifying_key),
        }
    }

    /// Returns the prepared verifying key.
    pub fn prepared_verifying_key(&self) -> &PreparedVerifyingKey<Bls12> {
        &self.verifying_key
    }
}

impl fmt::Debug for Groth16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Groth16")
            .field("proving_key", &self.parameters.is_some())
            .finish_non_exhaustive()
    }
}

/// Encodes the primary input as `Bls12_381` scalars, to match
/// [`bellman::groth16::verify_proof`]. The fixed leading `1` is added by
/// `bellman`.
pub(crate) fn primary_inputs(statement: &Statement) -> Vec<bls12_381::Scalar> {
    let bits = multipack::bytes_to_bits(&statement.primary_input_bytes());

    multipack::compute_multipacking(&bits)
}

impl ProvingSystem for Groth16 {
    fn create_proof(
        &self,
        statement: &Statement,
        aux: &AuxiliaryInput,
    ) -> Result<Groth16Proof, ProverError> {
        let parameters = self
            .parameters
            .as_ref()
            .ok_or(ProverError::MissingProvingKey)?;

        // The Sprout circuit panics when it is not satisfied.
        aux.check(statement)?;

        let [in1, in2] = &aux.inputs;
        let [out1, out2] = &aux.outputs;

        let proof = zcash_proofs::sprout::create_proof(
            aux.phi,
            statement.anchor.into(),
            statement.h_sig.into(),
            in1.spending_key.into(),
            in1.note.value.zatoshis(),
            in1.note.rho.into(),
            in1.note.rcm.into(),
            &in1.witness.to_legacy_path_bytes(),
            in2.spending_key.into(),
            in2.note.value.zatoshis(),
            in2.note.rho.into(),
            in2.note.rcm.into(),
            &in2.witness.to_legacy_path_bytes(),
            out1.paying_key.0,
            out1.value.zatoshis(),
            out1.rcm.into(),
            out2.paying_key.0,
            out2.value.zatoshis(),
            out2.rcm.into(),
            statement.vpub_old.zatoshis(),
            statement.vpub_new.zatoshis(),
            parameters,
        );

        let mut zkproof = [0u8; GROTH16_PROOF_SIZE];
        proof.write(&mut zkproof[..])?;

        Ok(Groth16Proof(zkproof))
    }

    fn verify_proof(
        &self,
        statement: &Statement,
        proof: &Groth16Proof,
    ) -> Result<(), VerificationError> {
        // # Consensus
        //
        // > Elements of a JoinSplit description MUST have the types given above
        //
        // https://zips.z.cash/protocol/protocol.pdf#joinsplitdesc
        let proof = groth16::Proof::<Bls12>::read(&proof.0[..])
            .map_err(|e| VerificationError::MalformedProof(e.to_string()))?;

        groth16::verify_proof(&self.verifying_key, &proof, &primary_inputs(statement))
            .map_err(|_| VerificationError::InvalidProof)
    }
}

#[cfg(test)]
mod tests;
