//! Synchronous JoinSplit proof verification.

use sprout_chain::{
    primitives::{ed25519, Groth16Proof},
    sprout::JoinSplit,
};

use crate::{circuit::Statement, primitives::ProvingSystem};

/// Returns true if `proof` is valid for `statement`.
///
/// Malformed proofs are invalid, not errors.
pub fn verify<P>(proving_system: &P, proof: &Groth16Proof, statement: &Statement) -> bool
where
    P: ProvingSystem + ?Sized,
{
    match proving_system.verify_proof(statement, proof) {
        Ok(()) => true,
        Err(error) => {
            tracing::debug!(?error, anchor = ?statement.anchor, "JoinSplit proof failed verification");
            false
        }
    }
}

/// Returns true if the proof of `joinsplit` is valid for its statement, in a
/// transaction signed by `joinsplit_pub_key`.
pub fn verify_joinsplit<P>(
    proving_system: &P,
    joinsplit: &JoinSplit,
    joinsplit_pub_key: &ed25519::VerificationKeyBytes,
) -> bool
where
    P: ProvingSystem + ?Sized,
{
    let statement = Statement::from_joinsplit(joinsplit, joinsplit_pub_key);

    verify(proving_system, &joinsplit.zkproof, &statement)
}
