//! Tests for the Groth16 proving system that do not need the Sprout
//! parameter file.

use bellman::groth16::VerifyingKey;
use bls12_381::{G1Affine, G2Affine};

use sprout_chain::{
    amount::Amount,
    primitives::Groth16Proof,
    sprout::{tree, HSig, Mac, NoteCommitment, Nullifier},
};

use super::*;

fn statement() -> Statement {
    Statement {
        anchor: tree::Root::from([1; 32]),
        h_sig: HSig::from([2; 32]),
        nullifiers: [Nullifier::from([3; 32]), Nullifier::from([4; 32])],
        macs: [Mac::from([5; 32]), Mac::from([6; 32])],
        commitments: [NoteCommitment::from([7; 32]), NoteCommitment::from([8; 32])],
        vpub_old: Amount::try_from(9).expect("valid amount"),
        vpub_new: Amount::zero(),
    }
}

/// A verifying key with the right number of inputs, made of generators.
fn generator_verifying_key() -> VerifyingKey<Bls12> {
    VerifyingKey {
        alpha_g1: G1Affine::generator(),
        beta_g1: G1Affine::generator(),
        beta_g2: G2Affine::generator(),
        gamma_g2: G2Affine::generator(),
        delta_g1: G1Affine::generator(),
        delta_g2: G2Affine::generator(),
        ic: vec![G1Affine::generator(); primary_inputs(&statement()).len() + 1],
    }
}

#[test]
fn primary_input_packs_into_nine_scalars() {
    let _init_guard = sprout_test::init();

    // 272 bytes of input, 254 bits per scalar
    assert_eq!(statement().primary_input_bytes().len(), 272);
    assert_eq!(primary_inputs(&statement()).len(), 9);
}

#[test]
fn malformed_proof_is_reported() {
    let _init_guard = sprout_test::init();

    let groth16 = Groth16::verifying_only(&generator_verifying_key());
    let result = groth16.verify_proof(&statement(), &Groth16Proof([0; GROTH16_PROOF_SIZE]));

    assert!(matches!(result, Err(VerificationError::MalformedProof(_))));
}

#[test]
fn well_formed_wrong_proof_is_invalid() {
    let _init_guard = sprout_test::init();

    let mut bytes = [0u8; GROTH16_PROOF_SIZE];
    bytes[..48].copy_from_slice(&G1Affine::generator().to_compressed());
    bytes[48..144].copy_from_slice(&G2Affine::generator().to_compressed());
    bytes[144..].copy_from_slice(&G1Affine::generator().to_compressed());

    let groth16 = Groth16::verifying_only(&generator_verifying_key());
    let result = groth16.verify_proof(&statement(), &Groth16Proof(bytes));

    assert_eq!(result, Err(VerificationError::InvalidProof));
}

#[test]
fn verifying_only_backend_cannot_prove() {
    let _init_guard = sprout_test::init();

    let groth16 = Groth16::verifying_only(&generator_verifying_key());
    let aux = crate::tests::dummy_aux_input();

    assert!(matches!(
        groth16.create_proof(&statement(), &aux),
        Err(ProverError::MissingProvingKey)
    ));
}

#[test]
fn missing_parameter_file_is_an_error() {
    let _init_guard = sprout_test::init();

    let config = Config {
        parameters_dir: Some(std::env::temp_dir().join("sprout-joinsplit-missing-params")),
        ..Config::default()
    };

    assert!(matches!(
        Groth16::load(&config),
        Err(ParameterError::Io { path, .. }) if path.ends_with(crate::config::SPROUT_PARAMETERS_FILE)
    ));

    let config = Config {
        parameters_dir: None,
        ..Config::default()
    };

    assert!(matches!(
        Groth16::load(&config),
        Err(ParameterError::NoParamsFolder)
    ));
}

#[test]
fn skipped_preload_does_not_touch_the_filesystem() {
    let _init_guard = sprout_test::init();

    let config = Config {
        parameters_dir: None,
        debug_skip_parameter_preload: true,
        ..Config::default()
    };

    assert!(preload(&config).is_ok());
}
