//! Tests for JoinSplit creation.

use std::sync::atomic::{AtomicUsize, Ordering};

use color_eyre::eyre::Result;
use rand::thread_rng;

use sprout_chain::{
    amount::MAX_MONEY,
    primitives::x25519,
    serialization::ZcashSerialize,
    sprout::{
        joinsplit::GROTH16_JOINSPLIT_SIZE,
        note_encryption::{decrypt_note, NoteDecryptionError},
        tree::NoteCommitmentLog,
        NoteCommitment, Nullifier,
    },
};

use crate::{
    error::{ErrorKind, ProverError, VerificationError},
    primitives::keyed::KeyedProvingSystem,
    tests::{amount, joinsplit_pub_key, Wallet},
    verifier::{verify, verify_joinsplit},
};

use super::*;

/// A keyed proving system that counts the proofs it creates.
#[derive(Debug)]
struct CountingProvingSystem {
    inner: KeyedProvingSystem,
    proofs: AtomicUsize,
}

impl CountingProvingSystem {
    fn new() -> Self {
        Self {
            inner: KeyedProvingSystem::from_key([7; 32]),
            proofs: AtomicUsize::new(0),
        }
    }

    fn proofs(&self) -> usize {
        self.proofs.load(Ordering::SeqCst)
    }
}

impl ProvingSystem for CountingProvingSystem {
    fn create_proof(
        &self,
        statement: &Statement,
        aux: &AuxiliaryInput,
    ) -> Result<Groth16Proof, ProverError> {
        self.proofs.fetch_add(1, Ordering::SeqCst);
        self.inner.create_proof(statement, aux)
    }

    fn verify_proof(
        &self,
        statement: &Statement,
        proof: &Groth16Proof,
    ) -> Result<(), VerificationError> {
        self.inner.verify_proof(statement, proof)
    }
}

/// A request spending notes worth 5 and 7 into notes worth 10 and 2 for
/// `recipient`.
fn balanced_request(wallet: &Wallet, recipient: &SpendingKey) -> ProveRequest {
    ProveRequest::new(
        [wallet.input(0), wallet.input(1)],
        [
            JsOutput::new(recipient.address(), amount(10)),
            JsOutput::new(recipient.address(), amount(2)),
        ],
        wallet.log.root(),
        Amount::zero(),
        Amount::zero(),
        joinsplit_pub_key(),
    )
}

#[test]
fn proved_joinsplits_verify() -> Result<()> {
    let _init_guard = sprout_test::init();

    let mut rng = thread_rng();
    let wallet = Wallet::with_notes(&[5, 7]);
    let recipient = SpendingKey::new(&mut rng);
    let prover = Prover::new(CountingProvingSystem::new());

    let proved = prover.prove(balanced_request(&wallet, &recipient), &mut rng)?;
    assert_eq!(prover.proving_system().proofs(), 1);

    let zkproof = proved.zkproof.expect("a proof was requested");
    assert!(verify(prover.proving_system(), &zkproof, &proved.statement));

    assert_eq!(
        proved.statement.nullifiers,
        [
            wallet.notes[0].nullifier(&wallet.key),
            wallet.notes[1].nullifier(&wallet.key),
        ]
    );

    let joinsplit = proved.into_joinsplit();
    assert!(verify_joinsplit(
        prover.proving_system(),
        &joinsplit,
        &joinsplit_pub_key()
    ));

    Ok(())
}

#[test]
fn mutated_statements_do_not_verify() -> Result<()> {
    let _init_guard = sprout_test::init();

    let mut rng = thread_rng();
    let wallet = Wallet::with_notes(&[5, 7]);
    let recipient = SpendingKey::new(&mut rng);
    let prover = Prover::new(KeyedProvingSystem::new(&mut rng));

    let proved = prover.prove(balanced_request(&wallet, &recipient), &mut rng)?;
    let zkproof = proved.zkproof.expect("a proof was requested");

    let mutations: [fn(&mut Statement); 8] = [
        |s| s.nullifiers[0] = Nullifier::from([1; 32]),
        |s| s.nullifiers[1] = Nullifier::from([1; 32]),
        |s| s.commitments[0] = NoteCommitment::from([1; 32]),
        |s| s.commitments[1] = NoteCommitment::from([1; 32]),
        |s| s.h_sig = HSig::from([1; 32]),
        |s| s.vpub_old = amount(1),
        |s| s.vpub_new = amount(1),
        |s| s.anchor = tree::Root::from([1; 32]),
    ];

    for mutate in mutations {
        let mut statement = proved.statement.clone();
        mutate(&mut statement);

        assert!(!verify(prover.proving_system(), &zkproof, &statement));
    }

    // another key is another verifier
    let other = KeyedProvingSystem::new(&mut rng);
    assert!(!verify(&other, &zkproof, &proved.statement));

    Ok(())
}

#[test]
fn unbalanced_request_fails_before_proving() {
    let _init_guard = sprout_test::init();

    let mut rng = thread_rng();
    let wallet = Wallet::with_notes(&[10]);
    let recipient = SpendingKey::new(&mut rng);
    let prover = Prover::new(CountingProvingSystem::new());

    let request = ProveRequest::new(
        [wallet.input(0), JsInput::dummy(&mut rng)],
        [
            JsOutput::new(recipient.address(), amount(11)),
            JsOutput::dummy(&mut rng),
        ],
        wallet.log.root(),
        Amount::zero(),
        Amount::zero(),
        joinsplit_pub_key(),
    );

    let error = prover
        .prove(request, &mut rng)
        .expect_err("outputs exceed inputs");

    assert_eq!(error.kind(), ErrorKind::InvalidInput);
    assert!(matches!(
        error,
        ProveError::InvalidInput(ConstraintError::Unbalanced { lhs, rhs })
            if lhs == amount(10) && rhs == amount(11)
    ));
    assert_eq!(prover.proving_system().proofs(), 0);
}

#[test]
fn values_outside_the_money_range_are_rejected() {
    let _init_guard = sprout_test::init();

    let mut rng = thread_rng();
    let wallet = Wallet::with_notes(&[5]);
    let prover = Prover::new(CountingProvingSystem::new());

    let request = ProveRequest::new(
        [wallet.input(0), JsInput::dummy(&mut rng)],
        [JsOutput::dummy(&mut rng), JsOutput::dummy(&mut rng)],
        wallet.log.root(),
        amount(MAX_MONEY),
        amount(MAX_MONEY),
        joinsplit_pub_key(),
    );

    let error = prover
        .prove(request, &mut rng)
        .expect_err("input side exceeds MAX_MONEY");

    assert!(matches!(
        error,
        ProveError::InvalidInput(ConstraintError::NonsensicalValue(_))
    ));
    assert_eq!(prover.proving_system().proofs(), 0);
}

#[test]
fn stale_witness_is_a_witness_mismatch() {
    let _init_guard = sprout_test::init();

    let mut rng = thread_rng();
    let mut wallet = Wallet::with_notes(&[5]);
    let recipient = SpendingKey::new(&mut rng);
    let prover = Prover::new(CountingProvingSystem::new());

    let stale_root = wallet.log.root();
    let stale_input = wallet.input(0);

    wallet
        .log
        .append(NoteCommitment::from([9; 32]))
        .expect("tree is not full");
    let anchor = wallet.log.root();
    assert_ne!(stale_root, anchor);

    let request = ProveRequest::new(
        [stale_input, JsInput::dummy(&mut rng)],
        [
            JsOutput::new(recipient.address(), amount(5)),
            JsOutput::dummy(&mut rng),
        ],
        anchor,
        Amount::zero(),
        Amount::zero(),
        joinsplit_pub_key(),
    );

    let error = prover
        .prove(request.clone(), &mut rng)
        .expect_err("witness is for an older root");

    assert_eq!(error.kind(), ErrorKind::WitnessMismatch);
    assert!(matches!(
        error,
        ProveError::WitnessMismatch { index: 0, witness_root, anchor: error_anchor }
            if witness_root == stale_root && error_anchor == anchor
    ));
    assert_eq!(prover.proving_system().proofs(), 0);

    // refreshing the witness fixes the request
    let mut request = request;
    request.inputs[0] = wallet.input(0);
    assert!(prover.prove(request, &mut rng).is_ok());
}

#[test]
fn notes_are_only_spendable_by_their_owner() {
    let _init_guard = sprout_test::init();

    let mut rng = thread_rng();
    let wallet = Wallet::with_notes(&[5, 7]);
    let recipient = SpendingKey::new(&mut rng);
    let prover = Prover::new(CountingProvingSystem::new());

    let mut request = balanced_request(&wallet, &recipient);
    request.inputs[1].spending_key = recipient;

    let error = prover
        .prove(request, &mut rng)
        .expect_err("input 1 belongs to the wallet");

    assert!(matches!(
        error,
        ProveError::InvalidInput(ConstraintError::WrongPayingKey { index: 1 })
    ));
    assert_eq!(prover.proving_system().proofs(), 0);
}

#[test]
fn recipients_can_decrypt_outputs() -> Result<()> {
    let _init_guard = sprout_test::init();

    let mut rng = thread_rng();
    let wallet = Wallet::with_notes(&[5, 7]);
    let recipient = SpendingKey::new(&mut rng);
    let bystander = SpendingKey::new(&mut rng);
    let prover = Prover::new(KeyedProvingSystem::new(&mut rng));

    let memo = Memo::try_from(&b"thanks for lunch"[..]).expect("short memo");
    let mut request = balanced_request(&wallet, &recipient);
    request.outputs[0] = request.outputs[0].clone().with_memo(memo.clone());

    let proved = prover.prove(request, &mut rng)?;

    for index in 0..NUM_JS_OUTPUTS {
        let plaintext = decrypt_note(
            &recipient.receiving_key(),
            &proved.ciphertexts[index],
            &proved.ephemeral_key,
            &proved.h_sig(),
            index as u8,
        )?;

        assert_eq!(plaintext.note(recipient.paying_key()), proved.output_notes[index]);
        assert_eq!(
            plaintext.note(recipient.paying_key()).commitment(),
            proved.statement.commitments[index]
        );

        let expected_memo = if index == 0 { memo.clone() } else { Memo::default() };
        assert_eq!(plaintext.memo, expected_memo);

        assert!(matches!(
            decrypt_note(
                &bystander.receiving_key(),
                &proved.ciphertexts[index],
                &proved.ephemeral_key,
                &proved.h_sig(),
                index as u8,
            ),
            Err(NoteDecryptionError::NotForThisKey)
        ));
    }

    Ok(())
}

#[test]
fn repeated_requests_use_fresh_randomness() -> Result<()> {
    let _init_guard = sprout_test::init();

    let mut rng = thread_rng();
    let wallet = Wallet::with_notes(&[5, 7]);
    let recipient = SpendingKey::new(&mut rng);
    let prover = Prover::new(KeyedProvingSystem::new(&mut rng));

    let first = prover.prove(balanced_request(&wallet, &recipient), &mut rng)?;
    let second = prover.prove(balanced_request(&wallet, &recipient), &mut rng)?;

    assert_eq!(first.statement.nullifiers, second.statement.nullifiers);

    assert_ne!(first.random_seed, second.random_seed);
    assert_ne!(first.h_sig(), second.h_sig());
    assert_ne!(first.ephemeral_key, second.ephemeral_key);
    assert_ne!(first.statement.commitments, second.statement.commitments);
    assert_ne!(first.ciphertexts[0], second.ciphertexts[0]);
    assert_ne!(first.ciphertexts[0], first.ciphertexts[1]);
    assert_ne!(first.statement.macs, second.statement.macs);

    Ok(())
}

#[test]
fn payment_disclosure_returns_the_ephemeral_secret() -> Result<()> {
    let _init_guard = sprout_test::init();

    let mut rng = thread_rng();
    let wallet = Wallet::with_notes(&[5, 7]);
    let recipient = SpendingKey::new(&mut rng);
    let prover = Prover::new(KeyedProvingSystem::new(&mut rng));

    let proved = prover.prove(balanced_request(&wallet, &recipient), &mut rng)?;
    assert!(proved.ephemeral_secret.is_none());

    let proved = prover.prove(
        balanced_request(&wallet, &recipient).with_payment_disclosure(),
        &mut rng,
    )?;
    let esk = proved
        .ephemeral_secret
        .as_ref()
        .expect("payment disclosure was requested");

    assert_eq!(x25519::PublicKey::from(esk), proved.ephemeral_key);

    Ok(())
}

#[test]
fn joinsplits_without_proofs_skip_the_backend() -> Result<()> {
    let _init_guard = sprout_test::init();

    let mut rng = thread_rng();
    let wallet = Wallet::with_notes(&[5, 7]);
    let recipient = SpendingKey::new(&mut rng);
    let prover = Prover::new(CountingProvingSystem::new());

    let proved = prover.prove(
        balanced_request(&wallet, &recipient).without_proof(),
        &mut rng,
    )?;

    assert!(proved.zkproof.is_none());
    assert_eq!(prover.proving_system().proofs(), 0);

    let joinsplit = proved.into_joinsplit();
    assert_eq!(joinsplit.zkproof, Groth16Proof([0; GROTH16_PROOF_SIZE]));
    assert_eq!(
        joinsplit.zcash_serialize_to_vec()?.len(),
        GROTH16_JOINSPLIT_SIZE
    );
    assert!(!verify_joinsplit(
        prover.proving_system(),
        &joinsplit,
        &joinsplit_pub_key()
    ));

    Ok(())
}

#[test]
fn dummy_inputs_and_outputs_pad_a_transparent_transfer() -> Result<()> {
    let _init_guard = sprout_test::init();

    let mut rng = thread_rng();
    let prover = Prover::new(KeyedProvingSystem::new(&mut rng));

    let request = ProveRequest::new(
        [JsInput::dummy(&mut rng), JsInput::dummy(&mut rng)],
        [JsOutput::dummy(&mut rng), JsOutput::dummy(&mut rng)],
        NoteCommitmentLog::new().root(),
        amount(3),
        amount(3),
        joinsplit_pub_key(),
    );

    let proved = prover.prove(request, &mut rng)?;
    let joinsplit = proved.into_joinsplit();

    assert_eq!(joinsplit.value_balance(), 0);
    assert!(verify_joinsplit(
        prover.proving_system(),
        &joinsplit,
        &joinsplit_pub_key()
    ));

    Ok(())
}
