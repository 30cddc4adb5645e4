//! Construction of JoinSplit descriptions and their proofs.

use std::fmt;

use rand_core::{CryptoRng, RngCore};

use sprout_chain::{
    amount::Amount,
    primitives::{ed25519, x25519, Groth16Proof, GROTH16_PROOF_SIZE},
    sprout::{
        note_encryption::NoteEncryptor,
        output_rho,
        tree::{self, WitnessError, WitnessSource},
        EncryptedNote, HSig, JoinSplit, Mac, Memo, Note, NotePlaintext, Nullifier, PaymentAddress,
        RandomSeed, SpendingKey, NUM_JS_INPUTS, NUM_JS_OUTPUTS,
    },
};

use crate::{
    circuit::{check_balance, AuxiliaryInput, SpentNote, Statement},
    error::{ConstraintError, ProveError},
    primitives::ProvingSystem,
};

#[cfg(test)]
mod tests;

/// A note to spend in a JoinSplit.
#[derive(Clone, Debug)]
pub struct JsInput {
    /// The authentication path of the note's commitment.
    pub witness: tree::Witness,
    /// The note.
    pub note: Note,
    /// The spending key that owns the note.
    pub spending_key: SpendingKey,
}

impl JsInput {
    /// Creates an input from a note, its witness, and its spending key.
    pub fn new(witness: tree::Witness, note: Note, spending_key: SpendingKey) -> JsInput {
        JsInput {
            witness,
            note,
            spending_key,
        }
    }

    /// Creates an input for `note`, witnessed at `anchor` by `source`.
    pub fn witnessed<S>(
        source: &S,
        anchor: &tree::Root,
        note: Note,
        spending_key: SpendingKey,
    ) -> Result<JsInput, WitnessError>
    where
        S: WitnessSource + ?Sized,
    {
        let witness = source.witness(&note.commitment(), anchor)?;

        Ok(JsInput::new(witness, note, spending_key))
    }

    /// Creates a zero value input under a fresh spending key, witnessed in
    /// a tree that only contains its own commitment.
    pub fn dummy<T>(csprng: &mut T) -> JsInput
    where
        T: RngCore + CryptoRng,
    {
        let spending_key = SpendingKey::new(csprng);
        let note = Note::dummy(csprng, spending_key.paying_key());
        let witness = tree::Witness::single_leaf(note.commitment());

        JsInput::new(witness, note, spending_key)
    }
}

/// A note to create in a JoinSplit.
#[derive(Clone, Debug)]
pub struct JsOutput {
    /// The recipient.
    pub address: PaymentAddress,
    /// The value of the new note.
    pub value: Amount,
    /// The memo sent to the recipient.
    pub memo: Memo,
}

impl JsOutput {
    /// Creates an output with the empty memo.
    pub fn new(address: PaymentAddress, value: Amount) -> JsOutput {
        JsOutput {
            address,
            value,
            memo: Memo::default(),
        }
    }

    /// Replaces the memo of this output.
    pub fn with_memo(mut self, memo: Memo) -> JsOutput {
        self.memo = memo;
        self
    }

    /// Creates a zero value output to a fresh random address.
    pub fn dummy<T>(csprng: &mut T) -> JsOutput
    where
        T: RngCore + CryptoRng,
    {
        JsOutput::new(SpendingKey::new(csprng).address(), Amount::zero())
    }
}

/// A request to create a JoinSplit.
#[derive(Clone, Debug)]
pub struct ProveRequest {
    /// The notes to spend.
    pub inputs: [JsInput; NUM_JS_INPUTS],
    /// The notes to create.
    pub outputs: [JsOutput; NUM_JS_OUTPUTS],
    /// The note commitment tree root every non-dummy input is witnessed at.
    pub anchor: tree::Root,
    /// The value that enters from the transparent value pool.
    pub vpub_old: Amount,
    /// The value that leaves to the transparent value pool.
    pub vpub_new: Amount,
    /// The JoinSplit signing key of the transaction.
    pub joinsplit_pub_key: ed25519::VerificationKeyBytes,
    /// Whether to create a proof.
    pub compute_proof: bool,
    /// Whether to return the ephemeral secret key.
    pub payment_disclosure: bool,
}

impl ProveRequest {
    /// Creates a request that computes a proof and discards the ephemeral
    /// secret key.
    pub fn new(
        inputs: [JsInput; NUM_JS_INPUTS],
        outputs: [JsOutput; NUM_JS_OUTPUTS],
        anchor: tree::Root,
        vpub_old: Amount,
        vpub_new: Amount,
        joinsplit_pub_key: ed25519::VerificationKeyBytes,
    ) -> ProveRequest {
        ProveRequest {
            inputs,
            outputs,
            anchor,
            vpub_old,
            vpub_new,
            joinsplit_pub_key,
            compute_proof: true,
            payment_disclosure: false,
        }
    }

    /// Skips proof creation, for example to estimate transaction sizes.
    pub fn without_proof(mut self) -> ProveRequest {
        self.compute_proof = false;
        self
    }

    /// Returns the ephemeral secret key with the JoinSplit.
    pub fn with_payment_disclosure(mut self) -> ProveRequest {
        self.payment_disclosure = true;
        self
    }
}

/// A JoinSplit created by a [`Prover`].
pub struct ProvedJoinSplit {
    /// The public statement.
    pub statement: Statement,
    /// The random seed h_sig was derived from.
    pub random_seed: RandomSeed,
    /// The ephemeral key of the output ciphertexts.
    pub ephemeral_key: x25519::PublicKey,
    /// The encrypted output notes.
    pub ciphertexts: [EncryptedNote; NUM_JS_OUTPUTS],
    /// The output notes, in the same order as the outputs of the request.
    pub output_notes: [Note; NUM_JS_OUTPUTS],
    /// The proof, if the request asked for one.
    pub zkproof: Option<Groth16Proof>,
    /// The ephemeral secret key, if the request asked for payment disclosure.
    pub ephemeral_secret: Option<x25519::StaticSecret>,
}

impl ProvedJoinSplit {
    /// Returns the h_sig this JoinSplit is bound to.
    pub fn h_sig(&self) -> HSig {
        self.statement.h_sig
    }

    /// Converts this JoinSplit to its on-chain description.
    ///
    /// A JoinSplit created without a proof gets an all-zero proof.
    pub fn into_joinsplit(self) -> JoinSplit {
        let Statement {
            anchor,
            nullifiers,
            macs,
            commitments,
            vpub_old,
            vpub_new,
            ..
        } = self.statement;

        JoinSplit {
            vpub_old,
            vpub_new,
            anchor,
            nullifiers,
            commitments,
            ephemeral_key: self.ephemeral_key,
            random_seed: self.random_seed,
            vmacs: macs,
            zkproof: self
                .zkproof
                .unwrap_or(Groth16Proof([0; GROTH16_PROOF_SIZE])),
            enc_ciphertexts: self.ciphertexts,
        }
    }
}

impl fmt::Debug for ProvedJoinSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvedJoinSplit")
            .field("statement", &self.statement)
            .field("random_seed", &self.random_seed)
            .field("ephemeral_key", &self.ephemeral_key)
            .field("output_notes", &self.output_notes)
            .field("zkproof", &self.zkproof)
            .field(
                "ephemeral_secret",
                &self.ephemeral_secret.as_ref().map(|_| "<redacted>"),
            )
            .finish_non_exhaustive()
    }
}

/// Creates JoinSplits, proving them with a [`ProvingSystem`].
#[derive(Clone, Debug)]
pub struct Prover<P> {
    proving_system: P,
}

impl<P: ProvingSystem> Prover<P> {
    /// Creates a prover that uses `proving_system`.
    pub fn new(proving_system: P) -> Self {
        Self { proving_system }
    }

    /// Returns the proving system of this prover.
    pub fn proving_system(&self) -> &P {
        &self.proving_system
    }

    /// Creates a JoinSplit that spends the request's inputs and creates its
    /// outputs.
    ///
    /// The request is checked before any randomness is sampled or any
    /// proving work is done. The ephemeral secret key is dropped on every
    /// path, unless the request asks for payment disclosure and the
    /// JoinSplit is created.
    pub fn prove<T>(
        &self,
        request: ProveRequest,
        csprng: &mut T,
    ) -> Result<ProvedJoinSplit, ProveError>
    where
        T: RngCore + CryptoRng,
    {
        let ProveRequest {
            inputs,
            outputs,
            anchor,
            vpub_old,
            vpub_new,
            joinsplit_pub_key,
            compute_proof,
            payment_disclosure,
        } = request;

        let _span = tracing::info_span!(
            "joinsplit_prove",
            %vpub_old,
            %vpub_new,
            compute_proof,
        )
        .entered();

        for (index, input) in inputs.iter().enumerate() {
            if !input.note.value.is_zero() {
                let witness_root = input.witness.root();
                if witness_root != anchor {
                    tracing::warn!(
                        index,
                        ?witness_root,
                        ?anchor,
                        "JoinSplit input is not witnessed at the anchor"
                    );
                    return Err(ProveError::WitnessMismatch {
                        index,
                        witness_root,
                        anchor,
                    });
                }

                if input.witness.element() != input.note.commitment() {
                    return Err(ConstraintError::WitnessedWrongCommitment { index }.into());
                }
            }

            if input.note.paying_key != input.spending_key.paying_key() {
                return Err(ConstraintError::WrongPayingKey { index }.into());
            }
        }

        check_balance(
            vpub_old,
            inputs.iter().map(|input| input.note.value),
            vpub_new,
            outputs.iter().map(|output| output.value),
        )?;

        let nullifiers: [Nullifier; NUM_JS_INPUTS] =
            std::array::from_fn(|index| inputs[index].note.nullifier(&inputs[index].spending_key));

        let random_seed = RandomSeed::new(csprng);
        let h_sig = HSig::new(&random_seed, &nullifiers, &joinsplit_pub_key);

        let mut phi = [0u8; 32];
        csprng.fill_bytes(&mut phi);
        phi[0] &= 0x0f;

        let output_notes: [Note; NUM_JS_OUTPUTS] = std::array::from_fn(|index| {
            Note::new(
                csprng,
                outputs[index].address.paying_key,
                outputs[index].value,
                output_rho(&phi, index, &h_sig),
            )
        });

        let mut encryptor = NoteEncryptor::new(csprng, h_sig);
        let ephemeral_key = encryptor.ephemeral_key();
        let ciphertexts = {
            let mut encrypt = |index: usize| {
                let plaintext =
                    NotePlaintext::new(&output_notes[index], outputs[index].memo.clone());
                encryptor.encrypt(&outputs[index].address.transmission_key, &plaintext)
            };

            [encrypt(0)?, encrypt(1)?]
        };

        let statement = Statement {
            anchor,
            h_sig,
            nullifiers,
            macs: std::array::from_fn(|index| {
                Mac::new(&inputs[index].spending_key, index, &h_sig)
            }),
            commitments: output_notes.map(|note| note.commitment()),
            vpub_old,
            vpub_new,
        };

        let zkproof = if compute_proof {
            let aux = AuxiliaryInput {
                phi,
                inputs: inputs.map(|input| SpentNote {
                    spending_key: input.spending_key,
                    note: input.note,
                    witness: input.witness,
                }),
                outputs: output_notes,
            };

            Some(self.proving_system.create_proof(&statement, &aux)?)
        } else {
            None
        };

        tracing::debug!(
            nullifiers = ?statement.nullifiers,
            commitments = ?statement.commitments,
            "created JoinSplit"
        );

        Ok(ProvedJoinSplit {
            statement,
            random_seed,
            ephemeral_key,
            ciphertexts,
            output_notes,
            zkproof,
            ephemeral_secret: payment_disclosure.then(|| encryptor.into_ephemeral_secret()),
        })
    }
}
