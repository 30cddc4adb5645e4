//! The JoinSplit statement, and a native check of the relation the JoinSplit
//! circuit enforces.
//!
//! <https://zips.z.cash/protocol/protocol.pdf#joinsplitstatement>

use sprout_chain::{
    amount::{self, Amount},
    primitives::ed25519,
    sprout::{
        output_rho, tree, HSig, JoinSplit, Mac, Note, NoteCommitment, Nullifier, SpendingKey,
        NUM_JS_INPUTS, NUM_JS_OUTPUTS,
    },
};

use crate::error::ConstraintError;

/// The size of the primary input, before it is packed into field elements.
pub(crate) const PRIMARY_INPUT_SIZE: usize = 32 * 8 + 8 * 2;

/// The public part of a JoinSplit statement.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Statement {
    /// The note commitment tree root the inputs are spent from.
    pub anchor: tree::Root,
    /// The hash that binds the proof to its transaction.
    pub h_sig: HSig,
    /// The input nullifiers.
    pub nullifiers: [Nullifier; NUM_JS_INPUTS],
    /// The input MACs.
    pub macs: [Mac; NUM_JS_INPUTS],
    /// The output note commitments.
    pub commitments: [NoteCommitment; NUM_JS_OUTPUTS],
    /// The value that enters the JoinSplit from the transparent value pool.
    pub vpub_old: Amount,
    /// The value that leaves the JoinSplit to the transparent value pool.
    pub vpub_new: Amount,
}

impl Statement {
    /// Rebuilds the statement of a JoinSplit description, in a transaction
    /// signed by `joinsplit_pub_key`.
    pub fn from_joinsplit(
        joinsplit: &JoinSplit,
        joinsplit_pub_key: &ed25519::VerificationKeyBytes,
    ) -> Statement {
        Statement {
            anchor: joinsplit.anchor,
            h_sig: joinsplit.h_sig(joinsplit_pub_key),
            nullifiers: joinsplit.nullifiers,
            macs: joinsplit.vmacs,
            commitments: joinsplit.commitments,
            vpub_old: joinsplit.vpub_old,
            vpub_new: joinsplit.vpub_new,
        }
    }

    /// Returns the primary input bytes, in the order the Sprout circuit
    /// packs them:
    /// `rt || h_sig || nf_1 || h_1 || nf_2 || h_2 || cm_1 || cm_2 || vpub_old || vpub_new`.
    pub fn primary_input_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(PRIMARY_INPUT_SIZE);

        bytes.extend(<[u8; 32]>::from(self.anchor));
        bytes.extend(<[u8; 32]>::from(self.h_sig));
        for (nullifier, mac) in self.nullifiers.iter().zip(&self.macs) {
            bytes.extend(<[u8; 32]>::from(nullifier));
            bytes.extend(<[u8; 32]>::from(mac));
        }
        for commitment in &self.commitments {
            bytes.extend(<[u8; 32]>::from(commitment));
        }
        bytes.extend(self.vpub_old.to_bytes());
        bytes.extend(self.vpub_new.to_bytes());

        bytes
    }
}

/// An input note, with the key that spends it and its witness.
#[derive(Clone, Debug)]
pub struct SpentNote {
    /// The spending key of the note's owner.
    pub spending_key: SpendingKey,
    /// The note being spent.
    pub note: Note,
    /// The authentication path of the note's commitment.
    pub witness: tree::Witness,
}

/// The private part of a JoinSplit statement.
#[derive(Clone, Debug)]
pub struct AuxiliaryInput {
    /// The 252-bit secret the output nullifier seeds are derived from.
    pub phi: [u8; 32],
    /// The input notes.
    pub inputs: [SpentNote; NUM_JS_INPUTS],
    /// The output notes.
    pub outputs: [Note; NUM_JS_OUTPUTS],
}

impl AuxiliaryInput {
    /// Checks that this auxiliary input satisfies `statement`.
    ///
    /// Inputs with a zero value are not checked against the anchor, so
    /// dummy inputs can be witnessed in any tree.
    pub fn check(&self, statement: &Statement) -> Result<(), ConstraintError> {
        for (index, input) in self.inputs.iter().enumerate() {
            let SpentNote {
                spending_key,
                note,
                witness,
            } = input;

            if note.paying_key != spending_key.paying_key() {
                return Err(ConstraintError::WrongPayingKey { index });
            }

            if !note.value.is_zero() {
                if witness.root() != statement.anchor {
                    return Err(ConstraintError::AnchorMismatch { index });
                }
                if witness.element() != note.commitment() {
                    return Err(ConstraintError::WitnessedWrongCommitment { index });
                }
            }

            if note.nullifier(spending_key) != statement.nullifiers[index] {
                return Err(ConstraintError::NullifierMismatch { index });
            }

            if Mac::new(spending_key, index, &statement.h_sig) != statement.macs[index] {
                return Err(ConstraintError::MacMismatch { index });
            }
        }

        for (index, note) in self.outputs.iter().enumerate() {
            if note.rho != output_rho(&self.phi, index, &statement.h_sig) {
                return Err(ConstraintError::RhoMismatch { index });
            }

            if note.commitment() != statement.commitments[index] {
                return Err(ConstraintError::CommitmentMismatch { index });
            }
        }

        check_balance(
            statement.vpub_old,
            self.inputs.iter().map(|input| input.note.value),
            statement.vpub_new,
            self.outputs.iter().map(|note| note.value),
        )
    }
}

/// Checks `vpub_old + sum(inputs) == vpub_new + sum(outputs)`.
///
/// Each side must also stay within the money range.
pub(crate) fn check_balance(
    vpub_old: Amount,
    inputs: impl IntoIterator<Item = Amount>,
    vpub_new: Amount,
    outputs: impl IntoIterator<Item = Amount>,
) -> Result<(), ConstraintError> {
    let lhs = std::iter::once(vpub_old)
        .chain(inputs)
        .sum::<amount::Result<Amount>>()?;
    let rhs = std::iter::once(vpub_new)
        .chain(outputs)
        .sum::<amount::Result<Amount>>()?;

    if lhs != rhs {
        return Err(ConstraintError::Unbalanced { lhs, rhs });
    }

    Ok(())
}
