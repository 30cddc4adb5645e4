use std::io::{self, Read};

use crate::{
    amount::Amount,
    serialization::{
        ReadZcashExt, SerializationError, ZcashDeserialize, ZcashDeserializeInto, ZcashSerialize,
    },
};

use super::{
    super::{commitment::CommitmentRandomness, keys::PayingKey},
    Memo, Note, NullifierSeed, MEMO_SIZE,
};

/// The leading byte of a Sprout note plaintext.
const NOTE_PLAINTEXT_LEAD_BYTE: u8 = 0x00;

/// The size of an encoded Sprout note plaintext.
pub const NOTE_PLAINTEXT_SIZE: usize = 1 + 8 + 32 + 32 + MEMO_SIZE;

/// The decrypted contents of an output note: everything the recipient needs
/// to rebuild and spend the [`Note`], except their own paying key.
///
/// Encoded as `0x00 || value || rho || rcm || memo`.
///
/// <https://zips.z.cash/protocol/protocol.pdf#notept>
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotePlaintext {
    /// The note value.
    pub value: Amount,
    /// The nullifier seed.
    pub rho: NullifierSeed,
    /// The commitment trapdoor.
    pub rcm: CommitmentRandomness,
    /// The memo sent with the note.
    pub memo: Memo,
}

impl NotePlaintext {
    /// Builds the plaintext for `note`.
    pub fn new(note: &Note, memo: Memo) -> NotePlaintext {
        NotePlaintext {
            value: note.value,
            rho: note.rho,
            rcm: note.rcm,
            memo,
        }
    }

    /// Rebuilds the note, given the recipient's paying key.
    pub fn note(&self, paying_key: PayingKey) -> Note {
        Note {
            paying_key,
            value: self.value,
            rho: self.rho,
            rcm: self.rcm,
        }
    }

    /// Encodes this plaintext into its fixed size byte form.
    pub fn to_bytes(&self) -> [u8; NOTE_PLAINTEXT_SIZE] {
        let mut bytes = [0u8; NOTE_PLAINTEXT_SIZE];

        self.zcash_serialize(&mut bytes[..])
            .expect("plaintext fits in its fixed size buffer");

        bytes
    }
}

impl ZcashSerialize for NotePlaintext {
    fn zcash_serialize<W: io::Write>(&self, mut writer: W) -> Result<(), io::Error> {
        writer.write_all(&[NOTE_PLAINTEXT_LEAD_BYTE])?;
        self.value.zcash_serialize(&mut writer)?;
        writer.write_all(self.rho.as_ref())?;
        writer.write_all(self.rcm.as_ref())?;
        writer.write_all(self.memo.as_bytes())?;

        Ok(())
    }
}

impl ZcashDeserialize for NotePlaintext {
    fn zcash_deserialize<R: Read>(mut reader: R) -> Result<Self, SerializationError> {
        let mut lead_byte = [0u8; 1];
        reader.read_exact(&mut lead_byte)?;

        if lead_byte[0] != NOTE_PLAINTEXT_LEAD_BYTE {
            return Err(SerializationError::Parse("unknown Sprout note plaintext lead byte"));
        }

        let value = (&mut reader).zcash_deserialize_into()?;
        let rho = reader.read_32_bytes()?.into();
        let rcm = reader.read_32_bytes()?.into();

        let mut memo = [0u8; MEMO_SIZE];
        reader.read_exact(&mut memo)?;

        Ok(NotePlaintext {
            value,
            rho,
            rcm,
            memo: memo.into(),
        })
    }
}
