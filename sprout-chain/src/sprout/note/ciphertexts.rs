use std::{fmt, io};

use serde_big_array::BigArray;

use crate::serialization::{SerializationError, ZcashDeserialize, ZcashSerialize};

use super::NOTE_PLAINTEXT_SIZE;

/// The size of an encrypted Sprout note: the plaintext and a Poly1305 tag.
pub const NOTE_CIPHERTEXT_SIZE: usize = NOTE_PLAINTEXT_SIZE + 16;

/// A ciphertext component for encrypted output notes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncryptedNote(#[serde(with = "BigArray")] pub [u8; NOTE_CIPHERTEXT_SIZE]);

impl fmt::Debug for EncryptedNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EncryptedNote")
            .field(&hex::encode(&self.0[..]))
            .finish()
    }
}

impl AsRef<[u8]> for EncryptedNote {
    fn as_ref(&self) -> &[u8] {
        &self.0[..]
    }
}

impl ZcashSerialize for EncryptedNote {
    fn zcash_serialize<W: io::Write>(&self, mut writer: W) -> Result<(), io::Error> {
        writer.write_all(&self.0[..])
    }
}

impl ZcashDeserialize for EncryptedNote {
    fn zcash_deserialize<R: io::Read>(mut reader: R) -> Result<Self, SerializationError> {
        let mut bytes = [0; NOTE_CIPHERTEXT_SIZE];
        reader.read_exact(&mut bytes[..])?;
        Ok(Self(bytes))
    }
}
