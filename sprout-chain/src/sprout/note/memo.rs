use std::{cmp, fmt};

use serde_big_array::BigArray;

/// The size of a Sprout memo field.
pub const MEMO_SIZE: usize = 512;

/// A 512-byte _Memo_ field associated with a note, as described in
/// [protocol specification §5.5][ps].
///
/// The _Memo_ field of a note is a plaintext type; the parent note is
/// what is encrypted and stored on the blockchain.
///
/// [ps]: https://zips.z.cash/protocol/protocol.pdf#notept
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Memo(#[serde(with = "BigArray")] pub(crate) [u8; MEMO_SIZE]);

impl Memo {
    /// The memo bytes.
    pub fn as_bytes(&self) -> &[u8; MEMO_SIZE] {
        &self.0
    }

    /// Returns true if this memo is the "no memo" marker.
    pub fn is_empty(&self) -> bool {
        *self == Memo::default()
    }
}

impl Default for Memo {
    /// 0xF6 followed by zeros, meaning "no memo".
    fn default() -> Self {
        let mut bytes = [0u8; MEMO_SIZE];
        bytes[0] = 0xF6;
        Memo(bytes)
    }
}

impl From<[u8; MEMO_SIZE]> for Memo {
    fn from(bytes: [u8; MEMO_SIZE]) -> Self {
        Memo(bytes)
    }
}

impl<'a> TryFrom<&'a [u8]> for Memo {
    type Error = &'static str;

    /// Pads `input` with zeros, failing if it is longer than a memo.
    fn try_from(input: &'a [u8]) -> Result<Self, Self::Error> {
        let mut full_bytes = [0; MEMO_SIZE];

        match input.len().cmp(&MEMO_SIZE) {
            cmp::Ordering::Greater => Err("Memos have a max length of 512 bytes."),
            _ => {
                full_bytes[0..input.len()].copy_from_slice(input);
                Ok(Memo(full_bytes))
            }
        }
    }
}

impl fmt::Debug for Memo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let output = if self.is_empty() {
            "(no memo)".to_string()
        } else {
            // The memo is interpreted as UTF-8 when it is printable.
            match std::str::from_utf8(&self.0) {
                Ok(memo) => memo.trim_end_matches('\0').to_string(),
                _ => hex::encode(&self.0[..]),
            }
        };

        f.debug_tuple("Memo").field(&output).finish()
    }
}
