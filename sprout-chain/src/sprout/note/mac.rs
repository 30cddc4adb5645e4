use std::io::{self, Read};

use crate::serialization::{ReadZcashExt, SerializationError, ZcashDeserialize, ZcashSerialize};

use super::super::{joinsplit::HSig, keys::SpendingKey, prf::prf_pk};

/// A message authentication tag binding h_sig to one a_sk of the JoinSplit
/// description, computed as described in § 4.10 ‘Non-malleability (Sprout)’
/// on p. 37
#[derive(Copy, PartialEq, Eq, Clone, Debug, Hash, Serialize, Deserialize)]
#[cfg_attr(
    any(test, feature = "proptest-impl"),
    derive(proptest_derive::Arbitrary)
)]
pub struct Mac([u8; 32]);

impl Mac {
    /// h_i = PRF^pk_a_sk_i(i, h_sig), for the zero-based input `index`.
    pub fn new(spending_key: &SpendingKey, index: usize, h_sig: &HSig) -> Mac {
        Mac(prf_pk(&spending_key.into(), index, &h_sig.into()))
    }
}

impl From<[u8; 32]> for Mac {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<&Mac> for [u8; 32] {
    fn from(mac: &Mac) -> Self {
        mac.0
    }
}

impl From<Mac> for [u8; 32] {
    fn from(mac: Mac) -> Self {
        mac.0
    }
}

impl ZcashDeserialize for Mac {
    fn zcash_deserialize<R: Read>(mut reader: R) -> Result<Self, SerializationError> {
        let bytes = reader.read_32_bytes()?;

        Ok(Self(bytes))
    }
}

impl ZcashSerialize for Mac {
    fn zcash_serialize<W: io::Write>(&self, mut writer: W) -> Result<(), io::Error> {
        writer.write_all(&self.0[..])
    }
}
