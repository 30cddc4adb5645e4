//! Strongly-typed zatoshi amounts that prevent under/overflows.
//!
//! Sprout note values and the `vpub_old`/`vpub_new` fields of a JoinSplit are
//! unsigned, so [`Amount`] only represents non-negative values. Arithmetic on
//! [`Amount`]s returns [`Result`](std::result::Result)s instead of wrapping.

use std::{fmt, io, ops::RangeInclusive};

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::serialization::{SerializationError, ZcashDeserialize, ZcashSerialize};

#[cfg(any(test, feature = "proptest-impl"))]
mod arbitrary;

#[cfg(test)]
mod tests;

/// The number of zatoshis in one coin.
pub const COIN: u64 = 100_000_000;

/// The maximum zatoshi amount.
///
/// Every note value, every `vpub` value, and both sides of a JoinSplit
/// balance must be in `0..=MAX_MONEY`.
pub const MAX_MONEY: u64 = 21_000_000 * COIN;

/// The result of an amount operation.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A runtime validated type for representing non-negative amounts of zatoshis.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64")]
#[serde(into = "u64")]
pub struct Amount(u64);

impl Amount {
    /// The range of valid zatoshi values.
    pub const VALID_RANGE: RangeInclusive<u64> = 0..=MAX_MONEY;

    /// Create a zero `Amount`.
    pub const fn zero() -> Amount {
        Amount(0)
    }

    /// Returns the number of zatoshis in this amount.
    pub fn zatoshis(&self) -> u64 {
        self.0
    }

    /// Returns true if this amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Convert this amount to its little-endian byte representation.
    pub fn to_bytes(&self) -> [u8; 8] {
        let mut buf: [u8; 8] = [0; 8];
        LittleEndian::write_u64(&mut buf, self.0);
        buf
    }

    /// Parse an amount from its little-endian byte representation.
    pub fn from_bytes(bytes: [u8; 8]) -> Result<Amount> {
        LittleEndian::read_u64(&bytes).try_into()
    }
}

impl std::ops::Add<Amount> for Amount {
    type Output = Result<Amount>;

    fn add(self, rhs: Amount) -> Self::Output {
        let value = self.0.checked_add(rhs.0).ok_or(Error::AdditionOverflow {
            lhs: self.0,
            rhs: rhs.0,
        })?;
        value.try_into()
    }
}

impl std::ops::Add<Amount> for Result<Amount> {
    type Output = Result<Amount>;

    fn add(self, rhs: Amount) -> Self::Output {
        self? + rhs
    }
}

impl std::ops::AddAssign<Amount> for Result<Amount> {
    fn add_assign(&mut self, rhs: Amount) {
        if let Ok(lhs) = *self {
            *self = lhs + rhs;
        }
    }
}

impl std::iter::Sum<Amount> for Result<Amount> {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Ok(Amount::zero()), |acc, amount| acc + amount)
    }
}

impl<'amt> std::iter::Sum<&'amt Amount> for Result<Amount> {
    fn sum<I: Iterator<Item = &'amt Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl TryFrom<u64> for Amount {
    type Error = Error;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if Self::VALID_RANGE.contains(&value) {
            Ok(Amount(value))
        } else {
            Err(Error::Constraint {
                value,
                range: Self::VALID_RANGE,
            })
        }
    }
}

impl From<Amount> for u64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "", &self.0.to_string())
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Amount").field(&self.0).finish()
    }
}

impl ZcashSerialize for Amount {
    fn zcash_serialize<W: io::Write>(&self, mut writer: W) -> Result<(), io::Error> {
        writer.write_u64::<LittleEndian>(self.0)
    }
}

impl ZcashDeserialize for Amount {
    fn zcash_deserialize<R: io::Read>(mut reader: R) -> Result<Self, SerializationError> {
        Ok(reader.read_u64::<LittleEndian>()?.try_into()?)
    }
}

/// Errors that can be returned when validating `Amount`s
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Error {
    #[error("input {value} is outside of valid range for zatoshi Amount, valid_range={range:?}")]
    Constraint {
        value: u64,
        range: RangeInclusive<u64>,
    },

    #[error("u64 overflow when adding zatoshi amounts {lhs} + {rhs}")]
    AdditionOverflow { lhs: u64, rhs: u64 },
}
