//! Sprout key types.
//!
//! "The receiving key sk_enc, the incoming viewing key ivk = (a_pk,
//! sk_enc), and the shielded payment address addr_pk = (a_pk, pk_enc) are
//! derived from a_sk, as described in ['Sprout Key Components'][ps]
//!
//! Keys are derived on demand and never persisted by this crate.
//!
//! [ps]: https://zips.z.cash/protocol/protocol.pdf#sproutkeycomponents

use std::fmt;

use rand_core::{CryptoRng, RngCore};
use thiserror::Error;

use crate::primitives::x25519;

use super::prf::prf_addr;

#[cfg(any(test, feature = "proptest-impl"))]
use proptest::prelude::*;

/// Errors when building keys from untrusted bytes.
#[derive(Error, Copy, Clone, Debug, Eq, PartialEq)]
pub enum KeyError {
    /// The four most significant bits of a spending key must be zero.
    #[error("spending key is wider than 252 bits")]
    SpendingKeyTooWide,
}

/// Our root secret key of the Sprout key derivation tree.
///
/// All other Sprout key types derive from the [`SpendingKey`] value.
/// Actually 252 bits: the four high bits of the first byte are always zero.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct SpendingKey(pub(crate) [u8; 32]);

impl SpendingKey {
    /// Generate a new _SpendingKey_ with the high 4 bits of the first
    /// byte zero'd out.
    ///
    /// <https://zips.z.cash/protocol/protocol.pdf#sproutkeycomponents>
    pub fn new<T>(csprng: &mut T) -> Self
    where
        T: RngCore + CryptoRng,
    {
        let mut bytes = [0u8; 32];
        csprng.fill_bytes(&mut bytes);

        Self::from(bytes)
    }

    /// Derives the paying key `a_pk` of this spending key.
    pub fn paying_key(&self) -> PayingKey {
        PayingKey::from(self)
    }

    /// Derives the receiving key `sk_enc` of this spending key.
    pub fn receiving_key(&self) -> ReceivingKey {
        ReceivingKey::from(self)
    }

    /// Derives the shielded payment address `(a_pk, pk_enc)` of this spending key.
    pub fn address(&self) -> PaymentAddress {
        PaymentAddress::from(self)
    }

    /// Derives the incoming viewing key `(a_pk, sk_enc)` of this spending key.
    pub fn incoming_viewing_key(&self) -> IncomingViewingKey {
        IncomingViewingKey::from(self)
    }

    /// Parse a spending key, rejecting keys wider than 252 bits.
    pub fn try_from_bytes(bytes: [u8; 32]) -> Result<Self, KeyError> {
        if bytes[0] & 0xf0 != 0 {
            return Err(KeyError::SpendingKeyTooWide);
        }

        Ok(Self(bytes))
    }
}

impl fmt::Debug for SpendingKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("SpendingKey").field(&"..").finish()
    }
}

impl From<[u8; 32]> for SpendingKey {
    /// Generate a _SpendingKey_ from existing bytes, with the high 4
    /// bits of the first byte zero'd out.
    fn from(mut bytes: [u8; 32]) -> SpendingKey {
        bytes[0] &= 0b0000_1111; // Force the 4 high-order bits to zero.
        SpendingKey(bytes)
    }
}

impl From<SpendingKey> for [u8; 32] {
    fn from(spending_key: SpendingKey) -> [u8; 32] {
        spending_key.0
    }
}

impl From<&SpendingKey> for [u8; 32] {
    fn from(spending_key: &SpendingKey) -> [u8; 32] {
        spending_key.0
    }
}

/// A Sprout _paying key_.
///
/// Derived from a Sprout _spending key_.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[cfg_attr(
    any(test, feature = "proptest-impl"),
    derive(proptest_derive::Arbitrary)
)]
pub struct PayingKey(pub [u8; 32]);

impl AsRef<[u8]> for PayingKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for PayingKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("PayingKey")
            .field(&hex::encode(self.0))
            .finish()
    }
}

impl From<&SpendingKey> for PayingKey {
    /// a_pk := PRF^addr_a_sk(0)
    fn from(spending_key: &SpendingKey) -> PayingKey {
        PayingKey(prf_addr(&spending_key.0, 0))
    }
}

/// Derived from a _SpendingKey_, used to decrypt notes sent to the
/// matching payment address.
#[derive(Clone)]
pub struct ReceivingKey(pub(crate) x25519::StaticSecret);

impl ReceivingKey {
    /// The clamped `sk_enc` bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// Builds a receiving key from `sk_enc` bytes, clamping them.
    pub fn from_bytes(bytes: [u8; 32]) -> ReceivingKey {
        ReceivingKey(x25519::StaticSecret::from(clamp_curve25519(bytes)))
    }
}

impl fmt::Debug for ReceivingKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("ReceivingKey").field(&"..").finish()
    }
}

impl PartialEq for ReceivingKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for ReceivingKey {}

/// Clamps a Curve25519 secret scalar.
fn clamp_curve25519(mut bytes: [u8; 32]) -> [u8; 32] {
    bytes[0] &= 248;
    bytes[31] &= 127;
    bytes[31] |= 64;
    bytes
}

impl From<&SpendingKey> for ReceivingKey {
    /// sk_enc := clamp_Curve25519(PRF^addr_a_sk(1))
    fn from(spending_key: &SpendingKey) -> ReceivingKey {
        ReceivingKey::from_bytes(prf_addr(&spending_key.0, 1))
    }
}

/// The public half of a _ReceivingKey_, `pk_enc`.
pub type TransmissionKey = x25519::PublicKey;

/// Derives the transmission key `pk_enc` from a receiving key.
pub fn transmission_key(receiving_key: &ReceivingKey) -> TransmissionKey {
    TransmissionKey::from(&receiving_key.0)
}

/// Sprout Incoming Viewing Keys
///
/// Can decrypt every note sent to the matching payment address,
/// but cannot spend them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IncomingViewingKey {
    /// The paying key of the matching address.
    pub paying_key: PayingKey,
    /// The receiving key used to decrypt notes.
    pub receiving_key: ReceivingKey,
}

impl IncomingViewingKey {
    /// Derives the payment address this key can view.
    pub fn address(&self) -> PaymentAddress {
        PaymentAddress {
            paying_key: self.paying_key,
            transmission_key: transmission_key(&self.receiving_key),
        }
    }
}

impl From<&SpendingKey> for IncomingViewingKey {
    fn from(spending_key: &SpendingKey) -> IncomingViewingKey {
        IncomingViewingKey {
            paying_key: spending_key.into(),
            receiving_key: spending_key.into(),
        }
    }
}

/// A Sprout shielded payment address, `(a_pk, pk_enc)`.
///
/// See [`address`](super::address) for the Base58Check encodings.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct PaymentAddress {
    /// The recipient's paying key, bound into note commitments.
    pub paying_key: PayingKey,
    /// The recipient's key agreement public key, used for note encryption.
    pub transmission_key: TransmissionKey,
}

impl fmt::Debug for PaymentAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PaymentAddress")
            .field("paying_key", &self.paying_key)
            .field(
                "transmission_key",
                &hex::encode(self.transmission_key.as_bytes()),
            )
            .finish()
    }
}

impl From<&SpendingKey> for PaymentAddress {
    fn from(spending_key: &SpendingKey) -> PaymentAddress {
        IncomingViewingKey::from(spending_key).address()
    }
}

#[cfg(any(test, feature = "proptest-impl"))]
impl Arbitrary for SpendingKey {
    type Parameters = ();

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        any::<[u8; 32]>().prop_map(SpendingKey::from).boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}

#[cfg(test)]
mod tests {
    use rand_core::OsRng;

    use super::*;

    #[test]
    fn spending_key_is_252_bits() {
        let _init_guard = sprout_test::init();

        let spending_key = SpendingKey::from([0xff; 32]);
        assert_eq!(<[u8; 32]>::from(spending_key)[0], 0x0f);

        assert_eq!(
            SpendingKey::try_from_bytes([0xff; 32]),
            Err(KeyError::SpendingKeyTooWide)
        );
        assert_eq!(
            SpendingKey::try_from_bytes([0x0f; 32]),
            Ok(SpendingKey([0x0f; 32]))
        );
    }

    #[test]
    fn receiving_key_is_clamped() {
        let _init_guard = sprout_test::init();

        let sk_enc = SpendingKey::new(&mut OsRng).receiving_key().to_bytes();

        assert_eq!(sk_enc[0] & 7, 0);
        assert_eq!(sk_enc[31] & 128, 0);
        assert_eq!(sk_enc[31] & 64, 64);
    }

    #[test]
    fn derivation_vectors() {
        let _init_guard = sprout_test::init();

        let spending_key = SpendingKey::from([0u8; 32]);

        assert_eq!(
            hex::encode(spending_key.paying_key().0),
            PAYING_KEY_OF_ZERO_SPENDING_KEY,
        );
        assert_eq!(
            hex::encode(spending_key.receiving_key().to_bytes()),
            RECEIVING_KEY_OF_ZERO_SPENDING_KEY,
        );

        let mut bytes: [u8; 32] = std::array::from_fn(|i| i as u8);
        bytes[0] = 0x0b;
        let spending_key = SpendingKey::from(bytes);

        assert_eq!(
            hex::encode(spending_key.paying_key().0),
            "b53f815a01fb29ced954477819c76f976864695a63f756a22949214f9865148c",
        );
        assert_eq!(
            hex::encode(spending_key.receiving_key().to_bytes()),
            "70ef39a8846d03379a1384d89d50f398a4c1d4a72c92906a220c8fe9d2b60b56",
        );
    }

    #[test]
    fn viewing_key_views_its_address() {
        let _init_guard = sprout_test::init();

        let spending_key = SpendingKey::new(&mut OsRng);

        assert_eq!(
            spending_key.incoming_viewing_key().address(),
            spending_key.address()
        );
    }

    /// `PRF^addr(0, 0)`
    const PAYING_KEY_OF_ZERO_SPENDING_KEY: &str =
        "d402118d6839437d00dded68d27c39093e825d4dc2757558e490973bbff262df";

    /// `clamp(PRF^addr(0, 1))`
    const RECEIVING_KEY_OF_ZERO_SPENDING_KEY: &str =
        "60d3e028d7d02b8e30f9c2894cadf7712d4034b47ee8903b85607c0cc3755650";
}
