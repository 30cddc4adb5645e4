//! Base58Check encodings of Sprout shielded payment addresses and keys.
//!
//! In Bitcoin a single byte is used for the version field identifying
//! the address type. Sprout uses two bytes for addresses and spending keys,
//! and three for viewing keys, chosen so that the first characters of the
//! encoding are fixed (`zc`, `ZiVK`, `SK` on mainnet).
//!
//! The test networks share one set of prefixes, so decoding a test network
//! string always yields [`Network::Testnet`].
//!
//! <https://zips.z.cash/protocol/protocol.pdf#sproutpaymentaddrencoding>

use std::{fmt, io, str::FromStr};

use crate::{
    parameters::{Network, NetworkParameters},
    serialization::{ReadZcashExt, SerializationError},
};

use super::keys::{
    IncomingViewingKey, PayingKey, PaymentAddress, ReceivingKey, SpendingKey, TransmissionKey,
};

/// A payload with a per-network Base58Check version prefix.
trait Base58Payload: Sized {
    /// Human readable name, used in parse errors.
    const NAME: &'static str;

    fn prefix(params: &'static NetworkParameters) -> &'static [u8];

    fn write_payload(&self, bytes: &mut Vec<u8>);

    fn read_payload<R: io::Read>(reader: R) -> Result<Self, SerializationError>;
}

fn encode<T: Base58Payload>(network: Network, payload: &T) -> String {
    let mut bytes = T::prefix(network.parameters()).to_vec();
    payload.write_payload(&mut bytes);

    bs58::encode(bytes).with_check().into_string()
}

fn decode<T: Base58Payload>(s: &str) -> Result<(Network, T), SerializationError> {
    let bytes = bs58::decode(s)
        .with_check(None)
        .into_vec()
        .map_err(|_| SerializationError::Parse("invalid Base58Check encoding"))?;

    for network in [Network::Mainnet, Network::Testnet] {
        let prefix = T::prefix(network.parameters());

        if let Some(mut payload) = bytes.strip_prefix(prefix) {
            let parsed = T::read_payload(&mut payload)?;

            if !payload.is_empty() {
                return Err(SerializationError::Parse("trailing bytes after Sprout key"));
            }

            return Ok((network, parsed));
        }
    }

    tracing::debug!(kind = T::NAME, "unknown Base58Check version prefix");

    Err(SerializationError::Parse("bad Sprout version prefix"))
}

impl Base58Payload for PaymentAddress {
    const NAME: &'static str = "payment address";

    fn prefix(params: &'static NetworkParameters) -> &'static [u8] {
        &params.sprout_address_prefix[..]
    }

    fn write_payload(&self, bytes: &mut Vec<u8>) {
        bytes.extend_from_slice(&self.paying_key.0[..]);
        bytes.extend_from_slice(self.transmission_key.as_bytes());
    }

    fn read_payload<R: io::Read>(mut reader: R) -> Result<Self, SerializationError> {
        Ok(PaymentAddress {
            paying_key: PayingKey(reader.read_32_bytes()?),
            transmission_key: TransmissionKey::from(reader.read_32_bytes()?),
        })
    }
}

impl Base58Payload for IncomingViewingKey {
    const NAME: &'static str = "incoming viewing key";

    fn prefix(params: &'static NetworkParameters) -> &'static [u8] {
        &params.sprout_viewing_key_prefix[..]
    }

    fn write_payload(&self, bytes: &mut Vec<u8>) {
        bytes.extend_from_slice(&self.paying_key.0[..]);
        bytes.extend_from_slice(&self.receiving_key.to_bytes());
    }

    fn read_payload<R: io::Read>(mut reader: R) -> Result<Self, SerializationError> {
        Ok(IncomingViewingKey {
            paying_key: PayingKey(reader.read_32_bytes()?),
            receiving_key: ReceivingKey::from_bytes(reader.read_32_bytes()?),
        })
    }
}

impl Base58Payload for SpendingKey {
    const NAME: &'static str = "spending key";

    fn prefix(params: &'static NetworkParameters) -> &'static [u8] {
        &params.sprout_spending_key_prefix[..]
    }

    fn write_payload(&self, bytes: &mut Vec<u8>) {
        bytes.extend_from_slice(&<[u8; 32]>::from(self));
    }

    fn read_payload<R: io::Read>(mut reader: R) -> Result<Self, SerializationError> {
        SpendingKey::try_from_bytes(reader.read_32_bytes()?)
            .map_err(|_| SerializationError::Parse("spending key is wider than 252 bits"))
    }
}

macro_rules! network_encoded {
    ($(#[$meta:meta])* $name:ident, $field:ident: $inner:ty) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Eq, PartialEq)]
        pub struct $name {
            /// The network this key is encoded for.
            pub network: Network,
            #[allow(missing_docs)]
            pub $field: $inner,
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(&encode(self.network, &self.$field))
            }
        }

        impl FromStr for $name {
            type Err = SerializationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let (network, $field) = decode(s)?;

                Ok($name { network, $field })
            }
        }
    };
}

network_encoded!(
    /// A Sprout shielded payment address, with its Base58Check network prefix.
    SproutShieldedAddress,
    address: PaymentAddress
);

network_encoded!(
    /// A Sprout incoming viewing key, with its Base58Check network prefix.
    SproutViewingKey,
    viewing_key: IncomingViewingKey
);

network_encoded!(
    /// A Sprout spending key, with its Base58Check network prefix.
    SproutSpendingKey,
    spending_key: SpendingKey
);
