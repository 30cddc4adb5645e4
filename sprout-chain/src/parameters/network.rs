//! Constants for each network.

use std::{fmt, str::FromStr};

use thiserror::Error;

#[cfg(any(test, feature = "proptest-impl"))]
use proptest_derive::Arbitrary;

#[cfg(test)]
mod tests;

/// An enum describing the possible network choices.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "proptest-impl"), derive(Arbitrary))]
pub enum Network {
    /// The production mainnet.
    #[default]
    Mainnet,

    /// The public test network.
    Testnet,

    /// A local regression test network.
    Regtest,
}

/// A magic number identifying the network.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(any(test, feature = "proptest-impl"), derive(Arbitrary))]
pub struct Magic(pub [u8; 4]);

impl fmt::Debug for Magic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Magic").field(&hex::encode(self.0)).finish()
    }
}

/// Magic numbers used to identify different networks.
pub mod magics {
    use super::*;
    /// The production mainnet.
    pub const MAINNET: Magic = Magic([0x24, 0xe9, 0x27, 0x64]);
    /// The testnet.
    pub const TESTNET: Magic = Magic([0xfa, 0x1a, 0xf9, 0xbf]);
    /// The regtest network.
    pub const REGTEST: Magic = Magic([0xaa, 0xe8, 0x3f, 0x5f]);
}

/// A hard-coded Sprout value pool balance, for nodes that have not
/// re-indexed their chain state since value pool monitoring was added.
///
/// See [ZIP-209](https://zips.z.cash/zip-0209).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SproutValuePoolCheckpoint {
    /// The height of the checkpoint block.
    pub height: u32,
    /// The Sprout pool balance at that block, in zatoshis.
    pub balance: u64,
    /// The checkpoint block hash, in RPC display order.
    pub hash: &'static str,
}

/// The constants of a single network.
///
/// Hashes are stored as hex strings in RPC display (byte-reversed) order,
/// the same order `getblockhash` prints them in.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NetworkParameters {
    /// The BIP70 network id.
    pub network_id: &'static str,
    /// The ticker of the network's currency.
    pub currency_units: &'static str,
    /// The BIP44 coin type.
    pub bip44_coin_type: u32,
    /// The P2P message start bytes.
    pub magic: Magic,
    /// The default P2P port.
    pub default_port: u16,
    /// The genesis block hash, when it is fixed for the network.
    pub genesis_hash: Option<&'static str>,
    /// Hard-coded `(height, hash)` checkpoints, in height order.
    pub checkpoints: &'static [(u32, &'static str)],
    /// The Base58Check prefix of Sprout payment addresses.
    pub sprout_address_prefix: [u8; 2],
    /// The Base58Check prefix of Sprout incoming viewing keys.
    pub sprout_viewing_key_prefix: [u8; 3],
    /// The Base58Check prefix of Sprout spending keys.
    pub sprout_spending_key_prefix: [u8; 2],
    /// The ZIP-209 Sprout value pool checkpoint, if the network has one.
    pub sprout_value_pool_checkpoint: Option<SproutValuePoolCheckpoint>,
}

const MAINNET_GENESIS_HASH: &str =
    "942b9449756c3f4d949c50358358de6a4f14f7d8b2b8bfd33ba5b7dcc0b9373b";

const MAINNET_CHECKPOINTS: &[(u32, &str)] = &[
    (0, MAINNET_GENESIS_HASH),
    (
        2500,
        "0002f370170188a0649583b93a5af30e30022936ae5e43b15a39c1f4a7547aa2",
    ),
    (
        6000,
        "00000078dc22f3b307b80a74dd1b001fda29f0d23661585506053c8bce4c4162",
    ),
    (
        10000,
        "000000a1231c242c8a542f200686b7c49b7cd4b745c6658cae028a57f9aa39e8",
    ),
    (
        19500,
        "000000284fb4980f0a6cf9a51474e7e9dd9d91d2c5fbe5ebc884aafe66ddab83",
    ),
    (
        35000,
        "0000003c6e4d945a16077570789560a1d48c5abe5f7a93fb8f325670e9c504d8",
    ),
    (
        50000,
        "0000002bb9cf35614ae5e8a74dcf290a8c2d3336808b0b3eb5a273c8ece5f185",
    ),
    (
        75000,
        "000000e1189970c59df3072e28686bc76d3fd59e03f972a9257f05b16ee4d49d",
    ),
    (
        100000,
        "0000030beebdfeaa0919584d0ee9434d63f2693b6d7e5b3c0fc1e8e066dc7982",
    ),
    (
        125000,
        "0000005084851cd551ae89aee69a5cdd5765387847e65adc464f4fd4011f0959",
    ),
    (
        150000,
        "00000057ebf48db571d7402697693a895b772f63a0120f486e0f7c70e8dfe69c",
    ),
    (
        175000,
        "0000001d7c57b8142d299bbaf221ddefe8295d5e57af0130782fea29d30724d8",
    ),
    (
        184850,
        "000000222b32827c0e19f9b68e5df5ae365cb9b48d4381718f6aa62174bdb833",
    ),
    (
        257470,
        "000001b81d97c59bf87a06b5ca32d2f3be8ebef3cda9b07055a4f2ab4f8b1847",
    ),
    (
        263300,
        "00000257317a362097ccffa4b48bccdc290ed877f7fd735ae9a4fddbf04e0be5",
    ),
];

const MAINNET: NetworkParameters = NetworkParameters {
    network_id: "main",
    currency_units: "BUCK",
    bip44_coin_type: 147,
    magic: magics::MAINNET,
    default_port: 5749,
    genesis_hash: Some(MAINNET_GENESIS_HASH),
    checkpoints: MAINNET_CHECKPOINTS,
    sprout_address_prefix: [0x16, 0x9A],
    sprout_viewing_key_prefix: [0xA8, 0xAB, 0xD3],
    sprout_spending_key_prefix: [0xAB, 0x36],
    sprout_value_pool_checkpoint: Some(SproutValuePoolCheckpoint {
        height: 348_655,
        balance: 1_603_796_786_971_170,
        hash: "00000014ed1ebcb3fc7a33a985c12fd2134931f7813d386f0f8318e0db66d3cc",
    }),
};

// The test networks derive their genesis block at startup, so no hash is fixed.
const TESTNET: NetworkParameters = NetworkParameters {
    network_id: "test",
    currency_units: "TBK",
    bip44_coin_type: 1,
    magic: magics::TESTNET,
    default_port: 15749,
    genesis_hash: None,
    checkpoints: &[],
    sprout_address_prefix: [0x16, 0xB6],
    sprout_viewing_key_prefix: [0xA8, 0xAC, 0x0C],
    sprout_spending_key_prefix: [0xAC, 0x08],
    sprout_value_pool_checkpoint: Some(SproutValuePoolCheckpoint {
        height: 440_329,
        balance: 40_000_029_096_803,
        hash: "000a95d08ba5dcbabe881fc6471d11807bcca7df5f1795c99f3ec4580db4279b",
    }),
};

// Regtest shares the testnet key prefixes.
const REGTEST: NetworkParameters = NetworkParameters {
    network_id: "regtest",
    currency_units: "REG",
    bip44_coin_type: 1,
    magic: magics::REGTEST,
    default_port: 15749,
    genesis_hash: None,
    checkpoints: &[],
    sprout_address_prefix: TESTNET.sprout_address_prefix,
    sprout_viewing_key_prefix: TESTNET.sprout_viewing_key_prefix,
    sprout_spending_key_prefix: TESTNET.sprout_spending_key_prefix,
    sprout_value_pool_checkpoint: None,
};

impl From<Network> for &'static str {
    fn from(network: Network) -> &'static str {
        match network {
            Network::Mainnet => "Mainnet",
            Network::Testnet => "Testnet",
            Network::Regtest => "Regtest",
        }
    }
}

impl From<&Network> for &'static str {
    fn from(network: &Network) -> &'static str {
        (*network).into()
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.into())
    }
}

impl Network {
    /// Returns an iterator over [`Network`] variants.
    pub fn iter() -> impl Iterator<Item = Self> {
        [Self::Mainnet, Self::Testnet, Self::Regtest].into_iter()
    }

    /// Returns the constants for this network.
    pub fn parameters(&self) -> &'static NetworkParameters {
        match self {
            Network::Mainnet => &MAINNET,
            Network::Testnet => &TESTNET,
            Network::Regtest => &REGTEST,
        }
    }

    /// Get the default port associated to this network.
    pub fn default_port(&self) -> u16 {
        self.parameters().default_port
    }

    /// Get the magic value associated to this network.
    pub fn magic_value(&self) -> Magic {
        self.parameters().magic
    }

    /// Return the network name as defined in
    /// [BIP70](https://github.com/bitcoin/bips/blob/master/bip-0070.mediawiki#paymentdetailspaymentrequest)
    pub fn bip70_network_name(&self) -> String {
        self.parameters().network_id.to_string()
    }

    /// Return the lowercase network name.
    pub fn lowercase_name(&self) -> String {
        self.to_string().to_ascii_lowercase()
    }

    /// Returns `true` if this network is a testing network.
    pub fn is_a_test_network(&self) -> bool {
        *self != Network::Mainnet
    }

    /// Returns the hash of the last hard-coded checkpoint at or below `height`.
    pub fn checkpoint_at_or_below(&self, height: u32) -> Option<(u32, &'static str)> {
        self.parameters()
            .checkpoints
            .iter()
            .rev()
            .find(|(checkpoint_height, _)| *checkpoint_height <= height)
            .copied()
    }
}

impl FromStr for Network {
    type Err = InvalidNetworkError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string.to_lowercase().as_str() {
            "mainnet" | "main" => Ok(Network::Mainnet),
            "testnet" | "test" => Ok(Network::Testnet),
            "regtest" => Ok(Network::Regtest),
            _ => Err(InvalidNetworkError(string.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Error)]
#[error("Invalid network: {0}")]
#[allow(missing_docs)]
pub struct InvalidNetworkError(String);
