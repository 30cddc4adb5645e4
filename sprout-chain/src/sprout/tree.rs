//! The Sprout note commitment tree.
//!
//! Every Sprout output commitment is appended to a single append-only Merkle
//! tree of depth [`MERKLE_DEPTH`]. A JoinSplit proves that its inputs are
//! leaves of the tree under some earlier root, its anchor.
//!
//! This module only keeps the frontier needed to compute roots. Paths for
//! older anchors come from a [`WitnessSource`], such as the in-memory
//! [`NoteCommitmentLog`].

use std::fmt;

use incrementalmerkletree::{frontier::Frontier, Hashable, Level};
use lazy_static::lazy_static;
use thiserror::Error;

use super::{commitment::NoteCommitment, prf::sha256_compress};

mod log;
mod witness;

pub use log::{NoteCommitmentLog, WitnessSource};
pub use witness::{Witness, WitnessError, WITNESS_PATH_SIZE};

#[cfg(any(test, feature = "proptest-impl"))]
use proptest_derive::Arbitrary;

/// The depth of the Sprout note commitment tree.
///
/// <https://zips.z.cash/protocol/protocol.pdf#constants>
pub const MERKLE_DEPTH: u8 = 29;

/// The empty leaf, `Uncommitted^Sprout`.
const UNCOMMITTED: [u8; 32] = [0; 32];

/// [MerkleCRH^Sprout], `SHA256Compress(left || right)`.
///
/// The layer argument of the definition does not change the output, so it is
/// omitted.
///
/// [MerkleCRH^Sprout]: https://zips.z.cash/protocol/protocol.pdf#merklecrh
pub(crate) fn merkle_crh_sprout(left: [u8; 32], right: [u8; 32]) -> [u8; 32] {
    let mut block = [0u8; 64];
    block[..32].copy_from_slice(&left);
    block[32..].copy_from_slice(&right);

    sha256_compress(&block)
}

lazy_static! {
    /// The roots of empty subtrees, indexed by layer: 0 is the root of the
    /// empty tree, `MERKLE_DEPTH` is the empty leaf.
    pub static ref EMPTY_ROOTS: Vec<[u8; 32]> = {
        let mut roots = vec![UNCOMMITTED; usize::from(MERKLE_DEPTH) + 1];

        for layer in (0..usize::from(MERKLE_DEPTH)).rev() {
            roots[layer] = merkle_crh_sprout(roots[layer + 1], roots[layer + 1]);
        }

        roots
    };
}

/// The root of an empty subtree `height` layers above the leaves.
pub(crate) fn empty_node(height: usize) -> [u8; 32] {
    EMPTY_ROOTS[usize::from(MERKLE_DEPTH) - height]
}

/// A root of the Sprout note commitment tree, used as a JoinSplit anchor.
#[derive(Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize, Hash)]
#[cfg_attr(any(test, feature = "proptest-impl"), derive(Arbitrary))]
pub struct Root([u8; 32]);

impl fmt::Debug for Root {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Root").field(&hex::encode(self.0)).finish()
    }
}

impl From<[u8; 32]> for Root {
    fn from(bytes: [u8; 32]) -> Root {
        Self(bytes)
    }
}

impl From<Root> for [u8; 32] {
    fn from(root: Root) -> [u8; 32] {
        root.0
    }
}

impl From<&Root> for [u8; 32] {
    fn from(root: &Root) -> Self {
        root.0
    }
}

/// A node of the Sprout note commitment tree.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Node(pub(crate) [u8; 32]);

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Node").field(&hex::encode(self.0)).finish()
    }
}

impl Hashable for Node {
    fn empty_leaf() -> Self {
        Self(UNCOMMITTED)
    }

    fn combine(_level: Level, a: &Self, b: &Self) -> Self {
        Self(merkle_crh_sprout(a.0, b.0))
    }

    fn empty_root(level: Level) -> Self {
        Self(empty_node(usize::from(u8::from(level))))
    }
}

impl From<NoteCommitment> for Node {
    fn from(cm: NoteCommitment) -> Self {
        Node(cm.into())
    }
}

#[derive(Error, Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[allow(missing_docs)]
pub enum NoteCommitmentTreeError {
    #[error("the Sprout note commitment tree is full")]
    FullTree,
}

/// The frontier of the [Sprout note commitment tree][tree].
///
/// Appending is rejected once the tree holds 2^29 commitments.
///
/// [tree]: https://zips.z.cash/protocol/protocol.pdf#merkletree
#[derive(Clone, Debug, PartialEq)]
pub struct NoteCommitmentTree {
    inner: Frontier<Node, MERKLE_DEPTH>,
}

impl NoteCommitmentTree {
    /// Appends a note commitment to the tree.
    pub fn append(&mut self, cm: NoteCommitment) -> Result<(), NoteCommitmentTreeError> {
        if self.inner.append(cm.into()) {
            Ok(())
        } else {
            Err(NoteCommitmentTreeError::FullTree)
        }
    }

    /// The current root of the tree.
    pub fn root(&self) -> Root {
        Root(self.inner.root().0)
    }

    /// The number of note commitments in the tree.
    pub fn count(&self) -> u64 {
        self.inner
            .value()
            .map_or(0, |leaf| u64::from(leaf.position()) + 1)
    }
}

impl Default for NoteCommitmentTree {
    fn default() -> Self {
        Self {
            inner: Frontier::empty(),
        }
    }
}

impl Eq for NoteCommitmentTree {}

impl TryFrom<Vec<NoteCommitment>> for NoteCommitmentTree {
    type Error = NoteCommitmentTreeError;

    fn try_from(commitments: Vec<NoteCommitment>) -> Result<Self, Self::Error> {
        let mut tree = Self::default();

        for cm in commitments {
            tree.append(cm)?;
        }

        Ok(tree)
    }
}
