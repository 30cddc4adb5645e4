//! Authentication paths for Sprout note commitments.

use thiserror::Error;

use super::{
    super::commitment::NoteCommitment, empty_node, merkle_crh_sprout, Node, Root, MERKLE_DEPTH,
};

/// The size of the legacy `zcashd` encoding of an authentication path:
/// the depth, a length-prefixed sibling per layer, and the leaf position.
pub const WITNESS_PATH_SIZE: usize = 1 + 33 * MERKLE_DEPTH as usize + 8;

/// Errors returned when a witness can't be produced.
#[derive(Error, Copy, Clone, Debug, Eq, PartialEq)]
pub enum WitnessError {
    /// The anchor is not a root of the tree at any known size.
    #[error("unknown Sprout anchor {0:?}")]
    UnknownAnchor(Root),

    /// The note commitment has never been appended to the tree.
    #[error("note commitment {0:?} is not in the Sprout tree")]
    UnknownCommitment(NoteCommitment),

    /// The note commitment was appended after the requested anchor.
    #[error("note commitment at position {position} was added after the anchor at tree size {size}")]
    AfterAnchor {
        /// The position of the commitment.
        position: u64,
        /// The number of leaves in the tree at the anchor.
        size: u64,
    },
}

/// A Merkle authentication path from a note commitment to a tree root.
///
/// `siblings[0]` is the sibling of the leaf, `siblings[MERKLE_DEPTH - 1]`
/// is the sibling just below the root.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Witness {
    element: NoteCommitment,
    position: u64,
    siblings: [Node; MERKLE_DEPTH as usize],
}

impl Witness {
    /// Builds a witness from its parts.
    pub fn new(
        element: NoteCommitment,
        position: u64,
        siblings: [Node; MERKLE_DEPTH as usize],
    ) -> Witness {
        Witness {
            element,
            position,
            siblings,
        }
    }

    /// A witness for `element` as the only leaf of an otherwise empty tree.
    pub fn single_leaf(element: NoteCommitment) -> Witness {
        let mut siblings = [Node(empty_node(0)); MERKLE_DEPTH as usize];
        for (height, sibling) in siblings.iter_mut().enumerate() {
            *sibling = Node(empty_node(height));
        }

        Witness::new(element, 0, siblings)
    }

    /// The witnessed note commitment.
    pub fn element(&self) -> NoteCommitment {
        self.element
    }

    /// The leaf position of the witnessed note commitment.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// The sibling nodes, from the leaf layer up.
    pub fn siblings(&self) -> &[Node; MERKLE_DEPTH as usize] {
        &self.siblings
    }

    /// Computes the root this witness authenticates against.
    pub fn root(&self) -> Root {
        let mut node: [u8; 32] = self.element.into();
        let mut position = self.position;

        for sibling in &self.siblings {
            node = if position & 1 == 0 {
                merkle_crh_sprout(node, sibling.0)
            } else {
                merkle_crh_sprout(sibling.0, node)
            };
            position >>= 1;
        }

        node.into()
    }

    /// Encodes this path the way `zcashd` serializes an authentication path:
    /// the depth, then each sibling from the root down prefixed by its
    /// length, then the position as a little-endian `u64`.
    pub fn to_legacy_path_bytes(&self) -> [u8; WITNESS_PATH_SIZE] {
        let mut bytes = [0u8; WITNESS_PATH_SIZE];
        bytes[0] = MERKLE_DEPTH;

        for (i, sibling) in self.siblings.iter().rev().enumerate() {
            let start = 1 + 33 * i;
            bytes[start] = 32;
            bytes[start + 1..start + 33].copy_from_slice(&sibling.0[..]);
        }

        bytes[WITNESS_PATH_SIZE - 8..].copy_from_slice(&self.position.to_le_bytes());

        bytes
    }
}
