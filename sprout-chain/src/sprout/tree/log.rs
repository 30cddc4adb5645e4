//! An in-memory, append-only record of the Sprout tree that can witness
//! any commitment against any root it has had.

use std::collections::HashMap;

use super::{
    super::commitment::NoteCommitment, empty_node, merkle_crh_sprout, Node,
    NoteCommitmentTree, NoteCommitmentTreeError, Root, Witness, WitnessError, MERKLE_DEPTH,
};

/// A read-only source of authentication paths.
///
/// The prover asks for a path for each input note commitment at the anchor it
/// is proving against.
pub trait WitnessSource {
    /// Returns the authentication path of `commitment` in the tree whose
    /// root is `anchor`.
    fn witness(&self, commitment: &NoteCommitment, anchor: &Root) -> Result<Witness, WitnessError>;
}

/// Every note commitment appended to the Sprout tree, with the size of the
/// tree at each root it has had.
#[derive(Clone, Debug)]
pub struct NoteCommitmentLog {
    leaves: Vec<Node>,
    positions: HashMap<NoteCommitment, u64>,
    anchors: HashMap<Root, u64>,
    tree: NoteCommitmentTree,
}

impl NoteCommitmentLog {
    /// An empty log, whose only anchor is the empty tree root.
    pub fn new() -> NoteCommitmentLog {
        let tree = NoteCommitmentTree::default();

        NoteCommitmentLog {
            leaves: Vec::new(),
            positions: HashMap::new(),
            anchors: HashMap::from([(tree.root(), 0)]),
            tree,
        }
    }

    /// Appends a note commitment, returning the new root.
    pub fn append(&mut self, cm: NoteCommitment) -> Result<Root, NoteCommitmentTreeError> {
        self.tree.append(cm)?;

        let position = self.leaves.len() as u64;
        self.leaves.push(cm.into());
        self.positions.entry(cm).or_insert(position);

        let root = self.tree.root();
        self.anchors.entry(root).or_insert(self.leaves.len() as u64);

        tracing::trace!(?root, position, "appended Sprout note commitment");

        Ok(root)
    }

    /// The current root.
    pub fn root(&self) -> Root {
        self.tree.root()
    }

    /// The number of appended note commitments.
    pub fn len(&self) -> u64 {
        self.leaves.len() as u64
    }

    /// Returns true if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Computes the siblings of the leaf at `position` in the tree made of
    /// the first `size` leaves.
    fn siblings(&self, position: u64, size: u64) -> [Node; MERKLE_DEPTH as usize] {
        let size = usize::try_from(size).expect("tree sizes fit in usize");
        let mut layer: Vec<[u8; 32]> = self.leaves[..size].iter().map(|node| node.0).collect();
        let mut index = position;
        let mut siblings = [Node(empty_node(0)); MERKLE_DEPTH as usize];

        for (height, sibling) in siblings.iter_mut().enumerate() {
            let empty = empty_node(height);

            let sibling_index = usize::try_from(index ^ 1).expect("positions fit in usize");
            *sibling = Node(layer.get(sibling_index).copied().unwrap_or(empty));

            layer = layer
                .chunks(2)
                .map(|pair| merkle_crh_sprout(pair[0], pair.get(1).copied().unwrap_or(empty)))
                .collect();
            index >>= 1;
        }

        siblings
    }
}

impl Default for NoteCommitmentLog {
    fn default() -> Self {
        Self::new()
    }
}

impl WitnessSource for NoteCommitmentLog {
    fn witness(&self, commitment: &NoteCommitment, anchor: &Root) -> Result<Witness, WitnessError> {
        let size = *self
            .anchors
            .get(anchor)
            .ok_or(WitnessError::UnknownAnchor(*anchor))?;

        let position = *self
            .positions
            .get(commitment)
            .ok_or(WitnessError::UnknownCommitment(*commitment))?;

        if position >= size {
            return Err(WitnessError::AfterAnchor { position, size });
        }

        Ok(Witness::new(
            *commitment,
            position,
            self.siblings(position, size),
        ))
    }
}
