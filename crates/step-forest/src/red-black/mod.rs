//! Color-balanced (red-black) policy.
//!
//! The reserved id [`NodeId::NIL`] acts as the black leaf shared by every node,
//! so color and child lookups never branch on absence. Insert and delete
//! repairs follow the canonical case ladders, mirrored for right-hand
//! parents.

pub mod types;
pub mod util;

pub use types::RbNode;
pub use util::{classify_insert, InsertCase};

use crate::error::InvariantError;
use crate::step::StepRecorder;
use crate::tree::{Policy, Removal, Tree};
use crate::types::{Color, Key, NodeId, PolicyKind};

/// Marker type selecting the red-black policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RedBlack;

pub type RbTree<K> = Tree<K, RedBlack>;

impl<K: Key> Policy<K> for RedBlack {
    type Node = RbNode<K>;

    const KIND: PolicyKind = PolicyKind::RedBlack;

    fn leaf(key: K) -> RbNode<K> {
        RbNode::new(key)
    }

    fn fixup_after_insert(tree: &mut Tree<K, Self>, node: NodeId, rec: &mut StepRecorder<K>) {
        util::fixup_after_insert(tree, node, rec);
    }

    fn fixup_after_delete(
        tree: &mut Tree<K, Self>,
        removal: &Removal<RbNode<K>>,
        rec: &mut StepRecorder<K>,
    ) {
        util::fixup_after_delete(tree, removal, rec);
    }

    fn check(tree: &Tree<K, Self>) -> Result<(), InvariantError> {
        util::check(tree)
    }
}

impl<K: Key> Tree<K, RedBlack> {
    /// Color of `id`; the sentinel is always black.
    pub fn color(&self, id: NodeId) -> Color {
        util::color(self, id)
    }

    /// Black nodes on any root-to-NIL path, or `None` if the coloring is broken.
    pub fn black_height(&self) -> Option<usize> {
        util::black_height(self, self.root).ok()
    }
}
