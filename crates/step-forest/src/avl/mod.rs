//! Height-balanced (AVL) policy.
//!
//! Each node stores its subtree height; after an insert or delete the engine
//! walks from the touched parent to the root, refreshing heights and
//! rotating wherever the balance factor leaves `-1..=1`.

pub mod types;
pub mod util;

pub use types::AvlNode;
pub use util::{classify, AvlCase};

use crate::error::InvariantError;
use crate::step::StepRecorder;
use crate::tree::{Policy, Removal, Tree};
use crate::types::{Key, NodeId, PolicyKind};

/// Marker type selecting the AVL policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Avl;

pub type AvlTree<K> = Tree<K, Avl>;

impl<K: Key> Policy<K> for Avl {
    type Node = AvlNode<K>;

    const KIND: PolicyKind = PolicyKind::Avl;

    fn leaf(key: K) -> AvlNode<K> {
        AvlNode::new(key)
    }

    fn after_rotate(tree: &mut Tree<K, Self>, lower: NodeId, upper: NodeId) {
        util::update_height(tree, lower);
        util::update_height(tree, upper);
    }

    fn fixup_after_insert(tree: &mut Tree<K, Self>, node: NodeId, rec: &mut StepRecorder<K>) {
        let key = tree.key(node).clone();
        let parent = tree.p(node);
        util::retrace(tree, parent, Some(&key), rec);
    }

    fn fixup_after_delete(
        tree: &mut Tree<K, Self>,
        removal: &Removal<AvlNode<K>>,
        rec: &mut StepRecorder<K>,
    ) {
        util::retrace(tree, removal.parent, None, rec);
    }

    fn check(tree: &Tree<K, Self>) -> Result<(), InvariantError> {
        util::check(tree)
    }
}

impl<K: Key> Tree<K, Avl> {
    /// Stored height of `id`; 0 for the sentinel.
    pub fn node_height(&self, id: NodeId) -> u32 {
        util::height(self, id)
    }

    /// `height(left) - height(right)` of `id`.
    pub fn balance(&self, id: NodeId) -> i32 {
        util::balance(self, id)
    }
}
