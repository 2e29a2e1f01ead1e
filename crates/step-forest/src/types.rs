//! Core node types shared by both balancing policies.
//!
//! Every "pointer" is a [`NodeId`] into a [`NodeStore`](crate::NodeStore)
//! arena. Id 0 is reserved for the shared sentinel [`NodeId::NIL`], so
//! absent children and the root's parent are ordinary ids rather than
//! `Option`s.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Arena index of a tree node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The shared sentinel standing in for every missing child.
    pub const NIL: NodeId = NodeId(0);

    #[inline]
    pub fn is_nil(self) -> bool {
        self == Self::NIL
    }

    /// `None` for the sentinel, `Some(self)` otherwise.
    #[inline]
    pub fn non_nil(self) -> Option<NodeId> {
        if self.is_nil() {
            None
        } else {
            Some(self)
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            f.write_str("#nil")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// Red-black node color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Red,
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => f.write_str("red"),
            Color::Black => f.write_str("black"),
        }
    }
}

/// Policy-specific bookkeeping carried by a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    Height(u32),
    Color(Color),
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeState::Height(h) => write!(f, "h={h}"),
            NodeState::Color(c) => write!(f, "{c}"),
        }
    }
}

/// Which balancing policy a tree runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    #[default]
    Avl,
    RedBlack,
}

/// Keys stored in a tree. `Display` is used for step messages.
pub trait Key: Ord + Clone + fmt::Debug + fmt::Display {}

impl<T> Key for T where T: Ord + Clone + fmt::Debug + fmt::Display {}

/// Structural links (`p`, `l`, `r`) plus policy state.
pub trait Node: Clone {
    fn p(&self) -> NodeId;
    fn l(&self) -> NodeId;
    fn r(&self) -> NodeId;
    fn set_p(&mut self, v: NodeId);
    fn set_l(&mut self, v: NodeId);
    fn set_r(&mut self, v: NodeId);
    fn state(&self) -> NodeState;
}

/// Node carrying an ordered key.
pub trait KeyNode<K>: Node {
    fn key(&self) -> &K;
    fn set_key(&mut self, key: K);
}

/// Result of an engine operation.
///
/// None of these are errors: a duplicate insert or a missing key leaves the
/// tree untouched and is reported on the final step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Inserted { id: NodeId },
    /// Id of the node physically removed from the arena. For a two-child
    /// delete this is the inorder successor, not the node holding the key.
    Deleted { id: NodeId },
    Found { id: NodeId },
    Built { inserted: usize, duplicates: usize },
    DuplicateKey,
    NotFound,
    EmptyTree,
}

impl Outcome {
    /// Whether the operation changed the tree.
    pub fn is_mutation(&self) -> bool {
        match self {
            Outcome::Inserted { .. } | Outcome::Deleted { .. } => true,
            Outcome::Built { inserted, .. } => *inserted > 0,
            _ => false,
        }
    }
}
