//! Arena-based self-balancing binary search trees with a step trace.
//!
//! Two balancing policies share one engine:
//!
//! - **AVL** ([`Avl`]) keeps per-node heights and rotates when a balance
//!   factor leaves `-1..=1`.
//! - **Red-black** ([`RedBlack`]) keeps node colors with a shared black
//!   sentinel and repairs with the canonical recolor/rotate case ladders.
//!
//! Every insert, delete and search records a [`Step`] right after each
//! structural mutation (rotation, recolor, height refresh, relink, node
//! creation or removal) plus the comparisons of the descent. Each step holds
//! a full [`Snapshot`], so a player can redraw every intermediate tree
//! without calling back into the engine.
//!
//! Instead of pointers, nodes live in a [`NodeStore`] arena and link to
//! each other by [`NodeId`]. Id 0 is reserved for the sentinel [`NodeId::NIL`].
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`NodeId`], [`Node`]/[`KeyNode`] traits, [`Outcome`] |
//! [`arena`] | [`NodeStore`] with its monotonic id allocator |
//! [`rotation`] | [`Rotation`], `rotate` / `rotate_left` / `rotate_right` on [`Tree`] |
//! [`avl`] | AVL node, height bookkeeping and LL/LR/RR/RL repair |
//! [`red_black`] | red-black node, insert state machine, delete fixup |
//! [`engine`] | BST walk, splice, [`build`]/[`insert`]/[`delete`]/[`search`] |
//! [`step`] | [`Step`], [`Phase`], [`StepRecorder`] |
//! [`script`] | JSON scripts for the `tree-trace` binary |
//!
//! ```
//! use step_forest::{build, insert, Avl, Outcome};
//!
//! let built = build::<i32, Avl, _>([50, 30, 70]);
//! let next = insert(&built.tree, 20);
//! assert!(matches!(next.outcome, Outcome::Inserted { .. }));
//! assert_eq!(next.tree.keys(), vec![20, 30, 50, 70]);
//! assert_eq!(built.tree.len(), 3);
//! ```

pub mod arena;
pub mod avl;
pub mod engine;
pub mod error;
#[path = "red-black/mod.rs"]
pub mod red_black;
pub mod rotation;
pub mod script;
pub mod step;
pub mod tree;
pub mod types;
pub mod util;

pub use arena::NodeStore;
pub use avl::{Avl, AvlNode, AvlTree};
pub use engine::{build, delete, insert, search, SearchTrace, Trace};
pub use error::InvariantError;
pub use red_black::{RbNode, RbTree, RedBlack};
pub use rotation::{Rotation, Side};
pub use step::{NodeSnapshot, Phase, Snapshot, Step, StepRecorder};
pub use tree::{Policy, Removal, Tree};
pub use types::{Color, Key, KeyNode, Node, NodeId, NodeState, Outcome, PolicyKind};
