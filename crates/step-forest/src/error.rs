use thiserror::Error;

use crate::types::NodeId;

/// A broken tree invariant found by [`Tree::validate`](crate::Tree::validate).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("root {0} has a parent")]
    RootHasParent(NodeId),
    #[error("child {child} does not link back to parent {parent}")]
    BrokenParentLink { parent: NodeId, child: NodeId },
    #[error("key order violated at {0}")]
    OrderViolated(NodeId),
    #[error("{reachable} nodes reachable from the root, {stored} stored")]
    Unreachable { reachable: usize, stored: usize },
    #[error("{id} stores height {stored}, expected {expected}")]
    HeightMismatch {
        id: NodeId,
        stored: u32,
        expected: u32,
    },
    #[error("{id} has balance factor {balance}")]
    Unbalanced { id: NodeId, balance: i32 },
    #[error("sentinel node was modified")]
    DirtySentinel,
    #[error("root {0} is red")]
    RedRoot(NodeId),
    #[error("red node {parent} has red child {child}")]
    RedRed { parent: NodeId, child: NodeId },
    #[error("black height differs below {id}: left {left}, right {right}")]
    BlackHeight { id: NodeId, left: usize, right: usize },
}
