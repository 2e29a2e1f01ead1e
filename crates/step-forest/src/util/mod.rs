//! Read-only traversal helpers over a [`NodeStore`].
//!
//! These never record steps; the engine uses them for lookups and
//! [`Tree`](crate::Tree) re-exports them as methods.

pub mod print;

use crate::arena::NodeStore;
use crate::types::{Node, NodeId};

/// Leftmost node under `root`.
pub fn first<N: Node>(store: &NodeStore<N>, root: NodeId) -> Option<NodeId> {
    let mut curr = root.non_nil()?;
    loop {
        let l = store[curr].l();
        if l.is_nil() {
            return Some(curr);
        }
        curr = l;
    }
}

/// Rightmost node under `root`.
pub fn last<N: Node>(store: &NodeStore<N>, root: NodeId) -> Option<NodeId> {
    let mut curr = root.non_nil()?;
    loop {
        let r = store[curr].r();
        if r.is_nil() {
            return Some(curr);
        }
        curr = r;
    }
}

/// In-order successor.
pub fn next<N: Node>(store: &NodeStore<N>, mut curr: NodeId) -> Option<NodeId> {
    let r = store[curr].r();
    if !r.is_nil() {
        return first(store, r);
    }
    let mut p = store[curr].p();
    while !p.is_nil() && store[p].r() == curr {
        curr = p;
        p = store[p].p();
    }
    p.non_nil()
}

/// In-order predecessor.
pub fn prev<N: Node>(store: &NodeStore<N>, mut curr: NodeId) -> Option<NodeId> {
    let l = store[curr].l();
    if !l.is_nil() {
        return last(store, l);
    }
    let mut p = store[curr].p();
    while !p.is_nil() && store[p].l() == curr {
        curr = p;
        p = store[p].p();
    }
    p.non_nil()
}

/// Number of nodes under `root`.
pub fn size<N: Node>(store: &NodeStore<N>, root: NodeId) -> usize {
    if root.is_nil() {
        return 0;
    }
    1 + size(store, store[root].l()) + size(store, store[root].r())
}

/// Nodes on the longest path down from `root`; 0 for the sentinel.
pub fn height<N: Node>(store: &NodeStore<N>, root: NodeId) -> usize {
    if root.is_nil() {
        return 0;
    }
    1 + height(store, store[root].l()).max(height(store, store[root].r()))
}
