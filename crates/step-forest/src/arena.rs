//! Id-indexed node storage.
//!
//! Slot 0 is reserved for the sentinel id and never holds a node. Ids are
//! handed out by a monotonic counter that only starts over when a fresh
//! store is created, so an id is never reused within one tree even after
//! its node is deleted.

use std::ops::{Index, IndexMut};

use crate::types::NodeId;

#[derive(Clone, Debug, PartialEq)]
pub struct NodeStore<N> {
    slots: Vec<Option<N>>,
    live: usize,
}

impl<N> NodeStore<N> {
    /// Creates an empty store; the first [`alloc`](Self::alloc) returns id 1.
    pub fn new() -> Self {
        Self {
            slots: vec![None],
            live: 0,
        }
    }

    /// Stores `node` under the next unused id.
    pub fn alloc(&mut self, node: N) -> NodeId {
        let id = self.next_id();
        self.slots.push(Some(node));
        self.live += 1;
        id
    }

    /// Id the next [`alloc`](Self::alloc) will return.
    pub fn next_id(&self) -> NodeId {
        NodeId(self.slots.len() as u32)
    }

    pub fn get(&self, id: NodeId) -> Option<&N> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut N> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Replaces a live node, returning the previous one.
    ///
    /// Dead or unknown ids are left alone and yield `None`; `set` never
    /// revives a deleted id.
    pub fn set(&mut self, id: NodeId, node: N) -> Option<N> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.is_none() {
            return None;
        }
        slot.replace(node)
    }

    /// Removes a node, returning it if it was live.
    pub fn delete(&mut self, id: NodeId) -> Option<N> {
        let node = self.slots.get_mut(id.index())?.take()?;
        self.live -= 1;
        Some(node)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Live nodes in id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &N)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|n| (NodeId(i as u32), n)))
    }
}

impl<N> Default for NodeStore<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Index<NodeId> for NodeStore<N> {
    type Output = N;

    fn index(&self, id: NodeId) -> &N {
        match self.slots.get(id.index()) {
            Some(Some(node)) => node,
            _ => panic!("dangling node id {id}"),
        }
    }
}

impl<N> IndexMut<NodeId> for NodeStore<N> {
    fn index_mut(&mut self, id: NodeId) -> &mut N {
        match self.slots.get_mut(id.index()) {
            Some(Some(node)) => node,
            _ => panic!("dangling node id {id}"),
        }
    }
}
