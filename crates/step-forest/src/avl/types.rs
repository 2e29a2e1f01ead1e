use crate::types::{KeyNode, Node, NodeId, NodeState};

/// AVL node: links, key and subtree height.
#[derive(Clone, Debug, PartialEq)]
pub struct AvlNode<K> {
    pub p: NodeId,
    pub l: NodeId,
    pub r: NodeId,
    pub k: K,
    /// Nodes on the longest path down from here; leaves are 1.
    pub height: u32,
}

impl<K> AvlNode<K> {
    pub fn new(k: K) -> Self {
        Self {
            p: NodeId::NIL,
            l: NodeId::NIL,
            r: NodeId::NIL,
            k,
            height: 1,
        }
    }
}

impl<K: Clone> Node for AvlNode<K> {
    fn p(&self) -> NodeId {
        self.p
    }

    fn l(&self) -> NodeId {
        self.l
    }

    fn r(&self) -> NodeId {
        self.r
    }

    fn set_p(&mut self, v: NodeId) {
        self.p = v;
    }

    fn set_l(&mut self, v: NodeId) {
        self.l = v;
    }

    fn set_r(&mut self, v: NodeId) {
        self.r = v;
    }

    fn state(&self) -> NodeState {
        NodeState::Height(self.height)
    }
}

impl<K: Clone> KeyNode<K> for AvlNode<K> {
    fn key(&self) -> &K {
        &self.k
    }

    fn set_key(&mut self, key: K) {
        self.k = key;
    }
}
