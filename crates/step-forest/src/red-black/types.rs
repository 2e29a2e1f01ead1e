use crate::types::{Color, KeyNode, Node, NodeId, NodeState};

/// Red-black node: links, key and color.
#[derive(Clone, Debug, PartialEq)]
pub struct RbNode<K> {
    pub p: NodeId,
    pub l: NodeId,
    pub r: NodeId,
    pub k: K,
    pub color: Color,
}

impl<K> RbNode<K> {
    /// New nodes start red.
    pub fn new(k: K) -> Self {
        Self {
            p: NodeId::NIL,
            l: NodeId::NIL,
            r: NodeId::NIL,
            k,
            color: Color::Red,
        }
    }

    pub fn is_black(&self) -> bool {
        self.color == Color::Black
    }
}

impl<K: Clone> Node for RbNode<K> {
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
        NodeState::Color(self.color)
    }
}

impl<K: Clone> KeyNode<K> for RbNode<K> {
    fn key(&self) -> &K {
        &self.k
    }

    fn set_key(&mut self, key: K) {
        self.k = key;
    }
}
