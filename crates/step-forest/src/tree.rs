//! The tree container and the balancing-policy seam.
//!
//! [`Tree`] owns the arena and the root id; everything policy-specific (node
//! layout, post-rotation bookkeeping, insert/delete fixups, invariant
//! checks) lives behind [`Policy`].

use std::fmt;
use std::marker::PhantomData;

use crate::arena::NodeStore;
use crate::error::InvariantError;
use crate::step::{NodeSnapshot, Snapshot, StepRecorder};
use crate::types::{Key, KeyNode, Node, NodeId, PolicyKind};
use crate::util;

/// A node that was physically spliced out of the tree.
#[derive(Clone, Debug)]
pub struct Removal<N> {
    pub id: NodeId,
    /// The node as it was right before removal.
    pub node: N,
    /// Child that took the removed node's place; may be the sentinel, whose
    /// parent link then points at [`Removal::parent`].
    pub replacement: NodeId,
    pub parent: NodeId,
}

/// Balancing policy: node layout plus the rebalancing case ladders.
pub trait Policy<K: Key>: Sized {
    type Node: KeyNode<K> + fmt::Debug + PartialEq;

    const KIND: PolicyKind;

    /// A freshly inserted, unlinked leaf.
    fn leaf(key: K) -> Self::Node;

    /// Called by the rotation primitives once links are final. `lower` is
    /// the old subtree root, `upper` the promoted child.
    fn after_rotate(_tree: &mut Tree<K, Self>, _lower: NodeId, _upper: NodeId) {}

    fn fixup_after_insert(tree: &mut Tree<K, Self>, node: NodeId, rec: &mut StepRecorder<K>);

    fn fixup_after_delete(
        tree: &mut Tree<K, Self>,
        removal: &Removal<Self::Node>,
        rec: &mut StepRecorder<K>,
    );

    /// Policy-specific invariants; structure and ordering are checked by
    /// [`Tree::validate`] before this runs.
    fn check(tree: &Tree<K, Self>) -> Result<(), InvariantError>;
}

pub struct Tree<K: Key, P: Policy<K>> {
    pub(crate) store: NodeStore<P::Node>,
    pub(crate) root: NodeId,
    /// Parent link of the sentinel. Its children are always the sentinel and
    /// its policy state is fixed, so this is the only part that can change.
    nil_parent: NodeId,
    _policy: PhantomData<P>,
}

impl<K: Key, P: Policy<K>> Tree<K, P> {
    pub fn new() -> Self {
        Self {
            store: NodeStore::new(),
            root: NodeId::NIL,
            nil_parent: NodeId::NIL,
            _policy: PhantomData,
        }
    }

    pub fn kind(&self) -> PolicyKind {
        P::KIND
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root.non_nil()
    }

    pub fn store(&self) -> &NodeStore<P::Node> {
        &self.store
    }

    pub fn get(&self, id: NodeId) -> Option<&P::Node> {
        self.store.get(id)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_nil()
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &P::Node {
        &self.store[id]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut P::Node {
        &mut self.store[id]
    }

    #[inline]
    pub(crate) fn p(&self, id: NodeId) -> NodeId {
        if id.is_nil() {
            self.nil_parent
        } else {
            self.store[id].p()
        }
    }

    #[inline]
    pub(crate) fn l(&self, id: NodeId) -> NodeId {
        if id.is_nil() {
            NodeId::NIL
        } else {
            self.store[id].l()
        }
    }

    #[inline]
    pub(crate) fn r(&self, id: NodeId) -> NodeId {
        if id.is_nil() {
            NodeId::NIL
        } else {
            self.store[id].r()
        }
    }

    /// Setting the sentinel's parent is allowed; the delete fixup climbs
    /// from a sentinel replacement through it.
    #[inline]
    pub(crate) fn set_p(&mut self, id: NodeId, v: NodeId) {
        if id.is_nil() {
            self.nil_parent = v;
        } else {
            self.store[id].set_p(v);
        }
    }

    #[inline]
    pub(crate) fn set_l(&mut self, id: NodeId, v: NodeId) {
        self.store[id].set_l(v);
    }

    #[inline]
    pub(crate) fn set_r(&mut self, id: NodeId, v: NodeId) {
        self.store[id].set_r(v);
    }

    /// Key of a live node. Panics on the sentinel or a dead id.
    pub fn key(&self, id: NodeId) -> &K {
        debug_assert!(!id.is_nil(), "the sentinel has no key");
        self.store[id].key()
    }

    /// Points `parent`'s link to `old` at `new` instead; a sentinel parent
    /// means `old` was the root.
    pub(crate) fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        if parent.is_nil() {
            self.root = new;
        } else if self.l(parent) == old {
            self.set_l(parent, new);
        } else {
            debug_assert_eq!(self.r(parent), old, "{old} is not a child of {parent}");
            self.set_r(parent, new);
        }
    }

    /// The child of `parent` that is not `child`.
    pub(crate) fn sibling(&self, parent: NodeId, child: NodeId) -> NodeId {
        if self.l(parent) == child {
            self.r(parent)
        } else {
            self.l(parent)
        }
    }

    /// Node holding `key`, without recording anything.
    pub fn find(&self, key: &K) -> Option<NodeId> {
        let mut curr = self.root;
        while !curr.is_nil() {
            curr = match key.cmp(self.key(curr)) {
                std::cmp::Ordering::Less => self.l(curr),
                std::cmp::Ordering::Greater => self.r(curr),
                std::cmp::Ordering::Equal => return Some(curr),
            };
        }
        None
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    pub fn first(&self) -> Option<NodeId> {
        util::first(&self.store, self.root)
    }

    pub fn last(&self) -> Option<NodeId> {
        util::last(&self.store, self.root)
    }

    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        util::next(&self.store, id)
    }

    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        util::prev(&self.store, id)
    }

    pub fn min(&self) -> Option<&K> {
        self.first().map(|id| self.key(id))
    }

    pub fn max(&self) -> Option<&K> {
        self.last().map(|id| self.key(id))
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        util::height(&self.store, self.root)
    }

    /// Inorder iterator over `(id, key)`.
    pub fn iter(&self) -> Iter<'_, K, P> {
        Iter {
            tree: self,
            next: self.first(),
        }
    }

    /// Keys in inorder.
    pub fn keys(&self) -> Vec<K> {
        self.iter().map(|(_, k)| k.clone()).collect()
    }

    pub fn snapshot(&self) -> Snapshot<K> {
        Snapshot {
            root: self.root(),
            nodes: self
                .store
                .iter()
                .map(|(id, n)| NodeSnapshot {
                    id,
                    key: n.key().clone(),
                    left: n.l().non_nil(),
                    right: n.r().non_nil(),
                    parent: n.p().non_nil(),
                    state: n.state(),
                })
                .collect(),
        }
    }

    /// Checks links, ordering and the policy's own invariants.
    pub fn validate(&self) -> Result<(), InvariantError> {
        if !self.nil_parent.is_nil() {
            return Err(InvariantError::DirtySentinel);
        }
        if !self.root.is_nil() {
            if !self.p(self.root).is_nil() {
                return Err(InvariantError::RootHasParent(self.root));
            }
            let reachable = self.check_links(self.root)?;
            if reachable != self.store.len() {
                return Err(InvariantError::Unreachable {
                    reachable,
                    stored: self.store.len(),
                });
            }
        } else if !self.store.is_empty() {
            return Err(InvariantError::Unreachable {
                reachable: 0,
                stored: self.store.len(),
            });
        }

        let mut prev: Option<NodeId> = None;
        for (id, key) in self.iter() {
            if let Some(prev) = prev {
                if self.key(prev) >= key {
                    return Err(InvariantError::OrderViolated(id));
                }
            }
            prev = Some(id);
        }

        P::check(self)
    }

    fn check_links(&self, id: NodeId) -> Result<usize, InvariantError> {
        let mut count = 1;
        for child in [self.l(id), self.r(id)] {
            if child.is_nil() {
                continue;
            }
            if self.p(child) != id {
                return Err(InvariantError::BrokenParentLink { parent: id, child });
            }
            count += self.check_links(child)?;
        }
        Ok(count)
    }

    /// Multi-line debug dump of the tree.
    pub fn print(&self) -> String {
        util::print::print::<K, P::Node>(&self.store, self.root, "")
    }
}

impl<K: Key, P: Policy<K>> Default for Tree<K, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key, P: Policy<K>> Clone for Tree<K, P> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            root: self.root,
            nil_parent: self.nil_parent,
            _policy: PhantomData,
        }
    }
}

impl<K: Key, P: Policy<K>> PartialEq for Tree<K, P> {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
            && self.nil_parent == other.nil_parent
            && self.store == other.store
    }
}

impl<K: Key, P: Policy<K>> fmt::Debug for Tree<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("kind", &P::KIND)
            .field("root", &self.root)
            .field("nil_parent", &self.nil_parent)
            .field("store", &self.store)
            .finish()
    }
}

pub struct Iter<'a, K: Key, P: Policy<K>> {
    tree: &'a Tree<K, P>,
    next: Option<NodeId>,
}

impl<'a, K: Key, P: Policy<K>> Iterator for Iter<'a, K, P> {
    type Item = (NodeId, &'a K);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.tree.next(id);
        Some((id, self.tree.key(id)))
    }
}
