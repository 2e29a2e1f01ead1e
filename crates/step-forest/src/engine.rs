//! BST descent for insert/search/delete, delegating repairs to the policy.
//!
//! The free functions ([`build`], [`insert`], [`delete`], [`search`]) never
//! touch the caller's tree: mutating ones work on a clone and hand it back
//! together with the recorded steps.

use std::cmp::Ordering;

use tracing::debug;

use crate::step::{Phase, Step, StepRecorder};
use crate::tree::{Policy, Removal, Tree};
use crate::types::{Key, KeyNode, NodeId, Outcome};

/// Result of a mutating entry point.
#[derive(Debug, Clone)]
pub struct Trace<K: Key, P: Policy<K>> {
    pub tree: Tree<K, P>,
    pub outcome: Outcome,
    pub steps: Vec<Step<K>>,
}

/// Result of [`search`].
#[derive(Debug, Clone)]
pub struct SearchTrace<K> {
    pub outcome: Outcome,
    pub steps: Vec<Step<K>>,
}

impl<K> SearchTrace<K> {
    pub fn found(&self) -> Option<NodeId> {
        match self.outcome {
            Outcome::Found { id } => Some(id),
            _ => None,
        }
    }
}

impl<K: Key, P: Policy<K>> Tree<K, P> {
    /// Inserts `key`, recording every step into `rec`.
    ///
    /// A duplicate key leaves the tree untouched, but the descent up to the
    /// equal node is still recorded: `InsertStart` and one `InsertCompare`
    /// per node passed come before the terminal `DuplicateKey` step, whose
    /// path ends at the equal node.
    pub fn insert_traced(&mut self, key: K, rec: &mut StepRecorder<K>) -> Outcome {
        rec.reset_path();
        rec.step(self, Phase::InsertStart, format!("Insert {key}"), &[]);
        let outcome = self.insert_inner(key.clone(), rec);
        debug!(target: "step_forest", policy = ?P::KIND, %key, ?outcome, size = self.len(), "insert");
        debug_assert_eq!(self.validate(), Ok(()));
        outcome
    }

    fn insert_inner(&mut self, key: K, rec: &mut StepRecorder<K>) -> Outcome {
        if self.root.is_nil() {
            let id = self.store.alloc(P::leaf(key.clone()));
            self.root = id;
            rec.visit(id);
            rec.step(
                self,
                Phase::InsertRoot,
                format!("Tree is empty: {key} becomes the root"),
                &[id],
            );
            P::fixup_after_insert(self, id, rec);
            return rec.finish(self, Outcome::Inserted { id }, format!("Inserted {key}"), &[id]);
        }

        let mut curr = self.root;
        loop {
            rec.visit(curr);
            let curr_key = self.key(curr).clone();
            let next = match key.cmp(&curr_key) {
                Ordering::Equal => {
                    return rec.finish(
                        self,
                        Outcome::DuplicateKey,
                        format!("{key} is already in the tree"),
                        &[curr],
                    );
                }
                Ordering::Less => {
                    let message = format!("{key} < {curr_key}: go left");
                    rec.step(self, Phase::InsertCompare, message, &[curr]);
                    self.l(curr)
                }
                Ordering::Greater => {
                    let message = format!("{key} > {curr_key}: go right");
                    rec.step(self, Phase::InsertCompare, message, &[curr]);
                    self.r(curr)
                }
            };
            if next.is_nil() {
                break;
            }
            curr = next;
        }

        let parent = curr;
        let id = self.store.alloc(P::leaf(key.clone()));
        self.set_p(id, parent);
        let side = if key < *self.key(parent) {
            self.set_l(parent, id);
            "left"
        } else {
            self.set_r(parent, id);
            "right"
        };
        rec.visit(id);
        let message = format!("Attach {key} as the {side} child of {}", self.key(parent));
        rec.step(self, Phase::InsertAttach, message, &[id, parent]);

        P::fixup_after_insert(self, id, rec);
        rec.finish(self, Outcome::Inserted { id }, format!("Inserted {key}"), &[id])
    }

    /// Looks `key` up, recording the walk into `rec`. Never mutates.
    pub fn search_traced(&self, key: &K, rec: &mut StepRecorder<K>) -> Outcome {
        rec.reset_path();
        rec.step(self, Phase::SearchStart, format!("Search {key}"), &[]);
        let outcome = self.search_inner(key, rec);
        debug!(target: "step_forest", policy = ?P::KIND, %key, ?outcome, "search");
        outcome
    }

    fn search_inner(&self, key: &K, rec: &mut StepRecorder<K>) -> Outcome {
        if self.root.is_nil() {
            return rec.finish(self, Outcome::EmptyTree, "Tree is empty", &[]);
        }
        let mut curr = self.root;
        while !curr.is_nil() {
            rec.visit(curr);
            let curr_key = self.key(curr);
            curr = match key.cmp(curr_key) {
                Ordering::Equal => {
                    return rec.finish(
                        self,
                        Outcome::Found { id: curr },
                        format!("Found {key}"),
                        &[curr],
                    );
                }
                Ordering::Less => {
                    let message = format!("{key} < {curr_key}: go left");
                    rec.step(self, Phase::SearchCompare, message, &[curr]);
                    self.l(curr)
                }
                Ordering::Greater => {
                    let message = format!("{key} > {curr_key}: go right");
                    rec.step(self, Phase::SearchCompare, message, &[curr]);
                    self.r(curr)
                }
            };
        }
        rec.finish(self, Outcome::NotFound, format!("{key} is not in the tree"), &[])
    }

    /// Deletes `key`, recording every step into `rec`.
    pub fn delete_traced(&mut self, key: &K, rec: &mut StepRecorder<K>) -> Outcome {
        rec.reset_path();
        rec.step(self, Phase::DeleteStart, format!("Delete {key}"), &[]);
        let outcome = self.delete_inner(key, rec);
        debug!(target: "step_forest", policy = ?P::KIND, %key, ?outcome, size = self.len(), "delete");
        debug_assert_eq!(self.validate(), Ok(()));
        outcome
    }

    fn delete_inner(&mut self, key: &K, rec: &mut StepRecorder<K>) -> Outcome {
        if self.root.is_nil() {
            return rec.finish(self, Outcome::EmptyTree, "Tree is empty", &[]);
        }

        let mut target = self.root;
        loop {
            if target.is_nil() {
                return rec.finish(self, Outcome::NotFound, format!("{key} is not in the tree"), &[]);
            }
            rec.visit(target);
            let target_key = self.key(target).clone();
            target = match key.cmp(&target_key) {
                Ordering::Equal => break,
                Ordering::Less => {
                    let message = format!("{key} < {target_key}: go left");
                    rec.step(self, Phase::DeleteCompare, message, &[target]);
                    self.l(target)
                }
                Ordering::Greater => {
                    let message = format!("{key} > {target_key}: go right");
                    rec.step(self, Phase::DeleteCompare, message, &[target]);
                    self.r(target)
                }
            };
        }

        let doomed = if !self.l(target).is_nil() && !self.r(target).is_nil() {
            let mut succ = self.r(target);
            rec.visit(succ);
            while !self.l(succ).is_nil() {
                succ = self.l(succ);
                rec.visit(succ);
            }
            let succ_key = self.key(succ).clone();
            let message = format!("{key} has two children: its inorder successor is {succ_key}");
            rec.step(self, Phase::DeleteSuccessor, message, &[target, succ]);

            self.node_mut(target).set_key(succ_key.clone());
            let message = format!("Copy {succ_key} into the node that held {key}");
            rec.step(self, Phase::DeleteCopyKey, message, &[target, succ]);
            succ
        } else {
            target
        };

        let doomed_key = self.key(doomed).clone();
        let removal = self.splice(doomed);
        let message = match removal.replacement.non_nil() {
            Some(child) => format!("Unlink {doomed_key}; {} takes its place", self.key(child)),
            None => format!("Unlink leaf {doomed_key}"),
        };
        rec.step(
            self,
            Phase::DeleteSplice,
            message,
            &[removal.replacement, removal.parent],
        );

        P::fixup_after_delete(self, &removal, rec);
        self.set_p(NodeId::NIL, NodeId::NIL);

        rec.finish(self, Outcome::Deleted { id: removal.id }, format!("Deleted {key}"), &[])
    }

    /// Unlinks `z` (at most one child) and frees its slot. The replacement's
    /// parent link is set even when it is the sentinel.
    pub(crate) fn splice(&mut self, z: NodeId) -> Removal<P::Node> {
        debug_assert!(
            self.l(z).is_nil() || self.r(z).is_nil(),
            "splice({z}) needs at most one child"
        );
        let x = if self.l(z).is_nil() {
            self.r(z)
        } else {
            self.l(z)
        };
        let parent = self.p(z);
        self.replace_child(parent, z, x);
        self.set_p(x, parent);
        let Some(node) = self.store.delete(z) else {
            unreachable!("splice of dead node {z}");
        };
        Removal {
            id: z,
            node,
            replacement: x,
            parent,
        }
    }

    /// Untraced insert.
    pub fn insert(&mut self, key: K) -> Outcome {
        self.insert_traced(key, &mut StepRecorder::disabled())
    }

    /// Untraced delete.
    pub fn remove(&mut self, key: &K) -> Outcome {
        self.delete_traced(key, &mut StepRecorder::disabled())
    }
}

/// Builds a fresh tree by inserting `values` in order.
pub fn build<K, P, I>(values: I) -> Trace<K, P>
where
    K: Key,
    P: Policy<K>,
    I: IntoIterator<Item = K>,
{
    let mut tree = Tree::<K, P>::new();
    let mut rec = StepRecorder::new();
    rec.step(&tree, Phase::BuildStart, "Start from an empty tree", &[]);

    let (mut inserted, mut duplicates) = (0, 0);
    for key in values {
        match tree.insert_traced(key, &mut rec) {
            Outcome::Inserted { .. } => inserted += 1,
            Outcome::DuplicateKey => duplicates += 1,
            _ => {}
        }
    }

    rec.reset_path();
    let outcome = rec.finish(
        &tree,
        Outcome::Built {
            inserted,
            duplicates,
        },
        format!("Built a tree of {} keys", tree.len()),
        &[],
    );
    debug!(target: "step_forest", policy = ?P::KIND, inserted, duplicates, steps = rec.len(), "build");
    Trace {
        tree,
        outcome,
        steps: rec.into_steps(),
    }
}

/// Inserts `key` into a copy of `tree`.
pub fn insert<K: Key, P: Policy<K>>(tree: &Tree<K, P>, key: K) -> Trace<K, P> {
    let mut tree = tree.clone();
    let mut rec = StepRecorder::new();
    let outcome = tree.insert_traced(key, &mut rec);
    Trace {
        tree,
        outcome,
        steps: rec.into_steps(),
    }
}

/// Deletes `key` from a copy of `tree`.
pub fn delete<K: Key, P: Policy<K>>(tree: &Tree<K, P>, key: &K) -> Trace<K, P> {
    let mut tree = tree.clone();
    let mut rec = StepRecorder::new();
    let outcome = tree.delete_traced(key, &mut rec);
    Trace {
        tree,
        outcome,
        steps: rec.into_steps(),
    }
}

pub fn search<K: Key, P: Policy<K>>(tree: &Tree<K, P>, key: &K) -> SearchTrace<K> {
    let mut rec = StepRecorder::new();
    let outcome = tree.search_traced(key, &mut rec);
    SearchTrace {
        outcome,
        steps: rec.into_steps(),
    }
}
