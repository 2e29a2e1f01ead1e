//! Step trace: one immutable snapshot per structural mutation.
//!
//! The recorder is append-only. Callers mutate the tree first and record
//! right after, so replaying [`Step::snapshot`]s in order walks through every
//! intermediate tree shape an operation went through.

use serde::Serialize;
use tracing::trace;

use crate::rotation::Rotation;
use crate::tree::{Policy, Tree};
use crate::types::{Key, NodeId, NodeState, Outcome};

/// Opaque phase marker of a step.
///
/// Consumers map phases onto whatever they display next to the tree (e.g.
/// highlighted pseudo-code lines); the engine attaches no meaning beyond the
/// variant itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Phase {
    BuildStart,
    BuildDone,

    InsertStart,
    InsertCompare,
    InsertRoot,
    InsertAttach,
    DuplicateKey,

    SearchStart,
    SearchCompare,
    Found,
    NotFound,

    DeleteStart,
    DeleteCompare,
    DeleteSuccessor,
    DeleteCopyKey,
    DeleteSplice,

    EmptyTree,

    AvlUpdateHeight,
    AvlRotateLl,
    AvlRotateRr,
    AvlRotateLr,
    AvlRotateRl,

    RbInsertRoot,
    RbInsertTerminated,
    RbUncleRed,
    RbTriangle,
    RbLine,
    RbColorRoot,

    RbDeleteRedRemoved,
    RbSiblingRed,
    RbSiblingBlackChildrenBlack,
    RbNearChildRed,
    RbFarChildRed,
    RbAbsorb,

    Done,
}

impl Phase {
    /// Terminal phase reporting `outcome`.
    pub fn of_outcome(outcome: &Outcome) -> Phase {
        match outcome {
            Outcome::Inserted { .. } | Outcome::Deleted { .. } => Phase::Done,
            Outcome::Built { .. } => Phase::BuildDone,
            Outcome::Found { .. } => Phase::Found,
            Outcome::DuplicateKey => Phase::DuplicateKey,
            Outcome::NotFound => Phase::NotFound,
            Outcome::EmptyTree => Phase::EmptyTree,
        }
    }
}

/// One node as it looked when a step was recorded.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeSnapshot<K> {
    pub id: NodeId,
    pub key: K,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub parent: Option<NodeId>,
    pub state: NodeState,
}

/// Whole-tree snapshot, enough to redraw the tree without the engine.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot<K> {
    pub root: Option<NodeId>,
    /// Live nodes sorted by id.
    pub nodes: Vec<NodeSnapshot<K>>,
}

impl<K: Clone> Snapshot<K> {
    pub fn node(&self, id: NodeId) -> Option<&NodeSnapshot<K>> {
        self.nodes
            .binary_search_by_key(&id, |n| n.id)
            .ok()
            .map(|i| &self.nodes[i])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Keys in inorder, following the recorded links only.
    pub fn keys(&self) -> Vec<K> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut curr = self.root;
        loop {
            while let Some(n) = curr.and_then(|id| self.node(id)) {
                stack.push(n);
                curr = n.left;
            }
            let Some(n) = stack.pop() else {
                return out;
            };
            out.push(n.key.clone());
            curr = n.right;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Step<K> {
    pub phase: Phase,
    pub message: String,
    pub highlight: Vec<NodeId>,
    pub path: Vec<NodeId>,
    pub snapshot: Snapshot<K>,
    /// The rotation this step shows, if it shows one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Rotation>,
    /// Set on the terminal step of an operation only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
}

/// Collects steps for one or more consecutive operations.
#[derive(Clone, Debug)]
pub struct StepRecorder<K> {
    steps: Vec<Step<K>>,
    path: Vec<NodeId>,
    enabled: bool,
}

impl<K> Default for StepRecorder<K> {
    fn default() -> Self {
        Self {
            steps: Vec::new(),
            path: Vec::new(),
            enabled: true,
        }
    }
}

impl<K: Key> StepRecorder<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder that keeps nothing; backs the untraced tree methods.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Appends `id` to the current path of visited nodes.
    pub fn visit(&mut self, id: NodeId) {
        if self.enabled && !id.is_nil() {
            self.path.push(id);
        }
    }

    /// Starts a fresh path; called at the beginning of every operation.
    pub fn reset_path(&mut self) {
        self.path.clear();
    }

    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    /// Records a step with an explicit path.
    pub fn add_step<P: Policy<K>>(
        &mut self,
        tree: &Tree<K, P>,
        phase: Phase,
        message: impl Into<String>,
        highlight: &[NodeId],
        path: &[NodeId],
    ) {
        self.push(tree, phase, message.into(), highlight, path.to_vec(), None);
    }

    /// Records a step along the current path.
    pub fn step<P: Policy<K>>(
        &mut self,
        tree: &Tree<K, P>,
        phase: Phase,
        message: impl Into<String>,
        highlight: &[NodeId],
    ) {
        let path = self.path.clone();
        self.push(tree, phase, message.into(), highlight, path, None);
    }

    /// Records the step right after `rotation` was applied.
    pub fn rotated<P: Policy<K>>(
        &mut self,
        tree: &Tree<K, P>,
        phase: Phase,
        message: impl Into<String>,
        rotation: Rotation,
    ) {
        if !self.enabled {
            return;
        }
        let path = self.path.clone();
        let highlight = [rotation.pivot, rotation.promoted];
        self.push(tree, phase, message.into(), &highlight, path, None);
        if let Some(step) = self.steps.last_mut() {
            step.rotation = Some(rotation);
        }
    }

    /// Records the terminal step of an operation carrying its outcome.
    pub fn finish<P: Policy<K>>(
        &mut self,
        tree: &Tree<K, P>,
        outcome: Outcome,
        message: impl Into<String>,
        highlight: &[NodeId],
    ) -> Outcome {
        let path = self.path.clone();
        self.push(
            tree,
            Phase::of_outcome(&outcome),
            message.into(),
            highlight,
            path,
            Some(outcome),
        );
        outcome
    }

    fn push<P: Policy<K>>(
        &mut self,
        tree: &Tree<K, P>,
        phase: Phase,
        message: String,
        highlight: &[NodeId],
        path: Vec<NodeId>,
        outcome: Option<Outcome>,
    ) {
        if !self.enabled {
            return;
        }
        trace!(target: "step_forest::steps", index = self.steps.len(), ?phase, "{message}");
        self.steps.push(Step {
            phase,
            message,
            highlight: highlight.iter().copied().filter(|id| !id.is_nil()).collect(),
            path,
            snapshot: tree.snapshot(),
            rotation: None,
            outcome,
        });
    }

    pub fn steps(&self) -> &[Step<K>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn into_steps(self) -> Vec<Step<K>> {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avl::AvlTree;

    #[test]
    fn disabled_recorder_keeps_nothing() {
        let tree = AvlTree::<i32>::new();
        let mut rec = StepRecorder::disabled();
        rec.visit(NodeId(1));
        rec.step(&tree, Phase::InsertStart, "Insert 1", &[]);
        assert!(!rec.is_enabled());
        assert!(rec.is_empty());
        assert!(rec.path().is_empty());
    }

    #[test]
    fn steps_drop_sentinel_highlights() {
        let mut tree = AvlTree::<i32>::new();
        tree.insert(5);
        let root = tree.root().unwrap();

        let mut rec = StepRecorder::new();
        rec.visit(NodeId::NIL);
        rec.visit(root);
        rec.step(&tree, Phase::SearchCompare, "5", &[NodeId::NIL, root]);
        rec.add_step(&tree, Phase::SearchCompare, "custom path", &[], &[]);
        let outcome = rec.finish(&tree, Outcome::Found { id: root }, "Found 5", &[root]);

        assert_eq!(outcome, Outcome::Found { id: root });
        let steps = rec.steps();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].highlight, vec![root]);
        assert_eq!(steps[0].path, vec![root]);
        assert!(steps[1].path.is_empty());
        assert_eq!(steps[2].phase, Phase::Found);
        assert_eq!(steps[2].outcome, Some(outcome));
        assert_eq!(steps[2].snapshot.keys(), vec![5]);

        rec.reset_path();
        assert!(rec.path().is_empty());
        assert_eq!(rec.into_steps().len(), 3);
    }
}
