use crate::error::InvariantError;
use crate::rotation::Side;
use crate::step::{Phase, StepRecorder};
use crate::tree::Tree;
use crate::types::{Key, NodeId};

use super::Avl;

/// Shape of an imbalance, named after the path from the unbalanced node to
/// the heavy grandchild.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AvlCase {
    LeftLeft,
    LeftRight,
    RightRight,
    RightLeft,
}

#[inline]
pub(crate) fn height<K: Key>(tree: &Tree<K, Avl>, id: NodeId) -> u32 {
    if id.is_nil() {
        0
    } else {
        tree.node(id).height
    }
}

#[inline]
pub(crate) fn balance<K: Key>(tree: &Tree<K, Avl>, id: NodeId) -> i32 {
    height(tree, tree.l(id)) as i32 - height(tree, tree.r(id)) as i32
}

pub(crate) fn update_height<K: Key>(tree: &mut Tree<K, Avl>, id: NodeId) {
    let h = 1 + height(tree, tree.l(id)).max(height(tree, tree.r(id)));
    tree.node_mut(id).height = h;
}

/// Picks the rotation case for node `n` whose balance is `b` (|b| > 1).
///
/// After an insert the inserted key decides which grandchild is heavy; after
/// a delete there is no such key and the child's own balance decides.
pub fn classify<K: Key>(tree: &Tree<K, Avl>, n: NodeId, b: i32, inserted: Option<&K>) -> AvlCase {
    if b > 1 {
        let child = tree.l(n);
        let outer = match inserted {
            Some(k) => k < tree.key(child),
            None => balance(tree, child) >= 0,
        };
        if outer {
            AvlCase::LeftLeft
        } else {
            AvlCase::LeftRight
        }
    } else {
        let child = tree.r(n);
        let outer = match inserted {
            Some(k) => k > tree.key(child),
            None => balance(tree, child) <= 0,
        };
        if outer {
            AvlCase::RightRight
        } else {
            AvlCase::RightLeft
        }
    }
}

/// Applies the rotations for `case` at `n`, recording one step per
/// rotation. Returns the new subtree root.
fn rebalance<K: Key>(
    tree: &mut Tree<K, Avl>,
    n: NodeId,
    case: AvlCase,
    rec: &mut StepRecorder<K>,
) -> NodeId {
    let key = tree.key(n).clone();
    match case {
        AvlCase::LeftLeft => {
            let rot = tree.rotate(n, Side::Right);
            let message = format!("LL imbalance at {key}: rotate right at {key}");
            rec.rotated(tree, Phase::AvlRotateLl, message, rot);
            rot.promoted
        }
        AvlCase::RightRight => {
            let rot = tree.rotate(n, Side::Left);
            let message = format!("RR imbalance at {key}: rotate left at {key}");
            rec.rotated(tree, Phase::AvlRotateRr, message, rot);
            rot.promoted
        }
        AvlCase::LeftRight => {
            let child = tree.l(n);
            let child_key = tree.key(child).clone();
            let rot = tree.rotate(child, Side::Left);
            let message = format!("LR imbalance at {key}: rotate left at {child_key}");
            rec.rotated(tree, Phase::AvlRotateLr, message, rot);
            let rot = tree.rotate(n, Side::Right);
            let message = format!("LR imbalance at {key}: rotate right at {key}");
            rec.rotated(tree, Phase::AvlRotateLr, message, rot);
            rot.promoted
        }
        AvlCase::RightLeft => {
            let child = tree.r(n);
            let child_key = tree.key(child).clone();
            let rot = tree.rotate(child, Side::Right);
            let message = format!("RL imbalance at {key}: rotate right at {child_key}");
            rec.rotated(tree, Phase::AvlRotateRl, message, rot);
            let rot = tree.rotate(n, Side::Left);
            let message = format!("RL imbalance at {key}: rotate left at {key}");
            rec.rotated(tree, Phase::AvlRotateRl, message, rot);
            rot.promoted
        }
    }
}

/// Walks from `start` up to the root refreshing heights and rotating
/// wherever |balance| exceeds 1.
pub(crate) fn retrace<K: Key>(
    tree: &mut Tree<K, Avl>,
    start: NodeId,
    inserted: Option<&K>,
    rec: &mut StepRecorder<K>,
) {
    let mut curr = start;
    while !curr.is_nil() {
        let before = height(tree, curr);
        update_height(tree, curr);
        let after = height(tree, curr);
        let b = balance(tree, curr);
        let message = if before == after {
            format!("{}: height stays {after}, balance {b}", tree.key(curr))
        } else {
            format!("{}: height {before} -> {after}, balance {b}", tree.key(curr))
        };
        rec.step(tree, Phase::AvlUpdateHeight, message, &[curr]);

        let top = if b.abs() > 1 {
            let case = classify(tree, curr, b, inserted);
            rebalance(tree, curr, case, rec)
        } else {
            curr
        };
        curr = tree.p(top);
    }
}

pub(crate) fn check<K: Key>(tree: &Tree<K, Avl>) -> Result<(), InvariantError> {
    check_subtree(tree, tree.root).map(|_| ())
}

fn check_subtree<K: Key>(tree: &Tree<K, Avl>, id: NodeId) -> Result<u32, InvariantError> {
    if id.is_nil() {
        return Ok(0);
    }
    let lh = check_subtree(tree, tree.l(id))?;
    let rh = check_subtree(tree, tree.r(id))?;
    let expected = 1 + lh.max(rh);
    let stored = height(tree, id);
    if stored != expected {
        return Err(InvariantError::HeightMismatch {
            id,
            stored,
            expected,
        });
    }
    let balance = lh as i32 - rh as i32;
    if balance.abs() > 1 {
        return Err(InvariantError::Unbalanced { id, balance });
    }
    Ok(expected)
}
