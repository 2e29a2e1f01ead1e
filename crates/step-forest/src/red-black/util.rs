use crate::error::InvariantError;
use crate::rotation::Side;
use crate::step::{Phase, StepRecorder};
use crate::tree::{Removal, Tree};
use crate::types::{Color, Key, NodeId};

use super::{RbNode, RedBlack};

/// State of the insert fixup loop for the node currently being repaired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertCase {
    /// The node is the root; only the final root recolor remains.
    Root,
    /// Parent and uncle are red: recolor and move up to the grandparent.
    UncleRed,
    /// Uncle is black and the node is an inner grandchild: rotate the parent.
    UncleBlackTriangle,
    /// Uncle is black and the node is an outer grandchild: recolor and rotate
    /// the grandparent.
    UncleBlackLine,
    /// Parent is black; nothing left to repair.
    Terminated,
}

#[inline]
pub(crate) fn color<K: Key>(tree: &Tree<K, RedBlack>, id: NodeId) -> Color {
    if id.is_nil() {
        Color::Black
    } else {
        tree.node(id).color
    }
}

/// Recolors `id` and records the change. The sentinel is always black, so
/// painting it black only records the step.
fn paint<K: Key>(
    tree: &mut Tree<K, RedBlack>,
    id: NodeId,
    c: Color,
    phase: Phase,
    role: &str,
    rec: &mut StepRecorder<K>,
) {
    let message = if id.is_nil() {
        debug_assert_eq!(c, Color::Black, "the sentinel cannot turn red");
        format!("Color {role} (nil) {c}")
    } else {
        tree.node_mut(id).color = c;
        format!("Color {role} {} {c}", tree.key(id))
    };
    rec.step(tree, phase, message, &[id]);
}

/// Classifies node `z` for the next iteration of the insert fixup.
pub fn classify_insert<K: Key>(tree: &Tree<K, RedBlack>, z: NodeId) -> InsertCase {
    if z == tree.root {
        return InsertCase::Root;
    }
    let p = tree.p(z);
    if color(tree, p) == Color::Black {
        return InsertCase::Terminated;
    }
    // A red parent is never the root, so the grandparent exists.
    let g = tree.p(p);
    debug_assert!(!g.is_nil(), "red parent {p} without a grandparent");
    if color(tree, tree.sibling(g, p)) == Color::Red {
        return InsertCase::UncleRed;
    }
    let parent_is_left = tree.l(g) == p;
    let node_is_left = tree.l(p) == z;
    if parent_is_left != node_is_left {
        InsertCase::UncleBlackTriangle
    } else {
        InsertCase::UncleBlackLine
    }
}

pub(crate) fn fixup_after_insert<K: Key>(
    tree: &mut Tree<K, RedBlack>,
    node: NodeId,
    rec: &mut StepRecorder<K>,
) {
    let mut z = node;
    loop {
        match classify_insert(tree, z) {
            InsertCase::Root => {
                let message = format!("{} is the root", tree.key(z));
                rec.step(tree, Phase::RbInsertRoot, message, &[z]);
                break;
            }
            InsertCase::Terminated => {
                let p = tree.p(z);
                let message = format!(
                    "Parent {} of {} is black: no red-red conflict",
                    tree.key(p),
                    tree.key(z)
                );
                rec.step(tree, Phase::RbInsertTerminated, message, &[z, p]);
                break;
            }
            InsertCase::UncleRed => {
                let p = tree.p(z);
                let g = tree.p(p);
                let u = tree.sibling(g, p);
                paint(tree, p, Color::Black, Phase::RbUncleRed, "parent", rec);
                paint(tree, u, Color::Black, Phase::RbUncleRed, "uncle", rec);
                paint(tree, g, Color::Red, Phase::RbUncleRed, "grandparent", rec);
                z = g;
            }
            InsertCase::UncleBlackTriangle => {
                let p = tree.p(z);
                let (zk, pk) = (tree.key(z).clone(), tree.key(p).clone());
                let side = if tree.l(p) == z { Side::Right } else { Side::Left };
                let rot = tree.rotate(p, side);
                let message =
                    format!("Uncle black and {zk} is an inner child: rotate {side} at {pk}");
                rec.rotated(tree, Phase::RbTriangle, message, rot);
                // The old parent is now the outer child; the next pass sees a line.
                z = p;
            }
            InsertCase::UncleBlackLine => {
                let p = tree.p(z);
                let g = tree.p(p);
                paint(tree, p, Color::Black, Phase::RbLine, "parent", rec);
                paint(tree, g, Color::Red, Phase::RbLine, "grandparent", rec);
                let gk = tree.key(g).clone();
                let side = if tree.l(g) == p { Side::Right } else { Side::Left };
                let rot = tree.rotate(g, side);
                let message = format!("Uncle black and line shape: rotate {side} at {gk}");
                rec.rotated(tree, Phase::RbLine, message, rot);
            }
        }
    }
    let root = tree.root;
    paint(tree, root, Color::Black, Phase::RbColorRoot, "root", rec);
}

/// Canonical four-case repair of a double-black `x` after removing a black
/// node. `x` may be the sentinel, in which case its parent link was set by
/// the splice.
pub(crate) fn fixup_after_delete<K: Key>(
    tree: &mut Tree<K, RedBlack>,
    removal: &Removal<RbNode<K>>,
    rec: &mut StepRecorder<K>,
) {
    let mut x = removal.replacement;
    if !removal.node.is_black() {
        rec.step(
            tree,
            Phase::RbDeleteRedRemoved,
            format!("Removed node {} was red: black heights unchanged", removal.node.k),
            &[x],
        );
        return;
    }

    while x != tree.root && color(tree, x) == Color::Black {
        let p = tree.p(x);
        let x_left = tree.l(p) == x;
        let mut w = tree.sibling(p, x);

        if color(tree, w) == Color::Red {
            paint(tree, w, Color::Black, Phase::RbSiblingRed, "sibling", rec);
            paint(tree, p, Color::Red, Phase::RbSiblingRed, "parent", rec);
            let pk = tree.key(p).clone();
            let side = if x_left { Side::Left } else { Side::Right };
            let rot = tree.rotate(p, side);
            let message = format!("Sibling red: rotate {side} at {pk}");
            rec.rotated(tree, Phase::RbSiblingRed, message, rot);
            w = if x_left { tree.r(p) } else { tree.l(p) };
        }

        let (near, far) = if x_left {
            (tree.l(w), tree.r(w))
        } else {
            (tree.r(w), tree.l(w))
        };

        if color(tree, near) == Color::Black && color(tree, far) == Color::Black {
            paint(
                tree,
                w,
                Color::Red,
                Phase::RbSiblingBlackChildrenBlack,
                "sibling",
                rec,
            );
            x = p;
            let message = format!("Double black moves up to {}", tree.key(x));
            rec.step(tree, Phase::RbSiblingBlackChildrenBlack, message, &[x]);
            continue;
        }

        if color(tree, far) == Color::Black {
            paint(tree, near, Color::Black, Phase::RbNearChildRed, "near nephew", rec);
            paint(tree, w, Color::Red, Phase::RbNearChildRed, "sibling", rec);
            let wk = tree.key(w).clone();
            let side = if x_left { Side::Right } else { Side::Left };
            let rot = tree.rotate(w, side);
            let message = format!("Near nephew red: rotate {side} at {wk}");
            rec.rotated(tree, Phase::RbNearChildRed, message, rot);
            w = if x_left { tree.r(p) } else { tree.l(p) };
        }

        let far = if x_left { tree.r(w) } else { tree.l(w) };
        let pc = color(tree, p);
        paint(tree, w, pc, Phase::RbFarChildRed, "sibling", rec);
        paint(tree, p, Color::Black, Phase::RbFarChildRed, "parent", rec);
        paint(tree, far, Color::Black, Phase::RbFarChildRed, "far nephew", rec);
        let pk = tree.key(p).clone();
        let side = if x_left { Side::Left } else { Side::Right };
        let rot = tree.rotate(p, side);
        let message = format!("Far nephew red: rotate {side} at {pk}");
        rec.rotated(tree, Phase::RbFarChildRed, message, rot);
        x = tree.root;
    }

    paint(tree, x, Color::Black, Phase::RbAbsorb, "node", rec);
}

pub(crate) fn check<K: Key>(tree: &Tree<K, RedBlack>) -> Result<(), InvariantError> {
    if !tree.root.is_nil() && color(tree, tree.root) == Color::Red {
        return Err(InvariantError::RedRoot(tree.root));
    }
    black_height(tree, tree.root).map(|_| ())
}

/// Black nodes on every path from `id` down to the sentinel, `id` included.
pub(crate) fn black_height<K: Key>(
    tree: &Tree<K, RedBlack>,
    id: NodeId,
) -> Result<usize, InvariantError> {
    if id.is_nil() {
        return Ok(0);
    }
    let l = tree.l(id);
    let r = tree.r(id);
    let red = color(tree, id) == Color::Red;
    if red {
        for child in [l, r] {
            if !child.is_nil() && color(tree, child) == Color::Red {
                return Err(InvariantError::RedRed { parent: id, child });
            }
        }
    }
    let left = black_height(tree, l)?;
    let right = black_height(tree, r)?;
    if left != right {
        return Err(InvariantError::BlackHeight { id, left, right });
    }
    Ok(left + usize::from(!red))
}
