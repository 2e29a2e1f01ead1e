//! Left/right rotations shared by both policies.
//!
//! ```text
//!      x                y
//!     / \              / \
//!    a   y    <->     x   c
//!       / \          / \
//!      b   c        a   b
//! ```
//!
//! Rotations only relink; the policy's [`Policy::after_rotate`] hook runs
//! once the links are final (AVL refreshes heights, red-black does nothing).

use std::fmt;

use serde::Serialize;

use crate::tree::{Policy, Tree};
use crate::types::{Key, NodeId};

/// Direction of a rotation: `Left` promotes the right child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Left => "left",
            Side::Right => "right",
        })
    }
}

/// A rotation as applied: `pivot` went down, `promoted` took its place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Rotation {
    pub side: Side,
    pub pivot: NodeId,
    pub promoted: NodeId,
}

impl<K: Key, P: Policy<K>> Tree<K, P> {
    pub fn rotate(&mut self, pivot: NodeId, side: Side) -> Rotation {
        let promoted = match side {
            Side::Left => self.rotate_left(pivot),
            Side::Right => self.rotate_right(pivot),
        };
        Rotation {
            side,
            pivot,
            promoted,
        }
    }

    /// Promotes `x.right` into `x`'s place and returns it.
    pub fn rotate_left(&mut self, x: NodeId) -> NodeId {
        let y = self.r(x);
        debug_assert!(!y.is_nil(), "rotate_left({x}) needs a right child");

        let yl = self.l(y);
        self.set_r(x, yl);
        if !yl.is_nil() {
            self.set_p(yl, x);
        }

        let xp = self.p(x);
        self.set_p(y, xp);
        self.replace_child(xp, x, y);

        self.set_l(y, x);
        self.set_p(x, y);

        P::after_rotate(self, x, y);
        y
    }

    /// Promotes `x.left` into `x`'s place and returns it.
    pub fn rotate_right(&mut self, x: NodeId) -> NodeId {
        let y = self.l(x);
        debug_assert!(!y.is_nil(), "rotate_right({x}) needs a left child");

        let yr = self.r(y);
        self.set_l(x, yr);
        if !yr.is_nil() {
            self.set_p(yr, x);
        }

        let xp = self.p(x);
        self.set_p(y, xp);
        self.replace_child(xp, x, y);

        self.set_r(y, x);
        self.set_p(x, y);

        P::after_rotate(self, x, y);
        y
    }
}

#[cfg(test)]
mod tests {
    use super::{Rotation, Side};
    use crate::avl::Avl;
    use crate::red_black::RedBlack;
    use crate::tree::{Policy, Tree};
    use crate::types::{Color, Key, NodeId, NodeState};

    /// Links `keys` into a tree by plain BST descent, no rebalancing.
    fn unbalanced<P: Policy<i32>>(keys: &[i32]) -> Tree<i32, P> {
        let mut tree = Tree::<i32, P>::new();
        for &k in keys {
            let id = tree.store.alloc(P::leaf(k));
            if tree.root.is_nil() {
                tree.root = id;
                continue;
            }
            let mut curr = tree.root;
            loop {
                let next = if k < *tree.key(curr) {
                    tree.l(curr)
                } else {
                    tree.r(curr)
                };
                if next.is_nil() {
                    break;
                }
                curr = next;
            }
            if k < *tree.key(curr) {
                tree.set_l(curr, id);
            } else {
                tree.set_r(curr, id);
            }
            tree.set_p(id, curr);
        }
        tree
    }

    fn id_of<K: Key, P: Policy<K>>(tree: &Tree<K, P>, key: K) -> NodeId {
        tree.find(&key).unwrap()
    }

    #[test]
    fn rotate_left_at_root_promotes_right_child() {
        let mut tree = unbalanced::<RedBlack>(&[10, 5, 20, 15, 25]);
        let x = id_of(&tree, 10);
        let y = id_of(&tree, 20);
        let b = id_of(&tree, 15);

        assert_eq!(tree.rotate_left(x), y);
        assert_eq!(tree.root(), Some(y));
        assert!(tree.p(y).is_nil());
        assert_eq!(tree.l(y), x);
        assert_eq!(tree.p(x), y);
        assert_eq!(tree.r(x), b);
        assert_eq!(tree.p(b), x);
        assert_eq!(tree.keys(), vec![5, 10, 15, 20, 25]);
    }

    #[test]
    fn rotate_right_below_root_relinks_grandparent() {
        let mut tree = unbalanced::<RedBlack>(&[50, 30, 70, 20, 40, 10]);
        let x = id_of(&tree, 30);
        let y = id_of(&tree, 20);
        let root = id_of(&tree, 50);

        assert_eq!(tree.rotate_right(x), y);
        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.l(root), y);
        assert_eq!(tree.p(y), root);
        assert_eq!(tree.r(y), x);
        assert_eq!(tree.keys(), vec![10, 20, 30, 40, 50, 70]);
    }

    #[test]
    fn rotate_reports_what_moved() {
        let mut tree = unbalanced::<Avl>(&[3, 2, 1]);
        let (n3, n2) = (id_of(&tree, 3), id_of(&tree, 2));
        let rot = tree.rotate(n3, Side::Right);
        assert_eq!(
            rot,
            Rotation {
                side: Side::Right,
                pivot: n3,
                promoted: n2,
            }
        );
        assert_eq!(tree.root(), Some(n2));
        assert_eq!(tree.r(n2), n3);
        assert_eq!(Side::Left.to_string(), "left");
    }

    #[test]
    fn rotation_keeps_colors() {
        let mut tree = unbalanced::<RedBlack>(&[1, 2, 3]);
        let before: Vec<_> = tree.snapshot().nodes.iter().map(|n| n.state).collect();
        let root = tree.root;
        tree.rotate_left(root);
        let after: Vec<_> = tree.snapshot().nodes.iter().map(|n| n.state).collect();
        assert_eq!(before, after);
        assert!(after.iter().all(|s| *s == NodeState::Color(Color::Red)));
    }

    #[test]
    fn rotation_refreshes_avl_heights() {
        let mut tree = unbalanced::<Avl>(&[1, 2, 3]);
        let root = tree.root;
        let top = tree.rotate_left(root);
        assert_eq!(*tree.key(top), 2);
        assert_eq!(tree.node(top).height, 2);
        assert_eq!(tree.node(root).height, 1);
        assert_eq!(tree.height(), 2);
    }

    #[test]
    #[should_panic(expected = "needs a right child")]
    #[cfg(debug_assertions)]
    fn rotating_towards_the_sentinel_panics() {
        let mut tree = unbalanced::<Avl>(&[2, 1]);
        let root = tree.root;
        tree.rotate_left(root);
    }
}
