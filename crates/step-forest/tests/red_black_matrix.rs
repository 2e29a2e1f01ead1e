use step_forest::red_black::{classify_insert, InsertCase};
use step_forest::{
    build, delete, insert, Color, NodeId, Outcome, Phase, RbTree, RedBlack, Rotation, Side, Step,
};

fn id(tree: &RbTree<i32>, key: i32) -> NodeId {
    tree.find(&key)
        .unwrap_or_else(|| panic!("{key} missing from tree"))
}

fn color_of(tree: &RbTree<i32>, key: i32) -> Color {
    tree.color(id(tree, key))
}

fn phases(steps: &[Step<i32>]) -> Vec<Phase> {
    steps.iter().map(|s| s.phase).collect()
}

/// Root black, no red-red edge, equal black height on every path.
fn assert_red_black(tree: &RbTree<i32>) {
    if let Err(err) = tree.validate() {
        panic!("invalid red-black tree: {err}\n{}", tree.print());
    }
    if let Some(root) = tree.root() {
        assert_eq!(tree.color(root), Color::Black);
    }
    assert!(tree.black_height().is_some());
}

#[test]
fn rb_nine_key_build_matrix() {
    let built = build::<i32, RedBlack, _>([10, 20, 30, 5, 15, 25, 35, 1, 8]);
    let tree = &built.tree;
    assert_red_black(tree);
    assert_eq!(tree.keys(), vec![1, 5, 8, 10, 15, 20, 25, 30, 35]);

    // 20B; 10R(5B(1R, 8R), 15B); 30B(25R, 35R)
    assert_eq!(tree.root().map(|r| *tree.key(r)), Some(20));
    assert_eq!(color_of(tree, 10), Color::Red);
    for key in [5, 15, 30] {
        assert_eq!(color_of(tree, key), Color::Black, "key {key}");
    }
    for key in [1, 8, 25, 35] {
        assert_eq!(color_of(tree, key), Color::Red, "key {key}");
    }
    assert_eq!(tree.black_height(), Some(2));

    // No snapshot of the final tree has a red node under a red node.
    let last = &built.steps.last().unwrap().snapshot;
    for node in &last.nodes {
        if node.state != step_forest::NodeState::Color(Color::Red) {
            continue;
        }
        for child in [node.left, node.right].into_iter().flatten() {
            assert_eq!(
                last.node(child).unwrap().state,
                step_forest::NodeState::Color(Color::Black)
            );
        }
    }

    let t = delete(tree, &30);
    assert_red_black(&t.tree);
    assert_eq!(t.tree.keys(), vec![1, 5, 8, 10, 15, 20, 25, 35]);
    assert_eq!(t.tree.black_height(), Some(2));
}

#[test]
fn rb_insert_state_machine_matrix() {
    // Parent right child, node left child: triangle, then line.
    let built = build::<i32, RedBlack, _>([10, 30]);
    let t = insert(&built.tree, 20);
    assert_eq!(
        phases(&t.steps),
        vec![
            Phase::InsertStart,
            Phase::InsertCompare,
            Phase::InsertCompare,
            Phase::InsertAttach,
            Phase::RbTriangle,
            Phase::RbLine,
            Phase::RbLine,
            Phase::RbLine,
            Phase::RbInsertTerminated,
            Phase::RbColorRoot,
            Phase::Done,
        ]
    );
    let tree = &t.tree;
    let (n10, n20, n30) = (id(tree, 10), id(tree, 20), id(tree, 30));
    let rotations: Vec<Rotation> = t.steps.iter().filter_map(|s| s.rotation).collect();
    assert_eq!(
        rotations,
        vec![
            Rotation { side: Side::Right, pivot: n30, promoted: n20 },
            Rotation { side: Side::Left, pivot: n10, promoted: n20 },
        ]
    );
    // Only the rotate steps carry a rotation, not the recolors around them.
    assert!(t.steps[4].rotation.is_some());
    assert!(t.steps[5].rotation.is_none() && t.steps[6].rotation.is_none());
    assert!(t.steps[7].rotation.is_some());
    assert_eq!(t.steps[7].message, "Uncle black and line shape: rotate left at 10");
    assert_eq!(tree.root().map(|r| *tree.key(r)), Some(20));
    assert_eq!(color_of(tree, 10), Color::Red);
    assert_eq!(color_of(tree, 30), Color::Red);
    assert_red_black(tree);

    // Straight line: a single rotation at the grandparent.
    let built = build::<i32, RedBlack, _>([30, 20]);
    let t = insert(&built.tree, 10);
    let p = phases(&t.steps);
    assert!(!p.contains(&Phase::RbTriangle));
    assert_eq!(p.iter().filter(|&&x| x == Phase::RbLine).count(), 3);
    assert_eq!(t.tree.root().map(|r| *t.tree.key(r)), Some(20));

    // Red uncle: recolor three nodes and climb to the root.
    let built = build::<i32, RedBlack, _>([20, 10, 30]);
    let t = insert(&built.tree, 5);
    let p = phases(&t.steps);
    assert_eq!(p.iter().filter(|&&x| x == Phase::RbUncleRed).count(), 3);
    assert!(p.contains(&Phase::RbInsertRoot));
    assert_eq!(color_of(&t.tree, 10), Color::Black);
    assert_eq!(color_of(&t.tree, 30), Color::Black);
    assert_eq!(color_of(&t.tree, 5), Color::Red);
    assert_red_black(&t.tree);
}

#[test]
fn rb_classify_insert_matrix() {
    let built = build::<i32, RedBlack, _>([20, 10, 30, 5]);
    let tree = &built.tree;
    assert_eq!(classify_insert(tree, id(tree, 20)), InsertCase::Root);
    assert_eq!(classify_insert(tree, id(tree, 5)), InsertCase::Terminated);
    assert_eq!(classify_insert(tree, id(tree, 30)), InsertCase::Terminated);
}

#[test]
fn rb_insert_into_empty_tree_matrix() {
    let t = insert(&RbTree::<i32>::new(), 7);
    assert_eq!(
        phases(&t.steps),
        vec![
            Phase::InsertStart,
            Phase::InsertRoot,
            Phase::RbInsertRoot,
            Phase::RbColorRoot,
            Phase::Done,
        ]
    );
    let root = t.tree.root().unwrap();
    assert_eq!(t.tree.color(root), Color::Black);
    // The leaf is created red and only turns black in the root recolor step.
    let created = &t.steps[1].snapshot;
    assert_eq!(
        created.node(root).unwrap().state,
        step_forest::NodeState::Color(Color::Red)
    );
}

#[test]
fn rb_delete_far_nephew_matrix() {
    let built = build::<i32, RedBlack, _>([10, 20, 30, 5, 15, 25, 35, 1, 8]);

    // 15 is a black leaf whose sibling 5 has a red far child 1.
    let t = delete(&built.tree, &15);
    let p = phases(&t.steps);
    assert!(p.contains(&Phase::RbFarChildRed));
    assert!(!p.contains(&Phase::RbSiblingRed));
    assert_eq!(p[p.len() - 2], Phase::RbAbsorb);

    let tree = &t.tree;
    assert_red_black(tree);
    let n5 = id(tree, 5);
    assert_eq!(tree.get(tree.root().unwrap()).unwrap().l, n5);
    assert_eq!(tree.color(n5), Color::Red);
    assert_eq!(color_of(tree, 1), Color::Black);
    assert_eq!(color_of(tree, 10), Color::Black);
    assert_eq!(color_of(tree, 8), Color::Red);
    assert_eq!(tree.get(id(tree, 10)).unwrap().l, id(tree, 8));
}

#[test]
fn rb_delete_red_node_skips_fixup_matrix() {
    let built = build::<i32, RedBlack, _>([10, 20, 30, 5, 15, 25, 35, 1, 8]);
    let t = delete(&built.tree, &35);
    let p = phases(&t.steps);
    assert!(p.contains(&Phase::RbDeleteRedRemoved));
    assert!(!p.contains(&Phase::RbAbsorb));
    assert_red_black(&t.tree);
}

#[test]
fn rb_delete_root_down_to_empty_matrix() {
    let mut tree = build::<i32, RedBlack, _>([2, 1, 3]).tree;
    for key in [2, 1, 3] {
        let t = delete(&tree, &key);
        assert!(matches!(t.outcome, Outcome::Deleted { .. }), "key {key}");
        assert_red_black(&t.tree);
        tree = t.tree;
    }
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(delete(&tree, &2).outcome, Outcome::EmptyTree);
}

#[test]
fn rb_util_insert_delete_various_numbers_matrix() {
    let mut tree = RbTree::<i32>::new();
    for value in [10, 11, 12, 50, 60, 25, 100, 88, 33, 22, 55, 59, 51] {
        tree.insert(value);
        assert_red_black(&tree);
    }
    assert_eq!(tree.len(), 13);

    for (value, size) in [(100, 12), (33, 11), (33, 11), (10, 10), (60, 9), (51, 8)] {
        tree.remove(&value);
        assert_red_black(&tree);
        assert_eq!(tree.len(), size, "after deleting {value}");
    }
    assert_eq!(tree.keys(), vec![11, 12, 22, 25, 50, 55, 59, 88]);
}

#[test]
fn rb_ladder_matrix() {
    let mut tree = RbTree::<i32>::new();
    for i in 0..256 {
        tree.insert(i);
        assert_red_black(&tree);
    }
    // 2 * log2(n + 1) bound on red-black height.
    assert!(tree.height() <= 16);
    for i in (0..256).rev().step_by(2) {
        tree.remove(&i);
        assert_red_black(&tree);
    }
    assert_eq!(tree.keys(), (0..256).step_by(2).collect::<Vec<_>>());
}
