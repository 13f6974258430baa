//! Tests for Tree construction and the read-only node surface

use rstest::rstest;

use polytree::domain::{Tree, TreeError, Value, DEFAULT_MAX_DEGREE};

// ============================================================
// Construction
// ============================================================

#[test]
fn given_new_tree_when_inspecting_then_empty_with_default_degree() {
    let tree = Tree::new();

    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.max_degree(), DEFAULT_MAX_DEGREE);
    assert_eq!(tree.max_degree(), 2);
    assert!(tree.root().is_none());
}

#[test]
fn given_zero_degree_when_creating_tree_then_invalid_argument() {
    let result = Tree::with_max_degree(0);
    assert!(matches!(result, Err(TreeError::InvalidArgument(_))));
}

#[test]
fn given_root_when_adding_then_root_holds_value_and_key() {
    let mut tree = Tree::new();
    let root = tree.add_root("root").unwrap();

    let node = tree.root().unwrap();
    assert_eq!(node.id(), root);
    assert_eq!(node.value(), &Value::Text("root".into()));
    assert_eq!(node.value_string(), "root");
    assert_eq!(node.key(), "root".chars().map(|c| c as u64).sum::<u64>());
    assert_eq!(tree.value_string(root), Some("root"));
    assert_eq!(tree.key(root), Some(node.key()));
    assert!(node.parent().is_none());
    assert!(node.is_leaf());
}

#[test]
fn given_existing_root_when_adding_root_again_then_old_subtree_is_dropped() {
    let mut tree = Tree::new();
    let old = tree.add_root("old").unwrap();
    let child = tree.add_sub_node(old, "child").unwrap();

    let new = tree.add_root(5).unwrap();

    assert_eq!(tree.len(), 1);
    assert_eq!(tree.root().unwrap().id(), new);
    assert!(tree.node(old).is_none());
    assert!(tree.node(child).is_none());
}

// ============================================================
// add_sub_node
// ============================================================

#[test]
fn given_parent_when_adding_children_then_order_is_preserved() {
    let mut tree = Tree::with_max_degree(3).unwrap();
    let root = tree.add_root("root").unwrap();
    tree.add_sub_node(root, 1).unwrap();
    tree.add_sub_node(root, "n2").unwrap();
    let last = tree.add_sub_node(root, 12.35).unwrap();

    let children: Vec<&str> = tree
        .children(root)
        .unwrap()
        .iter()
        .map(|c| c.value_string())
        .collect();
    assert_eq!(children, vec!["1", "n2", "12.35"]);
    assert_eq!(tree.node(last).unwrap().parent(), Some(root));
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(5)]
fn given_full_parent_when_adding_child_then_degree_exceeded(#[case] max_degree: usize) {
    let mut tree = Tree::with_max_degree(max_degree).unwrap();
    let root = tree.add_root("root").unwrap();
    for i in 0..max_degree {
        tree.add_sub_node(root, i as i64).unwrap();
    }

    let result = tree.add_sub_node(root, "one too many");

    assert_eq!(result, Err(TreeError::DegreeExceeded { max_degree }));
    assert_eq!(tree.root().unwrap().child_count(), max_degree);
    assert_eq!(tree.len(), max_degree + 1);
}

#[test]
fn given_stale_parent_when_adding_child_then_invalid_argument() {
    let mut tree = Tree::new();
    let old = tree.add_root("old").unwrap();
    tree.add_root("new").unwrap();

    let result = tree.add_sub_node(old, "child");

    assert!(matches!(result, Err(TreeError::InvalidArgument(_))));
    assert_eq!(tree.len(), 1);
}

#[test]
fn given_non_finite_value_when_adding_then_unsupported_value() {
    let mut tree = Tree::new();
    assert!(matches!(
        tree.add_root(f64::INFINITY),
        Err(TreeError::UnsupportedValue(_))
    ));
    assert!(tree.is_empty());

    let root = tree.add_root("root").unwrap();
    assert!(matches!(
        tree.add_sub_node(root, (1.0, f64::NAN)),
        Err(TreeError::UnsupportedValue(_))
    ));
    assert_eq!(tree.len(), 1);
}

#[test]
fn given_duplicate_values_when_adding_then_nodes_stay_distinct() {
    let mut tree = Tree::new();
    let root = tree.add_root("x").unwrap();
    let a = tree.add_sub_node(root, "x").unwrap();
    let b = tree.add_sub_node(root, "x").unwrap();
    tree.add_sub_node(b, "leaf").unwrap();

    assert_ne!(a, b);
    assert_eq!(tree.node(a).unwrap().child_count(), 0);
    assert_eq!(tree.node(b).unwrap().child_count(), 1);
}

// ============================================================
// Derived queries
// ============================================================

#[test]
fn given_chain_when_querying_depth_and_leaves_then_matches_shape() {
    let mut tree = Tree::with_max_degree(1).unwrap();
    let mut current = tree.add_root(0).unwrap();
    for i in 1..5 {
        current = tree.add_sub_node(current, i).unwrap();
    }

    assert_eq!(tree.depth(), 5);
    assert_eq!(tree.leaves(), vec!["4"]);
}
