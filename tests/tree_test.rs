//! Tests for OrgTree membership rules and traversals

use std::collections::HashSet;

use rstest::{fixture, rstest};

use orgtree::domain::{
    sample_chart, Collector, CompositeId, Department, DomainError, NodeId, NodeKind, OrgTree,
    TreeBuilder,
};
use orgtree::util::testing;

/// A(composite) -> [B(leaf), C(composite) -> [D(leaf)]]
struct Small {
    tree: OrgTree,
    a: CompositeId,
    b: NodeId,
    c: CompositeId,
    d: NodeId,
}

#[fixture]
fn small() -> Small {
    testing::init_test_setup();
    let mut builder = TreeBuilder::new();
    let a = builder.company("A");
    let b = builder.department("B", Department::HumanResources);
    let c = builder.company("C");
    let d = builder.department("D", Department::Finance);
    builder
        .attach(a, b)
        .unwrap()
        .attach(a, c)
        .unwrap()
        .attach(c, d)
        .unwrap();
    let tree = builder.build(a).unwrap();
    Small { tree, a, b, c, d }
}

fn names(tree: &OrgTree, from: NodeId) -> Vec<String> {
    let mut sink = Collector::new();
    tree.display(from, &mut sink).unwrap();
    sink.texts().into_iter().map(String::from).collect()
}

// ============================================================
// Traversal
// ============================================================

#[rstest]
fn given_small_tree_when_displaying_then_yields_a_b_c_d(small: Small) {
    assert_eq!(names(&small.tree, small.a.id()), vec!["A", "B", "C", "D"]);
}

#[rstest]
fn given_small_tree_when_describing_duty_then_same_order_with_role_texts(small: Small) {
    let mut display = Collector::new();
    let mut duties = Collector::new();
    small.tree.display(small.a.id(), &mut display).unwrap();
    small.tree.describe_duty(small.a.id(), &mut duties).unwrap();

    assert_eq!(duties.nodes(), display.nodes());
    assert_eq!(
        duties.texts(),
        vec![
            "A, coordinates all company affairs.",
            "B, handles recruitment and payroll.",
            "C, coordinates all company affairs.",
            "D, handles financial management.",
        ]
    );
}

#[rstest]
fn given_subtree_start_when_displaying_then_only_subtree_visited(small: Small) {
    assert_eq!(names(&small.tree, small.c.id()), vec!["C", "D"]);
    assert_eq!(names(&small.tree, small.b), vec!["B"]);
}

#[rstest]
fn given_sample_chart_when_displaying_then_every_node_visited_once() {
    let tree = sample_chart().unwrap();
    let root = tree.root().unwrap();
    let mut sink = Collector::new();

    let visited = tree.display(root, &mut sink).unwrap();

    let unique: HashSet<NodeId> = sink.nodes().into_iter().collect();
    assert_eq!(visited, tree.len());
    assert_eq!(unique.len(), tree.len());
}

#[rstest]
fn given_insertion_order_when_displaying_then_children_follow_it() {
    let mut tree = OrgTree::new();
    let root = tree.insert_composite("root");
    for name in ["z", "a", "m"] {
        let leaf = tree.insert_leaf(name, Department::Finance);
        tree.add(root, leaf).unwrap();
    }
    assert_eq!(names(&tree, root.id()), vec!["root", "z", "a", "m"]);
}

#[rstest]
fn given_small_tree_when_collecting_lines_then_depth_recorded(small: Small) {
    let mut sink = Collector::new();
    small.tree.display(small.a.id(), &mut sink).unwrap();
    let depths: Vec<usize> = sink.lines().iter().map(|l| l.depth).collect();
    assert_eq!(depths, vec![0, 1, 1, 2]);
}

// ============================================================
// Membership
// ============================================================

#[rstest]
fn given_present_child_when_adding_again_then_children_unchanged(mut small: Small) {
    let before = small.tree.children(small.a.id()).unwrap().to_vec();

    let changed = small.tree.add(small.a, small.b).unwrap();

    assert!(!changed);
    assert_eq!(small.tree.children(small.a.id()).unwrap(), before.as_slice());
}

#[rstest]
fn given_absent_child_when_removing_then_noop(mut small: Small) {
    let before = small.tree.children(small.a.id()).unwrap().to_vec();

    let changed = small.tree.remove(small.a, small.d).unwrap();

    assert!(!changed);
    assert_eq!(small.tree.children(small.a.id()).unwrap(), before.as_slice());
}

#[rstest]
fn given_equal_names_when_removing_then_identity_decides(mut small: Small) {
    let twin = small.tree.insert_leaf("B", Department::HumanResources);
    small.tree.add(small.a, twin).unwrap();

    small.tree.remove(small.a, small.b).unwrap();

    assert_eq!(
        small.tree.children(small.a.id()).unwrap(),
        &[small.c.id(), twin]
    );
}

#[rstest]
fn given_leaf_when_narrowing_then_reported_and_tree_untouched(small: Small) {
    let before = names(&small.tree, small.a.id());

    let result = small.tree.narrow(small.d);

    match result {
        Err(e @ DomainError::NotComposite { .. }) => {
            assert!(e.is_informational());
            assert_eq!(e.to_string(), "D has no sub-units, operation not supported");
        }
        other => panic!("expected NotComposite, got {:?}", other),
    }
    assert!(small.tree.children(small.d).unwrap().is_empty());
    assert_eq!(
        small.tree.node(small.d).unwrap().kind(),
        &NodeKind::Leaf(Department::Finance)
    );
    assert_eq!(names(&small.tree, small.a.id()), before);
}

#[rstest]
fn given_composite_handle_when_narrowing_then_same_identity(small: Small) {
    assert_eq!(small.tree.narrow(small.c.id()).unwrap(), small.c);
}

#[rstest]
fn given_root_when_added_under_grandchild_path_then_cycle_rejected(mut small: Small) {
    let result = small.tree.add(small.c, small.a.id());

    assert_eq!(
        result,
        Err(DomainError::CycleDetected {
            parent: "C".to_string(),
            child: "A".to_string(),
        })
    );
    assert_eq!(names(&small.tree, small.a.id()), vec!["A", "B", "C", "D"]);
}

#[rstest]
fn given_sample_chart_handle_when_used_on_other_tree_then_unknown_node(mut small: Small) {
    let chart = sample_chart().unwrap();
    let chart_root = chart.root().unwrap();
    let foreign = chart.children(chart_root).unwrap()[0];
    let mut sink = Collector::new();

    assert_eq!(
        small.tree.display(foreign, &mut sink),
        Err(DomainError::UnknownNode)
    );
    assert_eq!(
        small.tree.add(small.a, foreign),
        Err(DomainError::UnknownNode)
    );
    assert_eq!(small.tree.narrow(chart_root), Err(DomainError::UnknownNode));
    assert!(sink.is_empty());
    assert_eq!(names(&small.tree, small.a.id()), vec!["A", "B", "C", "D"]);
}

#[rstest]
fn given_shared_subtree_when_added_to_second_parent_then_allowed(mut small: Small) {
    let other = small.tree.insert_composite("E");
    assert!(small.tree.add(other, small.c.id()).unwrap());
    assert_eq!(names(&small.tree, other.id()), vec!["E", "C", "D"]);
}

// ============================================================
// Queries
// ============================================================

#[rstest]
fn given_small_tree_when_querying_then_depth_and_leaves(small: Small) {
    assert_eq!(small.tree.depth(small.a.id()), 3);
    assert_eq!(small.tree.depth(small.b), 1);
    assert_eq!(small.tree.leaf_names(small.a.id()), vec!["B", "D"]);
    assert!(small.tree.reaches(small.a.id(), small.d));
    assert!(!small.tree.reaches(small.c.id(), small.b));
}
