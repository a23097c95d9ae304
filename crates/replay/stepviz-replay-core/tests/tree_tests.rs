use serde_json::json;
use stepviz_replay::{decode, Family, ResolvedKind, Snapshot, Step, Variant};

fn mk(action: &str) -> Step {
    Step::new(action)
}

/// it should rebalance an AVL-style log through its recorded rotation
#[test]
fn avl_rotation_log() {
    let kind = ResolvedKind::exact(Family::Tree, Variant::Avl);
    let steps = vec![
        mk("insert").with_value(30.0),
        mk("insert").with_value(20.0),
        mk("insert").with_value(10.0),
        mk("rotate_right").with_value(30.0),
    ];
    let snap = match decode(&kind, &steps, 3) {
        Snapshot::Tree(t) => t,
        other => panic!("expected Tree snapshot, got {other:?}"),
    };
    let root = &snap.nodes[&snap.root.unwrap()];
    assert_eq!(root.value, 20.0);
    assert_eq!(snap.nodes[&root.left.unwrap()].value, 10.0);
    assert_eq!(snap.nodes[&root.right.unwrap()].value, 30.0);
}

/// it should accept the hyphenated rotation spelling
#[test]
fn hyphenated_rotations() {
    let kind = ResolvedKind::exact(Family::Tree, Variant::Avl);
    let steps = vec![
        mk("insert").with_value(1.0),
        mk("insert").with_value(2.0),
        mk("insert").with_value(3.0),
        mk("rotate-left"),
    ];
    let snap = match decode(&kind, &steps, 3) {
        Snapshot::Tree(t) => t,
        other => panic!("expected Tree snapshot, got {other:?}"),
    };
    assert_eq!(snap.nodes[&snap.root.unwrap()].value, 2.0);
}

/// it should gain the promoted key in sorted order and split the leaf in two
#[test]
fn btree_child_split() {
    let kind = ResolvedKind::exact(Family::Tree, Variant::BTree);
    let steps = vec![
        mk("create_node").with_field("node_id", json!("root")),
        mk("insert_key_into_node").with_field("node_id", json!("root")).with_field("key", json!(40)),
        mk("create_node").with_field("node_id", json!("leaf")),
        mk("connect_nodes").with_field("parent_id", json!("root")).with_field("child_id", json!("leaf")),
        mk("insert_key_into_node").with_field("node_id", json!("leaf")).with_field("key", json!(10)),
        mk("insert_key_into_node").with_field("node_id", json!("leaf")).with_field("key", json!(20)),
        mk("insert_key_into_node").with_field("node_id", json!("leaf")).with_field("key", json!(30)),
        mk("split_child_node")
            .with_field("parent_id", json!("root"))
            .with_field("child_id", json!("leaf"))
            .with_field("promoted_key", json!(20)),
    ];
    let snap = match decode(&kind, &steps, 7) {
        Snapshot::BTree(t) => t,
        other => panic!("expected BTree snapshot, got {other:?}"),
    };
    let root = &snap.nodes["root"];
    // promoted key lands in sorted position
    assert_eq!(root.keys, vec![20.0, 40.0]);
    // the original leaf and its new sibling hang off the parent
    assert_eq!(root.children.len(), 2);
    assert_eq!(snap.nodes[&root.children[0]].keys, vec![10.0]);
    assert_eq!(snap.nodes[&root.children[1]].keys, vec![30.0]);
    assert_eq!(
        snap.nodes[&root.children[1]].parent.as_deref(),
        Some("root")
    );
}

/// it should color and recolor a red-black log
#[test]
fn redblack_log() {
    use stepviz_replay::NodeColor;
    let kind = ResolvedKind::exact(Family::Tree, Variant::RedBlack);
    let steps = vec![
        mk("set_root").with_value(10.0),
        mk("insert").with_value(20.0),
        mk("recolor").with_value(20.0).with_field("color", json!("black")),
    ];
    let snap = match decode(&kind, &steps, 2) {
        Snapshot::Tree(t) => t,
        other => panic!("expected Tree snapshot, got {other:?}"),
    };
    let root = &snap.nodes[&snap.root.unwrap()];
    assert_eq!(root.color, Some(NodeColor::Black));
    assert_eq!(snap.nodes[&root.right.unwrap()].color, Some(NodeColor::Black));
}

/// it should replay a heap extraction as hole-then-fill
#[test]
fn heap_extraction_phases() {
    let kind = ResolvedKind::exact(Family::Tree, Variant::Heap);
    let steps = vec![
        mk("insert").with_value("9"),
        mk("insert").with_value("4"),
        mk("insert").with_value("7"),
        mk("extract_root"),
        mk("move_last_to_root"),
        mk("swap").with_field("i", json!(0)).with_field("j", json!(1)),
    ];
    let at = |cursor| match decode(&kind, &steps, cursor) {
        Snapshot::Heap(h) => h.slots,
        other => panic!("expected Heap snapshot, got {other:?}"),
    };
    assert_eq!(at(3), vec![None, Some("4".into()), Some("7".into())]);
    assert_eq!(at(4), vec![Some("7".into()), Some("4".into())]);
    assert_eq!(at(5), vec![Some("4".into()), Some("7".into())]);
}
