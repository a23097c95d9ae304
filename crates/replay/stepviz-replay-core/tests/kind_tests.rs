use stepviz_replay::{resolve, Confidence, Family, KindHint, Step, Variant};

fn hint(tag: &str) -> KindHint {
    KindHint {
        kind_tag: tag.to_string(),
        ..Default::default()
    }
}

/// it should rank compound tags above their bare-family prefixes
#[test]
fn compound_tags_win() {
    let cases = [
        ("queue-circular-deque", Family::Queue, Variant::CircularDeque),
        ("queue-circular", Family::Queue, Variant::Circular),
        ("queue-priority", Family::Queue, Variant::Priority),
        ("queue", Family::Queue, Variant::Linear),
        ("linkedlist-circular-doubly", Family::LinkedList, Variant::CircularDoubly),
        ("linkedlist-doubly", Family::LinkedList, Variant::Doubly),
        ("linkedlist", Family::LinkedList, Variant::Singly),
        ("b-tree", Family::Tree, Variant::BTree),
        ("red-black-tree", Family::Tree, Variant::RedBlack),
        ("avl-tree", Family::Tree, Variant::Avl),
        ("max-heap", Family::Tree, Variant::Heap),
        ("graph-bfs", Family::Graph, Variant::Bfs),
        ("graph-dfs", Family::Graph, Variant::Dfs),
        ("dijkstra", Family::Graph, Variant::Weighted),
        ("stack", Family::Stack, Variant::Stack),
    ];
    for (tag, family, variant) in cases {
        let kind = resolve(&hint(tag), &[]);
        assert_eq!(kind.family, family, "tag {tag}");
        assert_eq!(kind.variant, variant, "tag {tag}");
        assert_eq!(kind.confidence, Confidence::Exact, "tag {tag}");
    }
}

/// it should fall through tag -> family hint -> sniffing in that order
#[test]
fn precedence_chain() {
    // tag beats a contradicting family hint
    let mut h = hint("avl");
    h.family = Some("queue".into());
    assert_eq!(resolve(&h, &[]).variant, Variant::Avl);

    // with no tag the family hint decides
    let mut h = hint("");
    h.family = Some("tree".into());
    let kind = resolve(&h, &[]);
    assert_eq!(kind.family, Family::Tree);
    assert_eq!(kind.confidence, Confidence::Heuristic);

    // with neither, the action vocabulary decides
    let steps = vec![Step::new("recolor").with_value(5.0)];
    let kind = resolve(&hint("unknown"), &steps);
    assert_eq!(kind.variant, Variant::RedBlack);
    assert_eq!(kind.confidence, Confidence::Heuristic);
}

/// it should sniff traversal logs apart by their frontier verbs
#[test]
fn traversal_sniffing() {
    let bfs: Vec<Step> = ["enqueue", "dequeue", "visit"]
        .iter()
        .map(|a| Step::new(a).with_value("A"))
        .collect();
    assert_eq!(resolve(&KindHint::default(), &bfs).variant, Variant::Bfs);

    let dfs: Vec<Step> = ["push", "pop", "visit"]
        .iter()
        .map(|a| Step::new(a).with_value("A"))
        .collect();
    assert_eq!(resolve(&KindHint::default(), &dfs).variant, Variant::Dfs);

    // without visits the same verbs mean plain containers
    let stack: Vec<Step> = vec![Step::new("push").with_value(1.0), Step::new("pop")];
    assert_eq!(resolve(&KindHint::default(), &stack).family, Family::Stack);
}

/// it should route unknowns to freeform instead of failing
#[test]
fn unknown_is_freeform() {
    let steps = vec![Step::new("transmogrify")];
    let kind = resolve(&KindHint::default(), &steps);
    assert!(kind.is_fallback());
    assert_eq!(kind.family, Family::Freeform);
}
