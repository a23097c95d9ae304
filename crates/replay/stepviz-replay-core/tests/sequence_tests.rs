use serde_json::json;
use stepviz_replay::{
    decode, decode_with, DecodeOptions, Family, ResolvedKind, Snapshot, Step, Variant,
};

fn mk(action: &str) -> Step {
    Step::new(action)
}

fn seq_items(snapshot: Snapshot) -> Vec<String> {
    match snapshot {
        Snapshot::Seq(seq) => seq.items,
        other => panic!("expected Seq snapshot, got {other:?}"),
    }
}

/// it should reconstruct a stack prefix at every cursor
#[test]
fn stack_replay_by_cursor() {
    let kind = ResolvedKind::exact(Family::Stack, Variant::Stack);
    let steps = vec![
        mk("push").with_value(5.0),
        mk("push").with_value(3.0),
        mk("pop"),
    ];
    assert_eq!(seq_items(decode(&kind, &steps, 0)), vec!["5"]);
    assert_eq!(seq_items(decode(&kind, &steps, 1)), vec!["5", "3"]);
    assert_eq!(seq_items(decode(&kind, &steps, 2)), vec!["5"]);
    // out-of-range cursors clamp to the last step
    assert_eq!(seq_items(decode(&kind, &steps, 99)), vec!["5"]);
}

/// it should advance the circular front marker past a freed slot
#[test]
fn circular_queue_front_advances() {
    let kind = ResolvedKind::exact(Family::Queue, Variant::Circular);
    let steps = vec![
        mk("enqueue").with_value("a").with_field("rear", json!(0)),
        mk("enqueue").with_value("b").with_field("rear", json!(1)),
        mk("enqueue").with_value("c").with_field("rear", json!(2)),
        mk("dequeue").with_field("front", json!(0)),
    ];
    let opts = DecodeOptions {
        meta_capacity: Some(3),
        ..Default::default()
    };
    let ring = match decode_with(&kind, &steps, 3, &opts) {
        Snapshot::Ring(ring) => ring,
        other => panic!("expected Ring snapshot, got {other:?}"),
    };
    assert_eq!(
        ring.slots,
        vec![None, Some("b".to_string()), Some("c".to_string())]
    );
    assert_eq!(ring.front, Some(1));
    assert_eq!(ring.rear, Some(2));
}

/// it should wrap enqueues once the rear reaches capacity
#[test]
fn circular_queue_wraps() {
    let kind = ResolvedKind::exact(Family::Queue, Variant::Circular);
    let steps = vec![
        mk("enqueue").with_value("a").with_field("size", json!(3)),
        mk("enqueue").with_value("b"),
        mk("enqueue").with_value("c"),
        mk("dequeue"),
        mk("enqueue").with_value("d"),
    ];
    let ring = match decode(&kind, &steps, 4) {
        Snapshot::Ring(ring) => ring,
        other => panic!("expected Ring snapshot, got {other:?}"),
    };
    // d wraps into the slot a vacated
    assert_eq!(
        ring.slots,
        vec![
            Some("d".to_string()),
            Some("b".to_string()),
            Some("c".to_string())
        ]
    );
    assert_eq!(ring.front, Some(1));
    assert_eq!(ring.rear, Some(0));
}

/// it should keep equal priorities in arrival order
#[test]
fn priority_ties_are_stable() {
    let kind = ResolvedKind::exact(Family::Queue, Variant::Priority);
    let steps = vec![
        mk("enqueue").with_value("7"),
        mk("enqueue").with_value("2"),
        mk("enqueue").with_value("9"),
        mk("enqueue").with_value("2"),
    ];
    assert_eq!(seq_items(decode(&kind, &steps, 3)), vec!["2", "2", "7", "9"]);

    let mut steps = steps;
    steps.push(mk("dequeue"));
    assert_eq!(seq_items(decode(&kind, &steps, 4)), vec!["2", "7", "9"]);
}

/// it should honor both ends of a deque
#[test]
fn deque_both_ends() {
    let kind = ResolvedKind::exact(Family::Queue, Variant::Deque);
    let steps = vec![
        mk("enqueue_back").with_value("b"),
        mk("enqueue_front").with_value("a"),
        mk("enqueue_back").with_value("c"),
        mk("dequeue_back"),
        mk("dequeue_front"),
    ];
    assert_eq!(seq_items(decode(&kind, &steps, 2)), vec!["a", "b", "c"]);
    assert_eq!(seq_items(decode(&kind, &steps, 4)), vec!["b"]);
}

/// it should mark front and rear on a linear queue
#[test]
fn linear_queue_markers() {
    let kind = ResolvedKind::exact(Family::Queue, Variant::Linear);
    let steps = vec![
        mk("enqueue").with_value("x"),
        mk("enqueue").with_value("y"),
        mk("dequeue"),
    ];
    let seq = match decode(&kind, &steps, 1) {
        Snapshot::Seq(seq) => seq,
        other => panic!("expected Seq snapshot, got {other:?}"),
    };
    assert_eq!(seq.front, Some(0));
    assert_eq!(seq.rear, Some(1));
    let seq = match decode(&kind, &steps, 2) {
        Snapshot::Seq(seq) => seq,
        other => panic!("expected Seq snapshot, got {other:?}"),
    };
    assert_eq!(seq.items, vec!["y"]);
    assert_eq!(seq.front, Some(0));
    assert_eq!(seq.rear, Some(0));
}

/// it should derive identical snapshots on repeated decodes
#[test]
fn decoding_is_deterministic() {
    let kind = ResolvedKind::exact(Family::Queue, Variant::Priority);
    let steps: Vec<Step> = (0..20)
        .map(|i| mk("enqueue").with_value(format!("{}", (i * 7) % 10)))
        .collect();
    let a = decode(&kind, &steps, 19);
    let b = decode(&kind, &steps, 19);
    assert_eq!(a, b);
}
