//! Family decoders: pure folds from `(steps, cursor)` to a snapshot.
//!
//! Every decoder walks the prefix `steps[0..=cursor]` (cursor clamped into
//! range), applies only the actions in its vocabulary, and silently skips the
//! rest. Wrong-shaped fields make a step a no-op, never an error. No state
//! survives between calls; identical inputs yield structurally identical
//! snapshots.

pub mod btree;
pub mod graph;
pub mod heap;
pub mod linked_list;
pub mod queue;
pub mod redblack;
pub mod stack;
pub mod tree;

use crate::kind::{Family, ResolvedKind, Variant};
use crate::snapshot::{FrontierKind, Snapshot};
use stepviz_api_core::Step;

/// Hints a decoder may need beyond the steps themselves (the circular-queue
/// capacity comes from analysis metadata when the steps don't carry one).
#[derive(Clone, Debug)]
pub struct DecodeOptions {
    pub default_capacity: usize,
    pub meta_capacity: Option<usize>,
    /// Stack presentation for linked lists (`meta.isStack`): inserts prepend
    /// and deletes remove the head.
    pub list_as_stack: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            default_capacity: 5,
            meta_capacity: None,
            list_as_stack: false,
        }
    }
}

/// The replay prefix for a clamped cursor; empty input yields an empty slice.
pub(crate) fn prefix(steps: &[Step], cursor: usize) -> &[Step] {
    if steps.is_empty() {
        &[]
    } else {
        let end = cursor.min(steps.len() - 1);
        &steps[..=end]
    }
}

/// Decode with explicit options.
pub fn decode_with(
    kind: &ResolvedKind,
    steps: &[Step],
    cursor: usize,
    opts: &DecodeOptions,
) -> Snapshot {
    let steps = prefix(steps, cursor);
    match (kind.family, kind.variant) {
        (Family::Stack, _) => Snapshot::Seq(stack::decode(steps)),
        (Family::Queue, Variant::Circular) | (Family::Queue, Variant::CircularDeque) => {
            Snapshot::Ring(queue::decode_circular(steps, opts))
        }
        (Family::Queue, Variant::Priority) => Snapshot::Seq(queue::decode_priority(steps)),
        (Family::Queue, Variant::Deque) => Snapshot::Seq(queue::decode_deque(steps)),
        (Family::Queue, _) => Snapshot::Seq(queue::decode_linear(steps)),
        (Family::LinkedList, variant) => {
            Snapshot::List(linked_list::decode(steps, variant, opts.list_as_stack))
        }
        (Family::Tree, Variant::BTree) => Snapshot::BTree(btree::decode(steps)),
        (Family::Tree, Variant::Heap) => Snapshot::Heap(heap::decode(steps)),
        (Family::Tree, Variant::RedBlack) => Snapshot::Tree(redblack::decode(steps)),
        (Family::Tree, _) => Snapshot::Tree(tree::decode(steps)),
        (Family::Graph, Variant::Dfs) => {
            Snapshot::Graph(graph::decode(steps, FrontierKind::Lifo, false))
        }
        (Family::Graph, Variant::Weighted) => {
            Snapshot::Graph(graph::decode(steps, FrontierKind::Fifo, true))
        }
        (Family::Graph, _) => Snapshot::Graph(graph::decode(steps, FrontierKind::Fifo, false)),
        // The freeform path is scripted, not folded; the engine interprets
        // the plan directly. Decoding it without a plan yields the empty
        // script shape.
        (Family::Freeform, _) => Snapshot::Script(Default::default()),
    }
}

/// Decode with default options.
pub fn decode(kind: &ResolvedKind, steps: &[Step], cursor: usize) -> Snapshot {
    decode_with(kind, steps, cursor, &DecodeOptions::default())
}
