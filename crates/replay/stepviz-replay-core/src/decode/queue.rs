//! Queue folds: linear, priority, deque, and circular-buffer variants.

use crate::decode::DecodeOptions;
use crate::snapshot::{RingSnapshot, SeqSnapshot};
use stepviz_api_core::{Step, StepValue};

fn snapshot_override(step: &Step, keys: &[&str]) -> Option<Vec<String>> {
    for key in keys {
        if let Some(list) = step.list(key) {
            return Some(list.iter().map(StepValue::label).collect());
        }
    }
    None
}

fn seq_markers(items: Vec<String>, highlight: Option<usize>) -> SeqSnapshot {
    let front = if items.is_empty() { None } else { Some(0) };
    let rear = if items.is_empty() {
        None
    } else {
        Some(items.len() - 1)
    };
    SeqSnapshot {
        items,
        front,
        rear,
        top: None,
        highlight,
    }
}

/// Linear FIFO queue: `enqueue|insert` appends, `dequeue|delete` pops the
/// front; a `buffer`/`list_state` snapshot overrides.
pub fn decode_linear(steps: &[Step]) -> SeqSnapshot {
    let mut items: Vec<String> = Vec::new();
    let mut highlight = None;

    for step in steps {
        if let Some(snap) = snapshot_override(step, &["buffer", "list_state"]) {
            items = snap;
            highlight = None;
            continue;
        }
        match step.action_norm().as_str() {
            "enqueue" | "insert" => {
                if let Some(val) = step.value_label() {
                    items.push(val);
                    highlight = Some(items.len() - 1);
                }
            }
            "dequeue" | "delete" => {
                if !items.is_empty() {
                    items.remove(0);
                }
                highlight = None;
            }
            "clear" => {
                items.clear();
                highlight = None;
            }
            "peek" => {
                highlight = if items.is_empty() { None } else { Some(0) };
            }
            _ => {}
        }
    }

    seq_markers(items, highlight)
}

/// Priority queue: ascending numeric order is restored after every insert;
/// ties keep insertion order (stable sort). Non-numeric values compare equal
/// and therefore also keep their insertion order.
pub fn decode_priority(steps: &[Step]) -> SeqSnapshot {
    let mut items: Vec<String> = Vec::new();
    let mut highlight_value: Option<String> = None;

    for step in steps {
        match step.action_norm().as_str() {
            "enqueue" | "insert" => {
                if let Some(val) = step.value_label() {
                    items.push(val.clone());
                    items.sort_by(|a, b| {
                        let na = a.parse::<f64>().ok();
                        let nb = b.parse::<f64>().ok();
                        match (na, nb) {
                            (Some(x), Some(y)) => {
                                x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal)
                            }
                            _ => std::cmp::Ordering::Equal,
                        }
                    });
                    highlight_value = Some(val);
                }
            }
            "dequeue" | "delete" | "dequeue_highest" | "delete_min" | "delete_max" => {
                if !items.is_empty() {
                    items.remove(0);
                }
                highlight_value = None;
            }
            "display" => {
                if let Some(snap) = snapshot_override(step, &["list_state"]) {
                    items = snap;
                }
            }
            "peek" | "peek_min" | "peek_max" | "peek_highest" => {
                highlight_value = items.first().cloned();
            }
            _ => {}
        }
    }

    let highlight =
        highlight_value.and_then(|v| items.iter().position(|item| *item == v));
    seq_markers(items, highlight)
}

/// Double-ended queue: the instrumented vocabulary is
/// `enqueue_front | enqueue_back | dequeue_front | dequeue_back`, with
/// `push`/`append` accepted as back-insertion aliases.
pub fn decode_deque(steps: &[Step]) -> SeqSnapshot {
    let mut items: Vec<String> = Vec::new();
    let mut highlight = None;

    for step in steps {
        if let Some(snap) = snapshot_override(step, &["deque_state", "buffer", "array"]) {
            items = snap;
            highlight = None;
            continue;
        }
        match step.action_norm().as_str() {
            "enqueue_back" | "push" | "append" | "enqueue" => {
                if let Some(val) = step.value_label() {
                    items.push(val);
                    highlight = Some(items.len() - 1);
                }
            }
            "enqueue_front" => {
                if let Some(val) = step.value_label() {
                    items.insert(0, val);
                    highlight = Some(0);
                }
            }
            "dequeue_back" | "pop" => {
                items.pop();
                highlight = None;
            }
            "dequeue_front" | "dequeue" => {
                if !items.is_empty() {
                    items.remove(0);
                }
                highlight = None;
            }
            "clear" => {
                items.clear();
                highlight = None;
            }
            _ => {}
        }
    }

    seq_markers(items, highlight)
}

/// Circular buffer fold.
///
/// Capacity precedence: meta hint, then the first step reporting a `size`,
/// then the configured default. A later `size` report resizes the ring,
/// zero-filling new slots. An explicit `rear` on an enqueue (or `front` on a
/// dequeue) names the slot to write/clear; otherwise the tracked marker
/// advances modulo capacity. After a dequeue the front marker advances past
/// the freed slot.
pub fn decode_circular(steps: &[Step], opts: &DecodeOptions) -> RingSnapshot {
    let capacity = opts
        .meta_capacity
        .or_else(|| {
            steps.iter().find_map(|s| {
                s.index_of("size")
                    .or_else(|| s.index_of("capacity"))
                    .filter(|n| *n > 0)
            })
        })
        .unwrap_or(opts.default_capacity)
        .max(1);

    let mut ring = RingSnapshot::with_capacity(capacity);

    for step in steps {
        // mid-sequence resize (reallocation, zero-filled)
        if let Some(size) = step.index_of("size").filter(|n| *n > 0) {
            if size != ring.capacity() {
                ring.slots.resize(size, None);
            }
        }
        if let Some(snap) = step.list("buffer") {
            let cap = ring.capacity();
            ring.slots = snap
                .iter()
                .map(|v| {
                    if v.is_empty_marker() {
                        None
                    } else {
                        Some(v.label())
                    }
                })
                .collect();
            ring.slots.resize(cap.max(ring.slots.len()), None);
        }

        let cap = ring.capacity();
        match step.action_norm().as_str() {
            "enqueue" | "enqueue_back" | "enqueue_front" | "insert" => {
                if let Some(val) = step.value_label() {
                    let idx = step
                        .index_of("rear")
                        .or_else(|| step.index_of("tail"))
                        .unwrap_or_else(|| match ring.rear {
                            Some(r) => (r + 1) % cap,
                            None => 0,
                        });
                    if idx < cap {
                        ring.slots[idx] = Some(val);
                        ring.rear = Some(idx);
                        if ring.front.is_none() {
                            ring.front = Some(step.index_of("front").unwrap_or(idx));
                        }
                    }
                }
            }
            "dequeue" | "dequeue_front" | "dequeue_back" => {
                let idx = step
                    .index_of("front")
                    .or_else(|| step.index_of("head"))
                    .or(ring.front);
                if let Some(idx) = idx.filter(|i| *i < cap) {
                    ring.slots[idx] = None;
                    if ring.occupied() == 0 {
                        ring.front = None;
                        ring.rear = None;
                    } else {
                        ring.front = Some((idx + 1) % cap);
                    }
                }
            }
            "clear" => {
                let cap = ring.capacity();
                ring = RingSnapshot::with_capacity(cap);
            }
            _ => {
                // explicit markers on observation steps still commit
                if let Some(f) = step.index_of("front").or_else(|| step.index_of("head")) {
                    if f < cap {
                        ring.front = Some(f);
                    }
                }
                if let Some(r) = step.index_of("rear").or_else(|| step.index_of("tail")) {
                    if r < cap {
                        ring.rear = Some(r);
                    }
                }
            }
        }
    }

    ring
}
