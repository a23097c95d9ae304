//! Binary-heap fold over the dense array model.
//!
//! Slots are `Option<String>` so an extracted root leaves a visible hole
//! until `move_last_to_root` fills it, matching the two-phase extraction the
//! instrumented heaps report. An explicit `index` on an insert grows the
//! array as needed.

use crate::snapshot::HeapSnapshot;
use stepviz_api_core::{Step, StepValue};

fn swap_indices(step: &Step) -> Option<(usize, usize)> {
    let i = step
        .index_of("i")
        .or_else(|| step.index_of("index"))
        .or_else(|| step.index_of("from"))?;
    let j = step
        .index_of("j")
        .or_else(|| step.index_of("index2"))
        .or_else(|| step.index_of("with"))
        .or_else(|| step.index_of("to"))?;
    Some((i, j))
}

fn last_occupied(slots: &[Option<String>]) -> Option<usize> {
    slots.iter().rposition(Option::is_some)
}

pub fn decode(steps: &[Step]) -> HeapSnapshot {
    let mut slots: Vec<Option<String>> = Vec::new();
    let mut highlighted: Vec<usize> = Vec::new();

    for step in steps {
        let wholesale = step
            .list("array")
            .or_else(|| step.list("heap"))
            .or_else(|| match (&step.value, step.action_norm().as_str()) {
                (Some(StepValue::List(items)), "set_array") => Some(items.clone()),
                _ => None,
            });
        if let Some(list) = wholesale {
            slots = list
                .iter()
                .map(|v| {
                    if v.is_empty_marker() {
                        None
                    } else {
                        Some(v.label())
                    }
                })
                .collect();
            highlighted.clear();
            continue;
        }
        match step.action_norm().as_str() {
            "insert" | "insert-at-index" | "push" | "add" => {
                if let Some(val) = step.value_label() {
                    let idx = step.own_index().unwrap_or_else(|| {
                        last_occupied(&slots).map(|i| i + 1).unwrap_or(0)
                    });
                    if idx >= slots.len() {
                        slots.resize(idx + 1, None);
                    }
                    slots[idx] = Some(val);
                    highlighted = vec![idx];
                }
            }
            "swap" => {
                if let Some((i, j)) = swap_indices(step) {
                    if i < slots.len() && j < slots.len() {
                        slots.swap(i, j);
                        highlighted = vec![i, j];
                    }
                }
            }
            "extract_root" | "extract_min" | "extract_max" | "pop" => {
                if !slots.is_empty() {
                    slots[0] = None;
                    highlighted = vec![0];
                }
            }
            "move_last_to_root" => {
                if let Some(last) = last_occupied(&slots).filter(|i| *i > 0) {
                    slots[0] = slots[last].take();
                    highlighted = vec![0];
                }
                // trailing holes disappear with the moved element
                while slots.last().map_or(false, Option::is_none) {
                    slots.pop();
                }
            }
            "peek" | "compare" | "heapify" => {
                highlighted = step.own_index().into_iter().collect();
                if highlighted.is_empty() && !slots.is_empty() {
                    highlighted = vec![0];
                }
            }
            "init" | "initialize" | "clear" => {
                slots.clear();
                highlighted.clear();
            }
            _ => {}
        }
    }

    HeapSnapshot { slots, highlighted }
}
