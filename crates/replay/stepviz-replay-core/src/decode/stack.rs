//! Stack fold: `push | pop | peek | init`.
//!
//! A step carrying a full `vars.stack` snapshot wins over incremental
//! application; otherwise the pushed/popped value is drawn from the usual
//! fallback chain. Mirrors the accumulation the original stack animator did
//! per render.

use crate::snapshot::SeqSnapshot;
use stepviz_api_core::{Step, StepValue};

pub fn decode(steps: &[Step]) -> SeqSnapshot {
    let mut items: Vec<String> = Vec::new();
    let mut peeked = false;
    let mut last_push: Option<usize> = None;

    for step in steps {
        // backend snapshot overrides local reconstruction
        if let Some(snap) = step.list("stack") {
            if !snap.is_empty() {
                items = snap.iter().map(StepValue::label).collect();
                continue;
            }
        }
        match step.action_norm().as_str() {
            "init" | "initialize" | "set" => {
                items.clear();
                peeked = false;
                last_push = None;
            }
            "push" => {
                if let Some(val) = step.value_label() {
                    items.push(val);
                    last_push = Some(items.len() - 1);
                    peeked = false;
                }
            }
            "pop" => {
                if items.pop().is_some() {
                    last_push = None;
                    peeked = false;
                }
            }
            "peek" => {
                peeked = !items.is_empty();
            }
            _ => {}
        }
    }

    let top = if items.is_empty() {
        None
    } else {
        Some(items.len() - 1)
    };
    let highlight = if peeked {
        top
    } else {
        last_push.filter(|i| *i < items.len())
    };

    SeqSnapshot {
        items,
        front: None,
        rear: None,
        top,
        highlight,
    }
}
