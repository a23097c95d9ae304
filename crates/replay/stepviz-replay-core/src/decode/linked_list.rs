//! Linked-list fold, shared by all four topology variants.
//!
//! `insert|push|create_node` appends (an explicit numeric `index` wins),
//! `delete|pop|remove_node` removes by value else by index, `link_nodes`
//! makes sure both endpoints exist, and a `list_state` snapshot overrides the
//! reconstruction. Topology flags come from the variant, not the steps.
//!
//! In stack presentation (`as_stack`) the head is the top: every insert lands
//! at index 0 regardless of an explicit index, and every delete removes the
//! head regardless of value.

use crate::kind::Variant;
use crate::snapshot::ListSnapshot;
use stepviz_api_core::{Step, StepValue};

pub fn decode(steps: &[Step], variant: Variant, as_stack: bool) -> ListSnapshot {
    let mut values: Vec<String> = Vec::new();
    let mut highlight: Option<String> = None;

    for step in steps {
        if let Some(snap) = step.list("list_state") {
            values = snap.iter().map(StepValue::label).collect();
            continue;
        }
        match step.action_norm().as_str() {
            "insert" | "push" | "create_node" | "append" | "add" => {
                let val = step
                    .value_label()
                    .or_else(|| step.text("id"))
                    .unwrap_or_else(|| format!("node{}", values.len() + 1));
                if as_stack {
                    values.insert(0, val.clone());
                } else if !values.contains(&val) {
                    match step.own_index() {
                        Some(idx) if idx <= values.len() => values.insert(idx, val.clone()),
                        _ => values.push(val.clone()),
                    }
                }
                highlight = Some(val);
            }
            "delete" | "pop" | "remove_node" | "remove" => {
                if as_stack {
                    if !values.is_empty() {
                        values.remove(0);
                    }
                } else {
                    let target = step.value_label().or_else(|| step.text("id"));
                    match target {
                        Some(val) => {
                            values.retain(|x| *x != val);
                        }
                        None => {
                            if let Some(idx) = step.own_index().filter(|i| *i < values.len()) {
                                values.remove(idx);
                            } else {
                                values.pop();
                            }
                        }
                    }
                }
                highlight = None;
            }
            "link_nodes" => {
                for key in ["source_id", "target_id"] {
                    if let Some(id) = step.text(key).or_else(|| {
                        step.vars
                            .get(key)
                            .and_then(|v| v.as_str())
                            .map(str::to_string)
                    }) {
                        if !values.contains(&id) {
                            values.push(id);
                        }
                    }
                }
            }
            "init" | "initialize" => {
                values.clear();
                highlight = None;
            }
            "traverse" | "visit" | "search" => {
                highlight = step.value_label();
            }
            _ => {}
        }
    }

    let (doubly, circular) = match variant {
        Variant::Doubly => (true, false),
        Variant::CircularSingly => (false, true),
        Variant::CircularDoubly => (true, true),
        _ => (false, false),
    };

    ListSnapshot {
        values,
        doubly,
        circular,
        highlight,
    }
}
