//! Red-black tree fold.
//!
//! Placement is the shared BST arena; color bookkeeping is layered on top.
//! New nodes default to red (an explicit `color` field wins), `set_root`
//! creates or re-anchors the root and paints it black, and `recolor` applies
//! the named color or toggles when none is given. Rotations keep each node's
//! color attached to the node.

use crate::decode::tree::Arena;
use crate::snapshot::{NodeColor, NodeId, TreeSnapshot};
use stepviz_api_core::Step;

fn color_field(step: &Step) -> Option<NodeColor> {
    match step.text("color")?.to_ascii_lowercase().as_str() {
        "red" => Some(NodeColor::Red),
        "black" => Some(NodeColor::Black),
        _ => None,
    }
}

fn step_value(step: &Step) -> Option<f64> {
    step.value
        .as_ref()
        .and_then(|v| v.as_f64())
        .or_else(|| step.num("value"))
}

pub fn decode(steps: &[Step]) -> TreeSnapshot {
    let mut arena = Arena::new();
    let mut highlighted: Vec<NodeId> = Vec::new();

    for step in steps {
        match step.action_norm().as_str() {
            "insert" | "add" => {
                if let Some(value) = step_value(step) {
                    let color = color_field(step).unwrap_or(NodeColor::Red);
                    highlighted.clear();
                    if let Some(id) = arena.insert(value, Some(color)) {
                        highlighted.push(id);
                    }
                }
            }
            "set_root" => {
                if let Some(value) = step_value(step) {
                    let id = match arena.find_by_value(value) {
                        Some(id) => id,
                        None => match arena.insert(value, Some(NodeColor::Black)) {
                            Some(id) => id,
                            None => continue,
                        },
                    };
                    if let Some(node) = arena.snap.nodes.get_mut(&id) {
                        node.color = Some(NodeColor::Black);
                    }
                    highlighted = vec![id];
                }
            }
            "recolor" => {
                if let Some(id) = step_value(step).and_then(|v| arena.find_by_value(v)) {
                    let explicit = color_field(step);
                    if let Some(node) = arena.snap.nodes.get_mut(&id) {
                        node.color = Some(explicit.unwrap_or(match node.color {
                            Some(NodeColor::Red) => NodeColor::Black,
                            _ => NodeColor::Red,
                        }));
                    }
                    highlighted = vec![id];
                }
            }
            "rotate_left" | "rotate-left" => {
                if let Some(pivot) = arena.pivot_for(step) {
                    arena.rotate_left(pivot);
                    highlighted = vec![pivot];
                }
            }
            "rotate_right" | "rotate-right" => {
                if let Some(pivot) = arena.pivot_for(step) {
                    arena.rotate_right(pivot);
                    highlighted = vec![pivot];
                }
            }
            "delete" | "remove" => {
                if let Some(value) = step_value(step) {
                    arena.delete(value);
                }
                highlighted.clear();
            }
            "init" | "initialize" => {
                arena = Arena::new();
                highlighted.clear();
            }
            _ => {}
        }
    }

    arena.snap.highlighted = highlighted;
    arena.snap
}
