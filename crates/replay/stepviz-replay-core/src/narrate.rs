//! Per-step narration.
//!
//! Each family carries a phrase table keyed by action; unmatched steps fall
//! back to the step's own description, then the raw action name, then the
//! empty string. The BFS/DFS sentences reproduce the wording learners already
//! know from the instrumented traversals.

use crate::kind::{Family, ResolvedKind, Variant};
use stepviz_api_core::{Endpoint, Step};

fn value_of(step: &Step) -> String {
    step.value_label().unwrap_or_else(|| "the value".to_string())
}

fn endpoints(step: &Step) -> (String, String) {
    (
        step.endpoint(Endpoint::Source).unwrap_or_else(|| "?".into()),
        step.endpoint(Endpoint::Target).unwrap_or_else(|| "?".into()),
    )
}

fn stack_phrase(step: &Step) -> Option<String> {
    let v = value_of(step);
    Some(match step.action_norm().as_str() {
        "push" => format!("Push {v} onto the top of the stack."),
        "pop" => format!("Pop {v} off the top of the stack."),
        "peek" => "Peek at the top element without removing it.".to_string(),
        "init" | "initialize" => "Start with an empty stack.".to_string(),
        _ => return None,
    })
}

fn queue_phrase(step: &Step, variant: Variant) -> Option<String> {
    let v = value_of(step);
    let noun = match variant {
        Variant::Circular | Variant::CircularDeque => "circular queue",
        Variant::Priority => "priority queue",
        Variant::Deque => "deque",
        _ => "queue",
    };
    Some(match step.action_norm().as_str() {
        "enqueue" | "insert" if variant == Variant::Priority => {
            format!("Insert {v} into the {noun} at its ordered position.")
        }
        "enqueue" | "insert" | "enqueue_back" => {
            format!("Enqueue {v} at the rear of the {noun}.")
        }
        "enqueue_front" => format!("Enqueue {v} at the front of the {noun}."),
        "dequeue" | "delete" | "dequeue_front" => {
            format!("Dequeue the front element of the {noun}.")
        }
        "dequeue_back" => format!("Remove the rear element of the {noun}."),
        "peek" | "peek_min" | "peek_max" | "peek_highest" => {
            format!("Peek at the front of the {noun} without removing it.")
        }
        "clear" => format!("Clear the {noun}."),
        _ => return None,
    })
}

fn list_phrase(step: &Step) -> Option<String> {
    let v = value_of(step);
    Some(match step.action_norm().as_str() {
        "insert" | "push" | "append" | "add" | "create_node" => {
            format!("Insert node {v} into the list.")
        }
        "delete" | "pop" | "remove" | "remove_node" => {
            format!("Remove node {v} from the list.")
        }
        "link_nodes" => "Link the two nodes with a pointer.".to_string(),
        "traverse" | "visit" | "search" => format!("Traverse to node {v}."),
        _ => return None,
    })
}

fn tree_phrase(step: &Step) -> Option<String> {
    let v = value_of(step);
    Some(match step.action_norm().as_str() {
        "insert" | "add" => format!("Insert {v} by comparing down from the root."),
        "delete" | "remove" => format!("Delete {v} from the tree."),
        "rotate_left" | "rotate-left" => format!("Rotate left around {v} to restore balance."),
        "rotate_right" | "rotate-right" => {
            format!("Rotate right around {v} to restore balance.")
        }
        "set_root" => format!("Make {v} the root and color it black."),
        "recolor" => format!("Recolor node {v}."),
        "visit" | "search" | "compare" => format!("Compare against node {v}."),
        _ => return None,
    })
}

fn btree_phrase(step: &Step) -> Option<String> {
    Some(match step.action_norm().as_str() {
        "create_node" => "Create a new node.".to_string(),
        "insert_key_into_node" | "insert_key" => {
            format!("Insert key {} into the node.", value_of(step))
        }
        "split_child_node" => "Split the full child and promote its median key.".to_string(),
        "split_root_node" => {
            "Split the root; the promoted key becomes the new root.".to_string()
        }
        "connect_nodes" => "Connect the child node to its parent.".to_string(),
        "update_node" => "Update the node's keys.".to_string(),
        _ => return None,
    })
}

fn heap_phrase(step: &Step) -> Option<String> {
    let v = value_of(step);
    Some(match step.action_norm().as_str() {
        "insert" | "insert-at-index" | "push" | "add" => {
            format!("Insert {v} at the next free slot of the heap.")
        }
        "swap" => "Swap the two elements to restore the heap property.".to_string(),
        "extract_root" | "extract_min" | "extract_max" | "pop" => {
            "Extract the root of the heap.".to_string()
        }
        "move_last_to_root" => "Move the last element up to the root.".to_string(),
        "compare" | "heapify" => "Compare parent and child.".to_string(),
        _ => return None,
    })
}

fn bfs_phrase(step: &Step) -> Option<String> {
    let v = value_of(step);
    Some(match step.action_norm().as_str() {
        "initialize" => format!("Start the traversal by adding node {v} to the queue."),
        "dequeue" => format!("Remove node {v} from the front of the queue to process it."),
        "visit" => format!("Visit node {v} and mark it as explored."),
        "traverse" => {
            let (s, t) = endpoints(step);
            format!("Traverse the edge from {s} → {t} to discover neighbor {t}.")
        }
        "enqueue" => format!("Add node {v} to the back of the queue for later processing."),
        "complete" => "The queue is empty — BFS traversal is complete.".to_string(),
        _ => return None,
    })
}

fn dfs_phrase(step: &Step) -> Option<String> {
    let v = value_of(step);
    Some(match step.action_norm().as_str() {
        "initialize" => format!("Start the traversal by pushing node {v} onto the stack."),
        "pop" => format!("Pop node {v} from the top of the stack to process it."),
        "visit" => format!("Visit node {v} and mark it as explored."),
        "traverse" => {
            let (s, t) = endpoints(step);
            format!("Move along the edge from {s} → {t} to explore neighbor {t}.")
        }
        "push" => format!("Push node {v} onto the stack for deeper exploration."),
        "backtrack" => format!("No unvisited neighbors — backtrack from node {v}."),
        "complete" => "The stack is empty — DFS traversal is complete.".to_string(),
        _ => return None,
    })
}

fn weighted_phrase(step: &Step) -> Option<String> {
    Some(match step.action_norm().as_str() {
        "relax" => {
            let target = step
                .endpoint(Endpoint::Target)
                .or_else(|| step.text("node"))
                .or_else(|| step.value_label())
                .unwrap_or_else(|| "the neighbor".to_string());
            match step.num("distance") {
                Some(d) => format!("Relax the edge: the distance to {target} improves to {d}."),
                None => format!("Relax the edge to {target}."),
            }
        }
        "traverse" | "connect" | "edge" => {
            let (s, t) = endpoints(step);
            format!("Examine the edge from {s} → {t}.")
        }
        _ => return bfs_phrase(step),
    })
}

/// Narration for one step under the resolved kind.
pub fn narrate(step: &Step, kind: &ResolvedKind) -> String {
    let phrased = match (kind.family, kind.variant) {
        (Family::Stack, _) => stack_phrase(step),
        (Family::Queue, variant) => queue_phrase(step, variant),
        (Family::LinkedList, _) => list_phrase(step),
        (Family::Tree, Variant::BTree) => btree_phrase(step),
        (Family::Tree, Variant::Heap) => heap_phrase(step),
        (Family::Tree, _) => tree_phrase(step),
        (Family::Graph, Variant::Dfs) => dfs_phrase(step),
        (Family::Graph, Variant::Weighted) => weighted_phrase(step),
        (Family::Graph, _) => bfs_phrase(step),
        (Family::Freeform, _) => None,
    };
    phrased
        .or_else(|| step.description.clone().filter(|d| !d.trim().is_empty()))
        .unwrap_or_else(|| step.action.trim().to_string())
}
