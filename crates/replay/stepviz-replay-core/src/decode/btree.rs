//! B-tree fold.
//!
//! Node ids are the string ids the backend emitted; nodes minted during a
//! split get synthetic ids derived from the split node plus a per-fold
//! monotonic counter, so identical prefixes always reconstruct identical
//! trees. Keys stay sorted within a node; a `keys_after` list on a step is an
//! authoritative override of the target node's keys.

use crate::snapshot::{BTreeNode, BTreeSnapshot};
use stepviz_api_core::{Step, StepValue};

struct Fold {
    snap: BTreeSnapshot,
    splits: u32,
}

impl Fold {
    fn new() -> Self {
        Fold {
            snap: BTreeSnapshot::default(),
            splits: 0,
        }
    }

    fn ensure(&mut self, id: &str) {
        if !self.snap.nodes.contains_key(id) {
            self.snap.nodes.insert(
                id.to_string(),
                BTreeNode {
                    id: id.to_string(),
                    keys: Vec::new(),
                    children: Vec::new(),
                    leaf: true,
                    parent: None,
                },
            );
            if self.snap.root.is_none() {
                self.snap.root = Some(id.to_string());
            }
        }
    }

    fn synthetic_id(&mut self, base: &str) -> String {
        self.splits += 1;
        format!("{base}_s{}", self.splits)
    }

    fn insert_key(&mut self, id: &str, key: f64) {
        self.ensure(id);
        if let Some(node) = self.snap.nodes.get_mut(id) {
            if !node.keys.contains(&key) {
                let pos = node.keys.iter().take_while(|k| **k < key).count();
                node.keys.insert(pos, key);
            }
        }
    }

    fn connect(&mut self, parent: &str, child: &str) {
        self.ensure(parent);
        self.ensure(child);
        if let Some(p) = self.snap.nodes.get_mut(parent) {
            p.leaf = false;
            if !p.children.iter().any(|c| c == child) {
                p.children.push(child.to_string());
            }
        }
        if let Some(c) = self.snap.nodes.get_mut(child) {
            c.parent = Some(parent.to_string());
        }
        if self.snap.root.as_deref() == Some(child) {
            self.snap.root = Some(parent.to_string());
        }
    }

    /// Split `child` around the promoted key: the child keeps the lesser
    /// keys, a synthetic sibling takes the greater, and the promoted key
    /// moves up into `parent`. Children of an internal node split with the
    /// keys.
    fn split_child(&mut self, parent: &str, child: &str, promoted: Option<f64>) -> Option<String> {
        self.ensure(parent);
        let node = self.snap.nodes.get(child)?.clone();
        if node.keys.is_empty() {
            return None;
        }
        let mid = node.keys.len() / 2;
        let promoted = promoted.unwrap_or(node.keys[mid]);
        let lesser: Vec<f64> = node.keys.iter().copied().filter(|k| *k < promoted).collect();
        let greater: Vec<f64> = node.keys.iter().copied().filter(|k| *k > promoted).collect();

        let sibling_id = self.synthetic_id(child);
        let split_at = lesser.len() + 1;
        let (left_children, right_children) = if node.leaf {
            (Vec::new(), Vec::new())
        } else {
            let at = split_at.min(node.children.len());
            (node.children[..at].to_vec(), node.children[at..].to_vec())
        };

        if let Some(c) = self.snap.nodes.get_mut(child) {
            c.keys = lesser;
            c.children = left_children;
        }
        self.snap.nodes.insert(
            sibling_id.clone(),
            BTreeNode {
                id: sibling_id.clone(),
                keys: greater,
                children: right_children.clone(),
                leaf: node.leaf,
                parent: Some(parent.to_string()),
            },
        );
        for moved in &right_children {
            if let Some(n) = self.snap.nodes.get_mut(moved) {
                n.parent = Some(sibling_id.clone());
            }
        }

        self.insert_key(parent, promoted);
        if let Some(p) = self.snap.nodes.get_mut(parent) {
            p.leaf = false;
            if !p.children.iter().any(|c| c == child) {
                p.children.push(child.to_string());
            }
            let pos = p
                .children
                .iter()
                .position(|c| c == child)
                .map(|i| i + 1)
                .unwrap_or(p.children.len());
            p.children.insert(pos.min(p.children.len()), sibling_id.clone());
        }
        if let Some(c) = self.snap.nodes.get_mut(child) {
            c.parent = Some(parent.to_string());
        }
        if self.snap.root.as_deref() == Some(child) {
            self.snap.root = Some(parent.to_string());
        }
        Some(sibling_id)
    }
}

fn node_id(step: &Step, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| step.text(k))
}

fn key_of(step: &Step) -> Option<f64> {
    step.num("key")
        .or_else(|| step.value.as_ref().and_then(StepValue::as_f64))
        .or_else(|| step.num("value"))
}

fn keys_override(step: &Step) -> Option<Vec<f64>> {
    step.list("keys_after")
        .or_else(|| step.list("keys"))
        .map(|vals| vals.iter().filter_map(StepValue::as_f64).collect())
}

pub fn decode(steps: &[Step]) -> BTreeSnapshot {
    let mut fold = Fold::new();
    let mut highlighted: Vec<String> = Vec::new();

    for step in steps {
        match step.action_norm().as_str() {
            "create_node" => {
                if let Some(id) = node_id(step, &["node_id", "id"]) {
                    fold.ensure(&id);
                    if let Some(keys) = keys_override(step) {
                        if let Some(n) = fold.snap.nodes.get_mut(&id) {
                            n.keys = keys;
                        }
                    } else if let Some(key) = key_of(step) {
                        fold.insert_key(&id, key);
                    }
                    highlighted = vec![id];
                }
            }
            "insert_key_into_node" | "insert_key" => {
                let id = node_id(step, &["node_id", "id"]).or_else(|| fold.snap.root.clone());
                if let Some(id) = id {
                    fold.ensure(&id);
                    if let Some(keys) = keys_override(step) {
                        if let Some(n) = fold.snap.nodes.get_mut(&id) {
                            n.keys = keys;
                        }
                    } else if let Some(key) = key_of(step) {
                        fold.insert_key(&id, key);
                    }
                    highlighted = vec![id];
                }
            }
            "split_child_node" => {
                let parent = node_id(step, &["parent_id", "parent"]);
                let child = node_id(step, &["child_id", "node_id", "id"]);
                if let (Some(parent), Some(child)) = (parent, child) {
                    let promoted = step.num("promoted_key").or_else(|| key_of(step));
                    let mut touched = vec![parent.clone(), child.clone()];
                    if let Some(sibling) = fold.split_child(&parent, &child, promoted) {
                        touched.push(sibling);
                    }
                    highlighted = touched;
                }
            }
            "split_root_node" => {
                if let Some(old_root) = fold.snap.root.clone() {
                    let new_root = node_id(step, &["new_root_id", "node_id"])
                        .unwrap_or_else(|| fold.synthetic_id(&old_root));
                    fold.ensure(&new_root);
                    fold.snap.root = Some(new_root.clone());
                    fold.connect(&new_root, &old_root);
                    let promoted = step.num("promoted_key").or_else(|| key_of(step));
                    let mut touched = vec![new_root.clone(), old_root.clone()];
                    if let Some(sibling) = fold.split_child(&new_root, &old_root, promoted) {
                        touched.push(sibling);
                    }
                    highlighted = touched;
                }
            }
            "connect_nodes" => {
                let parent = node_id(step, &["parent_id", "source_id"])
                    .or_else(|| step.endpoint(stepviz_api_core::Endpoint::Source));
                let child = node_id(step, &["child_id", "target_id"])
                    .or_else(|| step.endpoint(stepviz_api_core::Endpoint::Target));
                if let (Some(parent), Some(child)) = (parent, child) {
                    fold.connect(&parent, &child);
                    highlighted = vec![parent, child];
                }
            }
            "update_node" => {
                if let Some(id) = node_id(step, &["node_id", "id"]) {
                    fold.ensure(&id);
                    if let Some(keys) = keys_override(step) {
                        if let Some(n) = fold.snap.nodes.get_mut(&id) {
                            n.keys = keys;
                        }
                    }
                    if let Some(leaf) = step.bool_field("leaf") {
                        if let Some(n) = fold.snap.nodes.get_mut(&id) {
                            n.leaf = leaf;
                        }
                    }
                    highlighted = vec![id];
                }
            }
            "init" | "initialize" => {
                fold = Fold::new();
                highlighted.clear();
            }
            _ => {}
        }
    }

    fold.snap.highlighted = highlighted;
    fold.snap
}
