//! Binary search tree fold (plain BST and AVL).
//!
//! Nodes live in an arena keyed by synthetic ids handed out by a per-fold
//! monotonic counter, so replaying the same prefix always produces the same
//! ids. Rotations take the pivot named by the step's value, falling back to
//! the root when none is given; the hyphenated action spellings some backends
//! emit are accepted alongside the underscored ones.

use crate::snapshot::{NodeColor, NodeId, TreeNode, TreeSnapshot};
use stepviz_api_core::Step;

pub(crate) struct Arena {
    pub snap: TreeSnapshot,
    next_id: NodeId,
}

impl Arena {
    pub fn new() -> Self {
        Arena {
            snap: TreeSnapshot::default(),
            next_id: 0,
        }
    }

    pub fn alloc(&mut self, value: f64, color: Option<NodeColor>) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        self.snap.nodes.insert(
            id,
            TreeNode {
                id,
                value,
                left: None,
                right: None,
                parent: None,
                color,
            },
        );
        id
    }

    pub fn find_by_value(&self, value: f64) -> Option<NodeId> {
        let mut cur = self.snap.root;
        while let Some(id) = cur {
            let node = self.snap.nodes.get(&id)?;
            if node.value == value {
                return Some(id);
            }
            cur = if value < node.value { node.left } else { node.right };
        }
        None
    }

    /// Standard BST placement; duplicates are ignored. Returns the id of the
    /// inserted node, or `None` for a duplicate.
    pub fn insert(&mut self, value: f64, color: Option<NodeColor>) -> Option<NodeId> {
        let Some(mut cur) = self.snap.root else {
            let id = self.alloc(value, color);
            self.snap.root = Some(id);
            return Some(id);
        };
        loop {
            let node = self.snap.nodes.get(&cur)?.clone();
            if value == node.value {
                return None;
            }
            let next = if value < node.value { node.left } else { node.right };
            match next {
                Some(child) => cur = child,
                None => {
                    let id = self.alloc(value, color);
                    if let Some(n) = self.snap.nodes.get_mut(&id) {
                        n.parent = Some(cur);
                    }
                    if let Some(n) = self.snap.nodes.get_mut(&cur) {
                        if value < node.value {
                            n.left = Some(id);
                        } else {
                            n.right = Some(id);
                        }
                    }
                    return Some(id);
                }
            }
        }
    }

    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.snap.root = new,
            Some(p) => {
                if let Some(node) = self.snap.nodes.get_mut(&p) {
                    if node.left == Some(old) {
                        node.left = new;
                    } else if node.right == Some(old) {
                        node.right = new;
                    }
                }
            }
        }
        if let Some(id) = new {
            if let Some(node) = self.snap.nodes.get_mut(&id) {
                node.parent = parent;
            }
        }
    }

    /// Delete the node holding `value`. Two-child nodes take their in-order
    /// successor's value, then the successor node is unlinked.
    pub fn delete(&mut self, value: f64) {
        let Some(target) = self.find_by_value(value) else {
            return;
        };
        let node = match self.snap.nodes.get(&target) {
            Some(n) => n.clone(),
            None => return,
        };
        match (node.left, node.right) {
            (Some(_), Some(right)) => {
                let mut succ = right;
                while let Some(next) = self.snap.nodes.get(&succ).and_then(|n| n.left) {
                    succ = next;
                }
                let succ_val = match self.snap.nodes.get(&succ) {
                    Some(n) => n.value,
                    None => return,
                };
                if let Some(n) = self.snap.nodes.get_mut(&target) {
                    n.value = succ_val;
                }
                let succ_node = match self.snap.nodes.get(&succ) {
                    Some(n) => n.clone(),
                    None => return,
                };
                self.replace_child(succ_node.parent, succ, succ_node.right);
                self.snap.nodes.remove(&succ);
            }
            (only, None) | (None, only) => {
                self.replace_child(node.parent, target, only);
                self.snap.nodes.remove(&target);
            }
        }
    }

    /// Left rotation about `pivot`; a pivot without a right child is a no-op.
    /// Colors travel with their nodes.
    pub fn rotate_left(&mut self, pivot: NodeId) {
        let Some(x) = self.snap.nodes.get(&pivot).cloned() else {
            return;
        };
        let Some(y_id) = x.right else {
            return;
        };
        let y = match self.snap.nodes.get(&y_id) {
            Some(n) => n.clone(),
            None => return,
        };
        if let Some(n) = self.snap.nodes.get_mut(&pivot) {
            n.right = y.left;
        }
        if let Some(child) = y.left {
            if let Some(n) = self.snap.nodes.get_mut(&child) {
                n.parent = Some(pivot);
            }
        }
        self.replace_child(x.parent, pivot, Some(y_id));
        if let Some(n) = self.snap.nodes.get_mut(&y_id) {
            n.left = Some(pivot);
        }
        if let Some(n) = self.snap.nodes.get_mut(&pivot) {
            n.parent = Some(y_id);
        }
    }

    /// Mirror of [`Arena::rotate_left`].
    pub fn rotate_right(&mut self, pivot: NodeId) {
        let Some(x) = self.snap.nodes.get(&pivot).cloned() else {
            return;
        };
        let Some(y_id) = x.left else {
            return;
        };
        let y = match self.snap.nodes.get(&y_id) {
            Some(n) => n.clone(),
            None => return,
        };
        if let Some(n) = self.snap.nodes.get_mut(&pivot) {
            n.left = y.right;
        }
        if let Some(child) = y.right {
            if let Some(n) = self.snap.nodes.get_mut(&child) {
                n.parent = Some(pivot);
            }
        }
        self.replace_child(x.parent, pivot, Some(y_id));
        if let Some(n) = self.snap.nodes.get_mut(&y_id) {
            n.right = Some(pivot);
        }
        if let Some(n) = self.snap.nodes.get_mut(&pivot) {
            n.parent = Some(y_id);
        }
    }

    /// Pivot named by the step's value, else the current root.
    pub fn pivot_for(&self, step: &Step) -> Option<NodeId> {
        step.value
            .as_ref()
            .and_then(|v| v.as_f64())
            .or_else(|| step.num("pivot"))
            .and_then(|v| self.find_by_value(v))
            .or(self.snap.root)
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
                    highlighted.clear();
                    if let Some(id) = arena.insert(value, None) {
                        highlighted.push(id);
                    }
                }
            }
            "delete" | "remove" => {
                if let Some(value) = step_value(step) {
                    arena.delete(value);
                }
                highlighted.clear();
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
            "visit" | "search" | "compare" | "highlight" => {
                if let Some(id) = step_value(step).and_then(|v| arena.find_by_value(v)) {
                    highlighted = vec![id];
                }
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

#[cfg(test)]
mod tests {
    use super::*;
    use stepviz_api_core::Step;

    fn mk(action: &str, value: f64) -> Step {
        Step::new(action).with_value(value)
    }

    /// it should place inserts by comparison and ignore duplicates
    #[test]
    fn bst_placement() {
        let steps = vec![mk("insert", 50.0), mk("insert", 30.0), mk("insert", 70.0), mk("insert", 30.0)];
        let snap = decode(&steps);
        assert_eq!(snap.nodes.len(), 3);
        let root = snap.nodes.get(&snap.root.unwrap()).unwrap();
        assert_eq!(root.value, 50.0);
        assert_eq!(snap.nodes[&root.left.unwrap()].value, 30.0);
        assert_eq!(snap.nodes[&root.right.unwrap()].value, 70.0);
    }

    /// it should rotate left about the root when no pivot is named
    #[test]
    fn left_rotation_about_root() {
        let steps = vec![
            mk("insert", 10.0),
            mk("insert", 20.0),
            mk("insert", 30.0),
            Step::new("rotate_left"),
        ];
        let snap = decode(&steps);
        let root = snap.nodes.get(&snap.root.unwrap()).unwrap();
        assert_eq!(root.value, 20.0);
        assert_eq!(snap.nodes[&root.left.unwrap()].value, 10.0);
        assert_eq!(snap.nodes[&root.right.unwrap()].value, 30.0);
        assert!(snap.nodes[&root.left.unwrap()].parent == snap.root);
    }

    /// it should replace a two-child node with its in-order successor
    #[test]
    fn delete_two_children() {
        let steps = vec![
            mk("insert", 50.0),
            mk("insert", 30.0),
            mk("insert", 70.0),
            mk("insert", 60.0),
            mk("insert", 80.0),
            mk("delete", 50.0),
        ];
        let snap = decode(&steps);
        assert_eq!(snap.nodes.len(), 4);
        let root = snap.nodes.get(&snap.root.unwrap()).unwrap();
        assert_eq!(root.value, 60.0);
        assert_eq!(snap.nodes[&root.right.unwrap()].value, 70.0);
        assert!(snap.nodes[&root.right.unwrap()].left.is_none());
    }
}
