//! Reconstructed-state contracts, one shape per family.
//!
//! Snapshots are plain serde-able data; decoders derive them freshly from
//! `steps[0..=cursor]` on every call, so structural equality doubles as the
//! determinism check. Empty sequences yield the explicit empty shape for the
//! family, never an absent value.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::freeform::TimedScript;

/// Tagged union over every family the engine can reconstruct.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Snapshot {
    /// Stack, linear queue, priority queue, deque.
    Seq(SeqSnapshot),
    /// Circular buffers (circular queue / circular deque).
    Ring(RingSnapshot),
    List(ListSnapshot),
    /// BST / AVL / red-black.
    Tree(TreeSnapshot),
    BTree(BTreeSnapshot),
    Heap(HeapSnapshot),
    Graph(GraphSnapshot),
    /// Freeform path: a timed script instead of a structural snapshot.
    Script(TimedScript),
}

/// Ordered value sequence with optional end markers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SeqSnapshot {
    pub items: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rear: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<usize>,
    /// Index the last applied action touched, for highlight rendering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<usize>,
}

/// Fixed-capacity ring. `None` slots render as the empty marker.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RingSnapshot {
    pub slots: Vec<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rear: Option<usize>,
}

impl RingSnapshot {
    pub fn with_capacity(capacity: usize) -> Self {
        RingSnapshot {
            slots: vec![None; capacity],
            front: None,
            rear: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ListSnapshot {
    pub values: Vec<String>,
    pub doubly: bool,
    pub circular: bool,
    /// Value the last step touched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
}

impl ListSnapshot {
    pub fn head(&self) -> Option<&String> {
        self.values.first()
    }

    pub fn tail(&self) -> Option<&String> {
        self.values.last()
    }
}

pub type NodeId = u32;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum NodeColor {
    Red,
    Black,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: NodeId,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<NodeColor>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    pub nodes: HashMap<NodeId, TreeNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<NodeId>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub highlighted: Vec<NodeId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BTreeNode {
    pub id: String,
    pub keys: Vec<f64>,
    pub children: Vec<String>,
    pub leaf: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BTreeSnapshot {
    pub nodes: HashMap<String, BTreeNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub highlighted: Vec<String>,
}

/// Dense array model for binary heaps.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HeapSnapshot {
    pub slots: Vec<Option<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub highlighted: Vec<usize>,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum FrontierKind {
    /// Queue discipline (BFS).
    #[default]
    Fifo,
    /// Stack discipline (DFS).
    Lifo,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<String>,
    pub edges: Vec<Edge>,
    pub visited: Vec<String>,
    pub frontier: Vec<String>,
    pub frontier_kind: FrontierKind,
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub distances: HashMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
}

/// Angular slot positions for ring presentation (circular lists/queues).
/// Presentation-only: not part of any snapshot contract.
pub fn ring_positions(n: usize) -> Vec<f32> {
    use std::f32::consts::TAU;
    (0..n)
        .map(|i| TAU * i as f32 / n as f32 - TAU / 4.0)
        .collect()
}
