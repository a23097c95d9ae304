//! Kind resolution: step sequence + hints -> (family, variant, confidence).
//!
//! Precedence, first match wins:
//! 1. normalized kind tag against the ordered keyword table below,
//! 2. coarse family/parent hint,
//! 3. structural sniffing of the action vocabulary,
//! 4. freeform fallback (with or without an attached plan).
//!
//! Pure and infallible: unmatched input always lands on the fallback.

use serde::{Deserialize, Serialize};

use stepviz_api_core::{AnalysisPayload, Step};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Family {
    Stack,
    Queue,
    LinkedList,
    Tree,
    Graph,
    Freeform,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Variant {
    Stack,
    // queue
    Linear,
    Circular,
    Priority,
    Deque,
    CircularDeque,
    // linked list
    Singly,
    Doubly,
    CircularSingly,
    CircularDoubly,
    // tree
    Bst,
    Avl,
    BTree,
    RedBlack,
    Heap,
    // graph
    Plain,
    Bfs,
    Dfs,
    Weighted,
    // fallback
    Freeform,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Confidence {
    Exact,
    Heuristic,
    Fallback,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolvedKind {
    pub family: Family,
    pub variant: Variant,
    pub confidence: Confidence,
}

impl ResolvedKind {
    pub fn exact(family: Family, variant: Variant) -> Self {
        ResolvedKind {
            family,
            variant,
            confidence: Confidence::Exact,
        }
    }

    pub fn heuristic(family: Family, variant: Variant) -> Self {
        ResolvedKind {
            family,
            variant,
            confidence: Confidence::Heuristic,
        }
    }

    pub fn fallback() -> Self {
        ResolvedKind {
            family: Family::Freeform,
            variant: Variant::Freeform,
            confidence: Confidence::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.confidence == Confidence::Fallback
    }
}

/// Classification hints extracted from the inbound payload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KindHint {
    /// Normalized kind tag (meta.kind / implementation / concept).
    pub kind_tag: String,
    /// Coarse family hint (meta.family / parent / parent_animator).
    pub family: Option<String>,
    pub concept: Option<String>,
    /// Whether a freeform animation plan is attached.
    pub has_plan: bool,
}

impl KindHint {
    pub fn from_payload(payload: &AnalysisPayload) -> Self {
        KindHint {
            kind_tag: payload.kind_tag(),
            family: payload.meta.family_hint(),
            concept: payload
                .concept
                .as_ref()
                .map(|c| c.trim().to_ascii_lowercase()),
            has_plan: payload.meta.has_plan(),
        }
    }
}

/// One keyword rule: matches when every token is a substring of the tag.
/// Ordered most-specific first; scanned top to bottom.
struct KindRule {
    tokens: &'static [&'static str],
    family: Family,
    variant: Variant,
}

const KIND_RULES: &[KindRule] = &[
    // linked lists (compound tokens before the bare family token)
    KindRule { tokens: &["linkedlist", "circular", "doubly"], family: Family::LinkedList, variant: Variant::CircularDoubly },
    KindRule { tokens: &["linkedlist", "circular", "singly"], family: Family::LinkedList, variant: Variant::CircularSingly },
    KindRule { tokens: &["circular-doubly"], family: Family::LinkedList, variant: Variant::CircularDoubly },
    KindRule { tokens: &["circular-singly"], family: Family::LinkedList, variant: Variant::CircularSingly },
    KindRule { tokens: &["linkedlist", "doubly"], family: Family::LinkedList, variant: Variant::Doubly },
    KindRule { tokens: &["doubly"], family: Family::LinkedList, variant: Variant::Doubly },
    KindRule { tokens: &["linkedlist"], family: Family::LinkedList, variant: Variant::Singly },
    KindRule { tokens: &["singly"], family: Family::LinkedList, variant: Variant::Singly },
    // queues
    KindRule { tokens: &["circular-deque"], family: Family::Queue, variant: Variant::CircularDeque },
    KindRule { tokens: &["queue", "deque"], family: Family::Queue, variant: Variant::Deque },
    KindRule { tokens: &["deque"], family: Family::Queue, variant: Variant::Deque },
    KindRule { tokens: &["queue", "priority"], family: Family::Queue, variant: Variant::Priority },
    KindRule { tokens: &["priorityqueue"], family: Family::Queue, variant: Variant::Priority },
    KindRule { tokens: &["priority"], family: Family::Queue, variant: Variant::Priority },
    KindRule { tokens: &["queue", "circular"], family: Family::Queue, variant: Variant::Circular },
    KindRule { tokens: &["circularqueue"], family: Family::Queue, variant: Variant::Circular },
    KindRule { tokens: &["queue"], family: Family::Queue, variant: Variant::Linear },
    // trees
    KindRule { tokens: &["b-tree"], family: Family::Tree, variant: Variant::BTree },
    KindRule { tokens: &["btree"], family: Family::Tree, variant: Variant::BTree },
    KindRule { tokens: &["red-black"], family: Family::Tree, variant: Variant::RedBlack },
    KindRule { tokens: &["redblack"], family: Family::Tree, variant: Variant::RedBlack },
    KindRule { tokens: &["avl"], family: Family::Tree, variant: Variant::Avl },
    KindRule { tokens: &["heap"], family: Family::Tree, variant: Variant::Heap },
    KindRule { tokens: &["bst"], family: Family::Tree, variant: Variant::Bst },
    KindRule { tokens: &["tree"], family: Family::Tree, variant: Variant::Bst },
    // graphs
    KindRule { tokens: &["dijkstra"], family: Family::Graph, variant: Variant::Weighted },
    KindRule { tokens: &["weighted"], family: Family::Graph, variant: Variant::Weighted },
    KindRule { tokens: &["bfs"], family: Family::Graph, variant: Variant::Bfs },
    KindRule { tokens: &["dfs"], family: Family::Graph, variant: Variant::Dfs },
    KindRule { tokens: &["graph"], family: Family::Graph, variant: Variant::Plain },
    // stack aliases
    KindRule { tokens: &["stack"], family: Family::Stack, variant: Variant::Stack },
    KindRule { tokens: &["pushpop"], family: Family::Stack, variant: Variant::Stack },
    KindRule { tokens: &["lifo"], family: Family::Stack, variant: Variant::Stack },
    KindRule { tokens: &["list"], family: Family::LinkedList, variant: Variant::Singly },
];

fn match_tag(tag: &str) -> Option<ResolvedKind> {
    if tag.is_empty() || tag == "unknown" {
        return None;
    }
    KIND_RULES
        .iter()
        .find(|rule| rule.tokens.iter().all(|t| tag.contains(t)))
        .map(|rule| ResolvedKind::exact(rule.family, rule.variant))
}

fn match_family_hint(hint: &str) -> Option<ResolvedKind> {
    let kind = match hint {
        "stack" => ResolvedKind::heuristic(Family::Stack, Variant::Stack),
        "queue" => ResolvedKind::heuristic(Family::Queue, Variant::Linear),
        "linkedlist" | "list" => ResolvedKind::heuristic(Family::LinkedList, Variant::Singly),
        "tree" => ResolvedKind::heuristic(Family::Tree, Variant::Bst),
        "graph" => ResolvedKind::heuristic(Family::Graph, Variant::Plain),
        _ => return None,
    };
    Some(kind)
}

/// Structural sniffing over the action vocabulary, for sequences that arrive
/// without usable hints. Checks run most-distinctive first.
fn sniff(steps: &[Step]) -> Option<ResolvedKind> {
    let has = |pred: &dyn Fn(&Step) -> bool| steps.iter().any(pred);
    let has_action = |name: &str| steps.iter().any(|s| s.action_norm() == name);

    if has_action("split_child_node") || has_action("split_root_node")
        || has_action("insert_key_into_node")
    {
        return Some(ResolvedKind::heuristic(Family::Tree, Variant::BTree));
    }
    if has_action("move_last_to_root")
        || has_action("extract_root")
        || has(&|s| s.action_norm() == "insert" && s.own_index().is_some())
    {
        return Some(ResolvedKind::heuristic(Family::Tree, Variant::Heap));
    }
    if has_action("recolor") {
        return Some(ResolvedKind::heuristic(Family::Tree, Variant::RedBlack));
    }
    if has_action("relax") {
        return Some(ResolvedKind::heuristic(Family::Graph, Variant::Weighted));
    }
    if has_action("visit") {
        if has_action("enqueue") || has_action("dequeue") {
            return Some(ResolvedKind::heuristic(Family::Graph, Variant::Bfs));
        }
        if has_action("push") || has_action("pop") {
            return Some(ResolvedKind::heuristic(Family::Graph, Variant::Dfs));
        }
        return Some(ResolvedKind::heuristic(Family::Graph, Variant::Plain));
    }
    if has_action("rotate_left") || has_action("rotate_right") {
        return Some(ResolvedKind::heuristic(Family::Tree, Variant::Avl));
    }
    if has_action("link_nodes") || has_action("create_node") || has_action("remove_node") {
        return Some(ResolvedKind::heuristic(Family::LinkedList, Variant::Singly));
    }
    if has_action("enqueue_front") || has_action("dequeue_back") || has_action("enqueue_back") {
        return Some(ResolvedKind::heuristic(Family::Queue, Variant::Deque));
    }
    if has_action("enqueue") || has_action("dequeue") {
        // explicit rear markers imply the circular layout
        if has(&|s| s.index_of("rear").is_some() || s.index_of("front").is_some()) {
            return Some(ResolvedKind::heuristic(Family::Queue, Variant::Circular));
        }
        return Some(ResolvedKind::heuristic(Family::Queue, Variant::Linear));
    }
    if has_action("push") || has_action("pop") || has_action("peek") {
        return Some(ResolvedKind::heuristic(Family::Stack, Variant::Stack));
    }
    None
}

/// Classify a step sequence plus optional hints. Computed once per sequence;
/// callers cache the result for the sequence's lifetime.
pub fn resolve(hint: &KindHint, steps: &[Step]) -> ResolvedKind {
    if let Some(kind) = match_tag(&hint.kind_tag) {
        return kind;
    }
    // concept strings like "graph-bfs" ride alongside an ambiguous kind
    if let Some(concept) = &hint.concept {
        if let Some(kind) = match_tag(concept) {
            return ResolvedKind {
                confidence: Confidence::Heuristic,
                ..kind
            };
        }
    }
    if let Some(kind) = hint.family.as_deref().and_then(match_family_hint) {
        return kind;
    }
    if let Some(kind) = sniff(steps) {
        return kind;
    }
    log::debug!(
        "kind unresolved (tag={:?}, plan={}), routing to freeform",
        hint.kind_tag,
        hint.has_plan
    );
    ResolvedKind::fallback()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_rules_beat_family_hints() {
        let hint = KindHint {
            kind_tag: "queue-circular-deque".into(),
            family: Some("stack".into()),
            ..Default::default()
        };
        let kind = resolve(&hint, &[]);
        assert_eq!(kind.family, Family::Queue);
        assert_eq!(kind.variant, Variant::CircularDeque);
        assert_eq!(kind.confidence, Confidence::Exact);
    }

    #[test]
    fn unmatched_input_is_fallback_not_error() {
        let kind = resolve(&KindHint::default(), &[]);
        assert!(kind.is_fallback());
        assert_eq!(kind.family, Family::Freeform);
    }
}
