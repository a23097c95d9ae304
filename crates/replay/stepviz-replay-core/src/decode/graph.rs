//! Graph traversal fold shared by BFS, DFS and weighted traversals.
//!
//! The frontier discipline is a parameter: FIFO replays breadth-first logs,
//! LIFO depth-first ones. `initialize` only registers a node; the start node
//! reaches the frontier through its own `enqueue`/`push` step, so cursors
//! between the two show the pre-traversal state. Nodes are also recovered
//! from `node X` mentions in step descriptions since some backends never
//! name them anywhere else.

use serde_json::Value as Json;

use crate::snapshot::{Edge, FrontierKind, GraphSnapshot};
use stepviz_api_core::{Endpoint, Step};

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

/// Recover `node X` mentions from free text.
fn nodes_in_description(text: &str, out: &mut Vec<String>) {
    let lower = text.to_ascii_lowercase();
    let mut at = 0;
    while let Some(pos) = lower[at..].find("node ") {
        let start = at + pos + "node ".len();
        let token: String = text[start..]
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        if !token.is_empty() {
            push_unique(out, &token);
        }
        at = start;
    }
}

fn weight_of(step: &Step) -> Option<f64> {
    step.num("weight").or_else(|| step.num("cost"))
}

pub fn decode(steps: &[Step], frontier_kind: FrontierKind, weighted: bool) -> GraphSnapshot {
    let mut snap = GraphSnapshot {
        frontier_kind,
        ..Default::default()
    };

    for step in steps {
        // every mention of a node registers it
        for label in [
            step.value_label(),
            step.endpoint(Endpoint::Source),
            step.endpoint(Endpoint::Target),
        ]
        .into_iter()
        .flatten()
        {
            push_unique(&mut snap.nodes, &label);
        }
        if let Some(desc) = &step.description {
            nodes_in_description(desc, &mut snap.nodes);
        }

        match step.action_norm().as_str() {
            "enqueue" | "push" => {
                if let Some(val) = step.value_label() {
                    if !snap.visited.iter().any(|v| *v == val) {
                        push_unique(&mut snap.frontier, &val);
                    }
                    snap.highlight = Some(val);
                }
            }
            "dequeue" | "pop" => {
                let taken = match frontier_kind {
                    FrontierKind::Fifo => {
                        if snap.frontier.is_empty() {
                            None
                        } else {
                            Some(snap.frontier.remove(0))
                        }
                    }
                    FrontierKind::Lifo => snap.frontier.pop(),
                };
                snap.highlight = taken;
            }
            "visit" => {
                if let Some(val) = step.value_label() {
                    snap.frontier.retain(|v| *v != val);
                    push_unique(&mut snap.visited, &val);
                    snap.highlight = Some(val);
                }
            }
            "traverse" | "connect" | "edge" | "add_edge" => {
                let source = step
                    .endpoint(Endpoint::Source)
                    .or_else(|| step.text("from"));
                let target = step
                    .endpoint(Endpoint::Target)
                    .or_else(|| step.text("to"))
                    .or_else(|| step.value_label());
                if let (Some(source), Some(target)) = (source, target) {
                    push_unique(&mut snap.nodes, &source);
                    push_unique(&mut snap.nodes, &target);
                    let weight = weight_of(step).filter(|_| weighted);
                    match snap
                        .edges
                        .iter_mut()
                        .find(|e| e.source == source && e.target == target)
                    {
                        Some(edge) => {
                            if weight.is_some() {
                                edge.weight = weight;
                            }
                        }
                        None => snap.edges.push(Edge {
                            source,
                            target: target.clone(),
                            weight,
                        }),
                    }
                    snap.highlight = Some(target);
                }
            }
            "relax" if weighted => {
                match step.field("distances").cloned() {
                    Some(Json::Object(map)) => {
                        for (node, dist) in map {
                            if let Some(d) = dist.as_f64() {
                                snap.distances.insert(node, d);
                            }
                        }
                    }
                    _ => {
                        let node = step
                            .endpoint(Endpoint::Target)
                            .or_else(|| step.text("to"))
                            .or_else(|| step.text("node"))
                            .or_else(|| step.value_label());
                        if let (Some(node), Some(dist)) = (node, step.num("distance")) {
                            snap.distances.insert(node.clone(), dist);
                            snap.highlight = Some(node);
                        }
                    }
                }
            }
            // registration only; the start node enqueues itself later
            "initialize" | "init" | "add_node" | "create_node" => {}
            _ => {}
        }
    }

    snap
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepviz_api_core::Step;

    fn mk(action: &str, value: &str) -> Step {
        Step::new(action).with_value(value)
    }

    /// it should keep initialize out of the frontier
    #[test]
    fn initialize_registers_only() {
        let steps = vec![mk("initialize", "A"), mk("enqueue", "A")];
        let snap = decode(&steps[..1], FrontierKind::Fifo, false);
        assert_eq!(snap.nodes, vec!["A"]);
        assert!(snap.frontier.is_empty());
        let snap = decode(&steps, FrontierKind::Fifo, false);
        assert_eq!(snap.frontier, vec!["A"]);
    }

    /// it should pop from the back under the LIFO discipline
    #[test]
    fn lifo_frontier() {
        let steps = vec![mk("push", "A"), mk("push", "B"), Step::new("pop")];
        let snap = decode(&steps, FrontierKind::Lifo, false);
        assert_eq!(snap.frontier, vec!["A"]);
        assert_eq!(snap.highlight.as_deref(), Some("B"));
    }

    /// it should never enqueue a visited node again
    #[test]
    fn visited_nodes_stay_out() {
        let steps = vec![
            mk("enqueue", "A"),
            mk("visit", "A"),
            mk("enqueue", "A"),
            mk("enqueue", "B"),
        ];
        let snap = decode(&steps, FrontierKind::Fifo, false);
        assert_eq!(snap.visited, vec!["A"]);
        assert_eq!(snap.frontier, vec!["B"]);
    }

    /// it should recover node names from descriptions
    #[test]
    fn description_mentions_register_nodes() {
        let steps = vec![Step::new("compare").with_description("Comparing node B with node C7")];
        let snap = decode(&steps, FrontierKind::Fifo, false);
        assert_eq!(snap.nodes, vec!["B", "C7"]);
    }
}
