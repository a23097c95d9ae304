//! Inbound analysis payload.
//!
//! The translation service posts `{ steps, meta, concept?, implementation? }`
//! with every field optional and loosely shaped. Parsing is lenient: unknown
//! meta keys are retained, absent fields default, and the only hard error is
//! JSON that does not parse at all.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};
use thiserror::Error;

use crate::step::Step;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisPayload {
    pub steps: Vec<Step>,
    pub meta: Meta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concept: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implementation: Option<String>,
}

/// Analysis-level metadata. Everything here is a hint; the resolver treats
/// absence as "unknown", never as an error.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_animator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
    /// Present the list as a stack: inserts land at the head and deletes
    /// remove it.
    #[serde(skip_serializing_if = "Option::is_none", alias = "isStack")]
    pub is_stack: Option<bool>,
    /// Freeform visual plan for the generic interpreter. Kept as raw JSON;
    /// stepviz-replay-core extracts it leniently.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation_plan: Option<Json>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_nodes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_edges: Option<Json>,
    #[serde(flatten)]
    pub extra: Map<String, Json>,
}

impl Meta {
    /// True when a non-empty freeform plan is attached.
    pub fn has_plan(&self) -> bool {
        match &self.animation_plan {
            Some(Json::Object(map)) => !map.is_empty(),
            Some(Json::Array(items)) => !items.is_empty(),
            _ => false,
        }
    }

    /// The coarse family hint, first of `family`/`parent`/`parent_animator`.
    pub fn family_hint(&self) -> Option<String> {
        for cand in [&self.family, &self.parent, &self.parent_animator] {
            if let Some(s) = cand {
                let t = s.trim().to_ascii_lowercase();
                if !t.is_empty() {
                    return Some(t);
                }
            }
        }
        None
    }
}

impl AnalysisPayload {
    /// The normalized kind tag: `meta.kind`, else `implementation`, else
    /// `concept`, lowercased. Empty string when no hint exists.
    pub fn kind_tag(&self) -> String {
        self.meta
            .kind
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(self.implementation.as_deref())
            .or(self.concept.as_deref())
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase()
    }
}

pub fn parse_analysis_json(raw: &str) -> Result<AnalysisPayload, PayloadError> {
    Ok(serde_json::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_payload_parses() {
        let p = parse_analysis_json(r#"{"steps":[{"action":"push","value":5}]}"#).unwrap();
        assert_eq!(p.steps.len(), 1);
        assert_eq!(p.kind_tag(), "");
        assert!(!p.meta.has_plan());
    }

    #[test]
    fn kind_tag_prefers_meta_kind() {
        let p = parse_analysis_json(
            r#"{"steps":[],"meta":{"kind":"Queue-Circular"},"concept":"stack"}"#,
        )
        .unwrap();
        assert_eq!(p.kind_tag(), "queue-circular");
    }

    #[test]
    fn stack_presentation_flag_accepts_both_spellings() {
        let p = parse_analysis_json(r#"{"steps":[],"meta":{"isStack":true}}"#).unwrap();
        assert_eq!(p.meta.is_stack, Some(true));
        let p = parse_analysis_json(r#"{"steps":[],"meta":{"is_stack":true}}"#).unwrap();
        assert_eq!(p.meta.is_stack, Some(true));
    }

    #[test]
    fn concept_backs_an_absent_kind() {
        let p = parse_analysis_json(r#"{"steps":[],"concept":"bfs"}"#).unwrap();
        assert_eq!(p.kind_tag(), "bfs");
    }
}
