//! The canonical step record.
//!
//! Steps are weakly typed at the boundary: beyond the handful of common
//! fields, every family ships its own extras (`front`, `rear`, `node_id`,
//! `promoted_key`, ...). Those land in `extra` via serde flattening and are
//! reached through the typed accessors, which also fall back to `vars` since
//! several backends tuck the same data in there.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use crate::value::StepValue;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Step {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<StepValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<StepValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<StepValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<StepValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub vars: Map<String, Json>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub meta: Map<String, Json>,
    /// Every family-specific field the backend attached to this step.
    #[serde(flatten)]
    pub extra: Map<String, Json>,
}

impl Step {
    /// Bare action step, for tests and builders.
    pub fn new(action: &str) -> Self {
        Step {
            action: action.to_string(),
            ..Default::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<StepValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_source(mut self, value: impl Into<StepValue>) -> Self {
        self.source = Some(value.into());
        self
    }

    pub fn with_target(mut self, value: impl Into<StepValue>) -> Self {
        self.target = Some(value.into());
        self
    }

    pub fn with_field(mut self, key: &str, value: Json) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }

    pub fn with_var(mut self, key: &str, value: Json) -> Self {
        self.vars.insert(key.to_string(), value);
        self
    }

    pub fn with_description(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    /// Lowercased action, the form decoders match on.
    pub fn action_norm(&self) -> String {
        self.action.trim().to_ascii_lowercase()
    }

    /// Raw lookup: `extra` first, then `vars`.
    pub fn field(&self, key: &str) -> Option<&Json> {
        self.extra.get(key).or_else(|| self.vars.get(key))
    }

    /// Numeric field, coercing numeric strings. Wrong shapes yield `None`.
    pub fn num(&self, key: &str) -> Option<f64> {
        self.field(key).and_then(|v| StepValue::from_json(v).as_f64())
    }

    /// Non-negative integral field, for indices and markers.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.field(key)
            .and_then(|v| StepValue::from_json(v).as_index())
    }

    pub fn text(&self, key: &str) -> Option<String> {
        match self.field(key)? {
            Json::String(s) => Some(s.clone()),
            Json::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn bool_field(&self, key: &str) -> Option<bool> {
        self.field(key).and_then(Json::as_bool)
    }

    /// List field as step values (`buffer`, `list_state`, `keys`, ...).
    pub fn list(&self, key: &str) -> Option<Vec<StepValue>> {
        match self.field(key)? {
            Json::Array(items) => Some(items.iter().map(StepValue::from_json).collect()),
            _ => None,
        }
    }

    /// The step's own `index` field when it is a usable index.
    pub fn own_index(&self) -> Option<usize> {
        self.index.as_ref().and_then(StepValue::as_index)
    }

    /// Value label resolved through the common fallback chain the original
    /// animators used: value, then vars.value / vars.data / vars.popped_value.
    pub fn value_label(&self) -> Option<String> {
        if let Some(v) = &self.value {
            if !v.is_empty_marker() {
                return Some(v.label());
            }
        }
        for key in ["value", "data", "popped_value", "id"] {
            if let Some(raw) = self.vars.get(key) {
                let sv = StepValue::from_json(raw);
                if !sv.is_empty_marker() {
                    return Some(sv.label());
                }
            }
        }
        None
    }

    /// Label of a named endpoint (`source`/`target`), for graph steps.
    pub fn endpoint(&self, which: Endpoint) -> Option<String> {
        let v = match which {
            Endpoint::Source => self.source.as_ref(),
            Endpoint::Target => self.target.as_ref(),
        }?;
        if v.is_empty_marker() {
            None
        } else {
            Some(v.label())
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Endpoint {
    Source,
    Target,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattened_extras_survive_roundtrip() {
        let raw = r#"{"action":"enqueue","value":"a","rear":0,"size":3}"#;
        let step: Step = serde_json::from_str(raw).unwrap();
        assert_eq!(step.action_norm(), "enqueue");
        assert_eq!(step.index_of("rear"), Some(0));
        assert_eq!(step.num("size"), Some(3.0));
        let back: Step = serde_json::from_str(&serde_json::to_string(&step).unwrap()).unwrap();
        assert_eq!(step, back);
    }

    #[test]
    fn vars_back_the_typed_accessors() {
        let step = Step::new("pop").with_var("popped_value", json!(7));
        assert_eq!(step.value_label(), Some("7".to_string()));
        assert_eq!(step.num("popped_value"), Some(7.0));
    }

    #[test]
    fn wrong_shapes_yield_none() {
        let step = Step::new("insert").with_field("index", json!("not-a-number"));
        assert_eq!(step.index_of("index"), None);
        assert_eq!(step.list("index"), None);
    }
}
