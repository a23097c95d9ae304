//! Loosely-typed scalar values carried by steps.
//!
//! Backends disagree on field shapes: indices arrive as numbers or numeric
//! strings, values as strings, numbers, or nested lists. `StepValue` absorbs
//! all of them; the typed accessors below coerce on demand and return `None`
//! rather than failing when a shape does not fit.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The empty-slot marker used everywhere a backend reports a hole.
pub const EMPTY_MARKER: &str = "∅";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepValue {
    Null,
    Bool(bool),
    // Put Int before Float so whole numbers keep their integral shape.
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<StepValue>),
}

impl StepValue {
    /// Numeric view; numeric strings coerce ("3" -> 3.0).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StepValue::Int(n) => Some(*n as f64),
            StepValue::Float(f) => Some(*f),
            StepValue::Text(s) => s.trim().parse::<f64>().ok(),
            StepValue::Bool(_) | StepValue::Null | StepValue::List(_) => None,
        }
    }

    /// Non-negative integral view, for indices. Fractional or negative
    /// numbers do not qualify.
    pub fn as_index(&self) -> Option<usize> {
        let f = self.as_f64()?;
        if f >= 0.0 && f.fract() == 0.0 && f <= usize::MAX as f64 {
            Some(f as usize)
        } else {
            None
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StepValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Display label with empty-ish values normalized to [`EMPTY_MARKER`],
    /// matching how the original visualizer rendered holes.
    pub fn label(&self) -> String {
        match self {
            StepValue::Null => EMPTY_MARKER.to_string(),
            StepValue::Bool(b) => b.to_string(),
            StepValue::Int(n) => n.to_string(),
            StepValue::Float(f) => {
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    format!("{}", *f as i64)
                } else {
                    f.to_string()
                }
            }
            StepValue::Text(s) => {
                let t = s.trim();
                if t.is_empty() || t.eq_ignore_ascii_case("none") || t.eq_ignore_ascii_case("null")
                    || t.eq_ignore_ascii_case("undefined")
                {
                    EMPTY_MARKER.to_string()
                } else {
                    t.to_string()
                }
            }
            StepValue::List(items) => items
                .iter()
                .map(StepValue::label)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    pub fn is_empty_marker(&self) -> bool {
        self.label() == EMPTY_MARKER
    }

    /// Lift a serde_json value into a StepValue (lossy for objects, which
    /// have no scalar meaning at this layer).
    pub fn from_json(v: &serde_json::Value) -> StepValue {
        match v {
            serde_json::Value::Null => StepValue::Null,
            serde_json::Value::Bool(b) => StepValue::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    StepValue::Int(i)
                } else {
                    StepValue::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => StepValue::Text(s.clone()),
            serde_json::Value::Array(items) => {
                StepValue::List(items.iter().map(StepValue::from_json).collect())
            }
            serde_json::Value::Object(_) => StepValue::Null,
        }
    }
}

impl fmt::Display for StepValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<&str> for StepValue {
    fn from(s: &str) -> Self {
        StepValue::Text(s.to_string())
    }
}

impl From<String> for StepValue {
    fn from(s: String) -> Self {
        StepValue::Text(s)
    }
}

impl From<i64> for StepValue {
    fn from(n: i64) -> Self {
        StepValue::Int(n)
    }
}

impl From<f64> for StepValue {
    fn from(f: f64) -> Self {
        StepValue::Float(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_strings_coerce() {
        assert_eq!(StepValue::Text(" 42 ".into()).as_f64(), Some(42.0));
        assert_eq!(StepValue::Text("42".into()).as_index(), Some(42));
        assert_eq!(StepValue::Text("4.5".into()).as_index(), None);
        assert_eq!(StepValue::Int(-1).as_index(), None);
    }

    #[test]
    fn empty_markers_normalize() {
        assert_eq!(StepValue::Null.label(), EMPTY_MARKER);
        assert_eq!(StepValue::Text("None".into()).label(), EMPTY_MARKER);
        assert_eq!(StepValue::Text("  ".into()).label(), EMPTY_MARKER);
        assert_eq!(StepValue::Text("b".into()).label(), "b");
    }

    #[test]
    fn untagged_deserialization_prefers_specific_shapes() {
        let v: StepValue = serde_json::from_str("3").unwrap();
        assert_eq!(v, StepValue::Int(3));
        let v: StepValue = serde_json::from_str("3.5").unwrap();
        assert_eq!(v, StepValue::Float(3.5));
        let v: StepValue = serde_json::from_str("[1,\"a\"]").unwrap();
        assert_eq!(
            v,
            StepValue::List(vec![StepValue::Int(1), StepValue::Text("a".into())])
        );
    }
}
