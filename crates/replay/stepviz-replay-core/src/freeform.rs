//! Generic/freeform interpreter.
//!
//! When classification falls through, the payload may still carry a visual
//! plan: positioned objects, a list of operations, and optional narration
//! lines. This module extracts that plan leniently from whatever nesting the
//! backend produced and compiles it into a timed script. The path never fails
//! closed; an empty plan yields an explicitly empty script.

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::config::Config;
use stepviz_api_core::Meta;

/// Placeholder kind used when an object arrives without a recognizable type.
pub const DEFAULT_OBJECT_KIND: &str = "box";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanObject {
    pub id: String,
    /// Visual kind (`cell`, `box`, `label`, `arrow`, ...). Unknown kinds keep
    /// the default placeholder.
    pub kind: String,
    pub label: String,
    pub x: f32,
    pub y: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h: Option<f32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanOp {
    pub op: String,
    pub targets: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<usize>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FreeformPlan {
    pub objects: Vec<PlanObject>,
    pub operations: Vec<PlanOp>,
    pub narration: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<Vec<ScriptLine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

/// One entry of the compiled script: at offset `t` seconds, say `say` while
/// applying `intent` to `targets`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptLine {
    pub t: f32,
    pub say: String,
    pub intent: String,
    pub targets: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimedScript {
    pub lines: Vec<ScriptLine>,
    pub objects: Vec<PlanObject>,
}

impl TimedScript {
    /// The "no visual objects" condition: nothing to draw and nothing to say.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.objects.is_empty()
    }

    /// Objects revealed at the given line: one additional object becomes
    /// visible per script line, giving an impression of construction.
    pub fn visible_objects(&self, line_idx: usize) -> &[PlanObject] {
        let limit = (line_idx + 1).min(self.objects.len());
        &self.objects[..limit]
    }
}

fn str_of(v: Option<&Json>) -> Option<String> {
    match v? {
        Json::String(s) => Some(s.clone()),
        Json::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn f32_of(v: Option<&Json>) -> Option<f32> {
    v?.as_f64().map(|f| f as f32)
}

fn targets_of(v: Option<&Json>) -> Vec<String> {
    match v {
        Some(Json::Array(items)) => items
            .iter()
            .filter_map(|t| str_of(Some(t)))
            .collect(),
        Some(other) => str_of(Some(other)).into_iter().collect(),
        None => Vec::new(),
    }
}

/// Bare function/method names (`__init__`, `add`, `transpose`) are artifacts
/// of source scraping, not visuals; the original animator filtered them out.
fn is_function_label(label: &str) -> bool {
    let t = label.trim();
    !t.is_empty() && t.chars().all(|c| c == '_' || c.is_ascii_lowercase())
}

fn parse_object(v: &Json) -> Option<PlanObject> {
    let map = v.as_object()?;
    let label = str_of(map.get("label")).unwrap_or_default();
    if is_function_label(&label) {
        return None;
    }
    Some(PlanObject {
        id: str_of(map.get("id")).unwrap_or_else(|| label.clone()),
        kind: str_of(map.get("type"))
            .or_else(|| str_of(map.get("kind")))
            .unwrap_or_else(|| DEFAULT_OBJECT_KIND.to_string()),
        label,
        x: f32_of(map.get("x")).unwrap_or(0.0),
        y: f32_of(map.get("y")).unwrap_or(0.0),
        w: f32_of(map.get("w")),
        h: f32_of(map.get("h")),
    })
}

fn parse_op(v: &Json) -> Option<PlanOp> {
    let map = v.as_object()?;
    Some(PlanOp {
        op: str_of(map.get("op"))
            .or_else(|| str_of(map.get("action")))
            .unwrap_or_else(|| "highlight".to_string()),
        targets: targets_of(map.get("target")),
        label: str_of(map.get("label")),
        comment: str_of(map.get("comment")).or_else(|| str_of(map.get("description"))),
        step: map.get("step").and_then(Json::as_u64).map(|n| n as usize),
    })
}

fn parse_script_line(v: &Json) -> Option<ScriptLine> {
    let map = v.as_object()?;
    Some(ScriptLine {
        t: f32_of(map.get("t")).unwrap_or(0.0),
        say: str_of(map.get("say")).unwrap_or_default(),
        intent: str_of(map.get("intent")).unwrap_or_else(|| "highlight".to_string()),
        targets: targets_of(map.get("targets")),
        label: str_of(map.get("label")),
    })
}

fn array_field<'a>(map: &'a serde_json::Map<String, Json>, key: &str) -> Option<&'a Vec<Json>> {
    match map.get(key) {
        Some(Json::Array(items)) if !items.is_empty() => Some(items),
        _ => None,
    }
}

impl FreeformPlan {
    /// Extract a plan from analysis metadata, tolerating every nesting the
    /// backend has been seen to produce: objects at the meta top level, under
    /// `animation_plan`, under a doubly-nested `animation_plan.animation_plan`,
    /// or as legacy `elements`.
    pub fn from_meta(meta: &Meta) -> FreeformPlan {
        let empty = serde_json::Map::new();
        let top: &serde_json::Map<String, Json> = &meta.extra;
        let plan_obj = meta
            .animation_plan
            .as_ref()
            .and_then(Json::as_object)
            .unwrap_or(&empty);
        // flatten one level of accidental nesting
        let inner = plan_obj
            .get("animation_plan")
            .and_then(Json::as_object)
            .filter(|m| !m.is_empty())
            .unwrap_or(plan_obj);

        let objects_raw = array_field(top, "objects")
            .or_else(|| array_field(inner, "objects"))
            .or_else(|| array_field(top, "elements"))
            .or_else(|| array_field(inner, "elements"));
        let operations_raw = array_field(top, "operations")
            .or_else(|| array_field(inner, "operations"));

        let objects = objects_raw
            .map(|items| items.iter().filter_map(parse_object).collect())
            .unwrap_or_default();
        let operations = operations_raw
            .map(|items| items.iter().filter_map(parse_op).collect())
            .unwrap_or_default();
        let narration = array_field(inner, "narration")
            .map(|items| items.iter().filter_map(|v| str_of(Some(v))).collect())
            .unwrap_or_default();
        let script = array_field(inner, "script")
            .map(|items| items.iter().filter_map(parse_script_line).collect());

        FreeformPlan {
            objects,
            operations,
            narration,
            script,
            layout: inner
                .get("layout")
                .and_then(Json::as_str)
                .map(str::to_string)
                .or_else(|| meta.layout.clone()),
            theme: inner.get("theme").and_then(Json::as_str).map(str::to_string),
        }
    }
}

/// Normalize scraped narration text: `arr_cell_7` reads as "index 7",
/// underscores become spaces, whitespace collapses.
pub fn normalize_narration(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find("arr_cell_") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos + "arr_cell_".len()..];
        let digits: String = tail.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            out.push_str("arr_cell_");
            rest = tail;
        } else {
            out.push_str("index ");
            out.push_str(&digits);
            rest = &tail[digits.len()..];
        }
    }
    out.push_str(rest);
    let spaced = out.replace('_', " ");
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compile a plan into a timed script.
///
/// Preference order matches the original interpreter: an explicit script wins;
/// otherwise narration lines pair positionally with operations at fixed
/// offsets; otherwise one line per operation with a derived default sentence.
pub fn interpret(plan: &FreeformPlan, cfg: &Config) -> TimedScript {
    let spacing = cfg.freeform_line_seconds.max(0.1);

    let lines: Vec<ScriptLine> = if let Some(script) = &plan.script {
        script
            .iter()
            .map(|line| ScriptLine {
                say: normalize_narration(&line.say),
                ..line.clone()
            })
            .collect()
    } else if !plan.narration.is_empty() {
        plan.narration
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let op = plan.operations.get(i);
                ScriptLine {
                    t: i as f32 * spacing,
                    say: normalize_narration(text),
                    intent: op
                        .map(|o| o.op.clone())
                        .unwrap_or_else(|| "highlight".to_string()),
                    targets: op.map(|o| o.targets.clone()).unwrap_or_default(),
                    label: op.and_then(|o| o.label.clone()),
                }
            })
            .collect()
    } else {
        plan.operations
            .iter()
            .enumerate()
            .map(|(i, op)| {
                let say = op
                    .comment
                    .as_deref()
                    .map(normalize_narration)
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| format!("Step {}: Observe behavior.", i + 1));
                ScriptLine {
                    t: i as f32 * spacing,
                    say,
                    intent: op.op.clone(),
                    targets: op.targets.clone(),
                    label: op.label.clone(),
                }
            })
            .collect()
    };

    TimedScript {
        lines,
        objects: plan.objects.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narration_normalizes_cell_references() {
        assert_eq!(
            normalize_narration("compare arr_cell_3 with  arr_cell_12"),
            "compare index 3 with index 12"
        );
        assert_eq!(normalize_narration("swap_values done"), "swap values done");
    }

    #[test]
    fn function_labels_are_filtered() {
        assert!(is_function_label("__init__"));
        assert!(is_function_label("transpose"));
        assert!(!is_function_label("Node A"));
        assert!(!is_function_label("cell 3"));
    }
}
