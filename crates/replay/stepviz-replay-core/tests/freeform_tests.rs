use stepviz_replay::{
    interpret, parse_analysis_json, Config, FreeformPlan, KindHint, resolve,
};

fn plan_from(raw: &str) -> FreeformPlan {
    let payload = parse_analysis_json(raw).unwrap();
    FreeformPlan::from_meta(&payload.meta)
}

/// it should classify a planned-but-untagged payload as fallback and still
/// produce a script
#[test]
fn fallback_with_plan_yields_script() {
    let raw = r#"{
        "steps": [],
        "meta": {
            "animation_plan": {
                "objects": [
                    {"id": "o1", "type": "box", "label": "A", "x": 0, "y": 0},
                    {"id": "o2", "type": "box", "label": "B", "x": 50, "y": 0}
                ],
                "operations": [
                    {"op": "highlight", "target": ["o1"], "comment": "look at A"},
                    {"op": "move", "target": ["o2"]}
                ]
            }
        }
    }"#;
    let payload = parse_analysis_json(raw).unwrap();
    let kind = resolve(&KindHint::from_payload(&payload), &payload.steps);
    assert!(kind.is_fallback());

    let script = interpret(&FreeformPlan::from_meta(&payload.meta), &Config::default());
    assert!(!script.is_empty());
    assert_eq!(script.lines.len(), 2);
    assert_eq!(script.lines[0].say, "look at A");
    // the op without a comment gets the derived default sentence
    assert_eq!(script.lines[1].say, "Step 2: Observe behavior.");
    assert_eq!(script.lines[1].intent, "move");
}

/// it should find objects through the doubly-nested plan shape
#[test]
fn nested_plan_flattens() {
    let plan = plan_from(
        r#"{
            "meta": {
                "animation_plan": {
                    "animation_plan": {
                        "objects": [{"id": "x", "label": "X", "x": 0, "y": 0}]
                    }
                }
            }
        }"#,
    );
    assert_eq!(plan.objects.len(), 1);
    assert_eq!(plan.objects[0].id, "x");
}

/// it should drop scraped function names from the object list
#[test]
fn function_artifacts_filtered() {
    let plan = plan_from(
        r#"{
            "meta": {
                "animation_plan": {
                    "objects": [
                        {"id": "f", "label": "__init__", "x": 0, "y": 0},
                        {"id": "k", "label": "Cell 3", "x": 0, "y": 0}
                    ]
                }
            }
        }"#,
    );
    assert_eq!(plan.objects.len(), 1);
    assert_eq!(plan.objects[0].label, "Cell 3");
}

/// it should reveal one object per script line
#[test]
fn progressive_reveal() {
    let plan = plan_from(
        r#"{
            "meta": {
                "animation_plan": {
                    "objects": [
                        {"id": "a", "label": "A", "x": 0, "y": 0},
                        {"id": "b", "label": "B", "x": 0, "y": 0},
                        {"id": "c", "label": "C", "x": 0, "y": 0}
                    ],
                    "narration": ["first", "second", "third"]
                }
            }
        }"#,
    );
    let script = interpret(&plan, &Config::default());
    assert_eq!(script.visible_objects(0).len(), 1);
    assert_eq!(script.visible_objects(1).len(), 2);
    assert_eq!(script.visible_objects(10).len(), 3);
}

/// it should space derived lines by the configured interval
#[test]
fn derived_line_timing() {
    let plan = plan_from(
        r#"{
            "meta": {
                "animation_plan": {
                    "narration": ["compare arr_cell_0 with arr_cell_1", "done"]
                }
            }
        }"#,
    );
    let cfg = Config {
        freeform_line_seconds: 1.5,
        ..Default::default()
    };
    let script = interpret(&plan, &cfg);
    assert_eq!(script.lines[0].t, 0.0);
    assert_eq!(script.lines[1].t, 1.5);
    assert_eq!(script.lines[0].say, "compare index 0 with index 1");
}

/// it should yield an explicitly empty script for an empty plan
#[test]
fn empty_plan_is_empty_script() {
    let plan = plan_from(r#"{"meta": {}}"#);
    let script = interpret(&plan, &Config::default());
    assert!(script.is_empty());
}
