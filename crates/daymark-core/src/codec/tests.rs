use std::collections::HashMap;

use serde::Deserialize;
use serde_json::json;

use super::*;
use crate::MessengerError;

#[test]
fn round_trip_preserves_text_plan_and_date() {
    let plan = json!({"tasks": ["A", "B"]});
    let combined = encode("Here is your plan:", &plan, Some("2024-06-01")).unwrap();

    let decoded = decode(&combined);
    assert_eq!(decoded.text, "Here is your plan:");
    assert_eq!(
        decoded.block,
        PayloadBlock::Present(PlanPayload {
            plan,
            target_date: Some("2024-06-01".to_string()),
        })
    );
}

#[test]
fn round_trip_without_target_date() {
    let plan = json!({"tasks": []});
    let combined = encode("Morning schedule", &plan, None).unwrap();
    assert!(!combined.contains("targetDate"));

    let decoded = decode(&combined);
    assert_eq!(decoded.text, "Morning schedule");
    assert_eq!(decoded.payload().unwrap().plan, plan);
    assert_eq!(decoded.payload().unwrap().target_date, None);
}

#[test]
fn round_trip_with_empty_text() {
    let combined = encode("", &json!(["walk", "write"]), None).unwrap();
    let decoded = decode(&combined);
    assert_eq!(decoded.text, "");
    assert!(decoded.block.is_present());
}

#[test]
fn encode_trims_only_trailing_whitespace() {
    let combined = encode("  indented text  \n\n", &json!(1), None).unwrap();
    assert!(combined.starts_with(&format!("  indented text\n\n{PLAN_START_MARKER}\n")));
    assert!(combined.ends_with(PLAN_END_MARKER));
}

#[test]
fn decode_without_markers_returns_input_unchanged() {
    let decoded = decode("Hello world");
    assert_eq!(decoded.text, "Hello world");
    assert_eq!(decoded.block, PayloadBlock::Absent);
    assert_eq!(decoded.payload(), None);
}

#[test]
fn decode_without_markers_does_not_trim() {
    let decoded = decode("  spaced out \n");
    assert_eq!(decoded.text, "  spaced out \n");
    assert_eq!(decoded.block, PayloadBlock::Absent);
}

#[test]
fn missing_end_marker_truncates_to_leading_text() {
    let content = format!("Draft plan below\n{PLAN_START_MARKER}\n{{\"plan\": 1}}");
    let decoded = decode(&content);
    assert_eq!(decoded.text, "Draft plan below");
    assert_eq!(
        decoded.block,
        PayloadBlock::Malformed(MalformedBlock::Unterminated)
    );
}

#[test]
fn end_marker_before_start_marker_is_not_honored() {
    let content = format!("{PLAN_END_MARKER}\nstray tail\n{PLAN_START_MARKER}");
    let decoded = decode(&content);
    // The end marker precedes the start marker, so the block is
    // unterminated and everything from the start marker on is lost.
    assert_eq!(decoded.text, format!("{PLAN_END_MARKER}\nstray tail"));
    assert_eq!(
        decoded.block,
        PayloadBlock::Malformed(MalformedBlock::Unterminated)
    );
}

#[test]
fn unparsable_interior_still_strips_markers() {
    let content = format!("Hello\n{PLAN_START_MARKER}not valid data{PLAN_END_MARKER}\nBye");
    let decoded = decode(&content);
    assert_eq!(decoded.text, "Hello\n\nBye");
    assert_eq!(
        decoded.block,
        PayloadBlock::Malformed(MalformedBlock::Unparsable)
    );
}

#[test]
fn empty_interior_is_unparsable() {
    let content = format!("text {PLAN_START_MARKER}{PLAN_END_MARKER}");
    let decoded = decode(&content);
    assert_eq!(decoded.text, "text");
    assert_eq!(
        decoded.block,
        PayloadBlock::Malformed(MalformedBlock::Unparsable)
    );
}

#[test]
fn legacy_bare_object_becomes_plan_without_date() {
    let content = format!(
        "Old message\n{PLAN_START_MARKER}\n{{\"tasks\": [\"A\"]}}\n{PLAN_END_MARKER}"
    );
    let decoded = decode(&content);
    assert_eq!(decoded.text, "Old message");
    assert_eq!(
        decoded.block,
        PayloadBlock::Present(PlanPayload::new(json!({"tasks": ["A"]})))
    );
}

#[test]
fn legacy_bare_array_becomes_plan() {
    let content = format!("x\n{PLAN_START_MARKER}\n[1, 2, 3]\n{PLAN_END_MARKER}");
    let decoded = decode(&content);
    assert_eq!(
        decoded.payload().unwrap(),
        &PlanPayload::new(json!([1, 2, 3]))
    );
}

#[test]
fn current_format_with_null_plan_member_is_honored() {
    let content = format!("x\n{PLAN_START_MARKER}\n{{\"plan\": null}}\n{PLAN_END_MARKER}");
    let decoded = decode(&content);
    assert_eq!(
        decoded.block,
        PayloadBlock::Present(PlanPayload::new(Value::Null))
    );
}

#[test]
fn non_string_target_date_is_ignored() {
    let content = format!(
        "x\n{PLAN_START_MARKER}\n{{\"plan\": 1, \"targetDate\": 20240601}}\n{PLAN_END_MARKER}"
    );
    let decoded = decode(&content);
    let payload = decoded.payload().unwrap();
    assert_eq!(payload.plan, json!(1));
    assert_eq!(payload.target_date, None);
}

#[test]
fn extra_members_are_tolerated_in_current_format() {
    let content = format!(
        "x\n{PLAN_START_MARKER}\n{{\"plan\": {{\"tasks\": []}}, \"targetDate\": \"2025-01-02\", \"version\": 2}}\n{PLAN_END_MARKER}"
    );
    let decoded = decode(&content);
    assert_eq!(
        decoded.payload().unwrap().target_date,
        Some("2025-01-02".to_string())
    );
}

#[test]
fn only_first_block_is_recognized() {
    let first = encode("one", &json!(1), None).unwrap();
    let second = encode("", &json!(2), None).unwrap();
    let combined = format!("{first}\n{second}");

    let decoded = decode(&combined);
    assert_eq!(decoded.payload().unwrap().plan, json!(1));
    // The second block's markers survive in the visible text.
    assert!(decoded.text.contains(PLAN_START_MARKER));
}

#[test]
fn plan_as_imposes_a_concrete_shape() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct DayPlan {
        tasks: Vec<String>,
    }

    let combined = encode("x", &json!({"tasks": ["A", "B"]}), None).unwrap();
    let decoded = decode(&combined);
    let plan: DayPlan = decoded.payload().unwrap().plan_as().unwrap();
    assert_eq!(
        plan,
        DayPlan {
            tasks: vec!["A".to_string(), "B".to_string()],
        }
    );
}

#[test]
fn unrepresentable_plan_surfaces_a_typed_error() {
    // serde_json requires string map keys; a tuple-keyed map has no JSON
    // representation.
    let mut plan: HashMap<(u8, u8), u8> = HashMap::new();
    plan.insert((1, 2), 3);

    let err = encode("x", &plan, None).unwrap_err();
    assert!(matches!(err, MessengerError::Serialization { .. }));
}

#[test]
fn into_parts_collapses_malformed_to_none() {
    let content = format!("text\n{PLAN_START_MARKER}");
    let (text, payload) = decode(&content).into_parts();
    assert_eq!(text, "text");
    assert!(payload.is_none());
}
