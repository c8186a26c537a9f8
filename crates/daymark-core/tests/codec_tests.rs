//! Behavioral tests for the payload codec public API.

use daymark_core::{
    codec::{decode, encode},
    MalformedBlock, PayloadBlock, PlanPayload, PLAN_END_MARKER, PLAN_START_MARKER,
};
use serde_json::json;

#[test]
fn encode_then_decode_recovers_text_plan_and_date() {
    let combined = encode(
        "Here is your plan:",
        &json!({"tasks": ["A", "B"]}),
        Some("2024-06-01"),
    )
    .expect("Failed to encode");

    let decoded = decode(&combined);
    assert_eq!(decoded.text, "Here is your plan:");
    assert_eq!(
        decoded.block,
        PayloadBlock::Present(PlanPayload::with_target_date(
            json!({"tasks": ["A", "B"]}),
            "2024-06-01",
        ))
    );
}

#[test]
fn encoded_output_contains_exactly_one_block() {
    let combined = encode("text", &json!({"a": 1}), None).expect("Failed to encode");
    assert_eq!(combined.matches(PLAN_START_MARKER).count(), 1);
    assert_eq!(combined.matches(PLAN_END_MARKER).count(), 1);

    // Layout: trimmed text, blank line, then each block line on its own
    let lines: Vec<&str> = combined.lines().collect();
    assert_eq!(lines[0], "text");
    assert_eq!(lines[1], "");
    assert_eq!(lines[2], PLAN_START_MARKER);
    assert_eq!(lines[4], PLAN_END_MARKER);
}

#[test]
fn content_without_markers_decodes_to_itself() {
    let decoded = decode("Hello world");
    assert_eq!(decoded.text, "Hello world");
    assert_eq!(decoded.block, PayloadBlock::Absent);
}

#[test]
fn legacy_block_without_wrapper_object_is_the_plan() {
    // Messages persisted before the target date existed stored the bare
    // plan value between the markers.
    let legacy = format!(
        "Your plan\n\n{PLAN_START_MARKER}\n{}\n{PLAN_END_MARKER}",
        json!({"morning": ["standup"], "afternoon": ["focus block"]})
    );

    let decoded = decode(&legacy);
    assert_eq!(decoded.text, "Your plan");
    let payload = decoded.payload().expect("Expected a payload");
    assert_eq!(
        payload.plan,
        json!({"morning": ["standup"], "afternoon": ["focus block"]})
    );
    assert_eq!(payload.target_date, None);
}

#[test]
fn dangling_start_marker_truncates_and_reports_unterminated() {
    let content = format!("Keep this\n{PLAN_START_MARKER}");
    let decoded = decode(&content);
    assert_eq!(decoded.text, "Keep this");
    assert_eq!(
        decoded.block,
        PayloadBlock::Malformed(MalformedBlock::Unterminated)
    );
}

#[test]
fn garbage_interior_reports_unparsable_but_text_survives() {
    let content = format!("Hello\n{PLAN_START_MARKER}not valid data{PLAN_END_MARKER}\nBye");
    let decoded = decode(&content);
    assert_eq!(decoded.text, "Hello\n\nBye");
    assert_eq!(
        decoded.block,
        PayloadBlock::Malformed(MalformedBlock::Unparsable)
    );
}

#[test]
fn decode_is_pure_and_repeatable() {
    let combined = encode("x", &json!([1, 2]), Some("2025-12-31")).expect("Failed to encode");
    assert_eq!(decode(&combined), decode(&combined));
}
