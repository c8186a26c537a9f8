//! Embedding and recovery of plan payloads inside message text.
//!
//! A message that carries a plan stores it as a JSON block between two
//! fixed literal markers, appended after the human-readable text. The
//! block survives storage and retrieval of the message as a plain string;
//! [`decode`] recovers it on display, degrading to clean text whenever the
//! block is missing, unterminated, or unparsable. Rendering surfaces must
//! always go through [`decode`] before showing message content, and
//! producers must go through [`encode`] rather than hand-building markers.
//!
//! Both operations are pure, synchronous functions with no shared state;
//! they may be called concurrently from any number of tasks.
//!
//! The markers are chosen to be exceedingly unlikely in natural or
//! model-generated text, so no escaping is applied to markers occurring
//! inside the visible text segment.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

#[cfg(test)]
mod tests;

/// Literal marker opening an embedded plan block.
///
/// Must match byte-for-byte between producer and consumer.
pub const PLAN_START_MARKER: &str = "<<<PLAN_MY_DAY_JSON>>>";

/// Literal marker closing an embedded plan block.
pub const PLAN_END_MARKER: &str = "<<<END_PLAN_MY_DAY_JSON>>>";

/// JSON wire key for the advisory target date.
const TARGET_DATE_KEY: &str = "targetDate";

/// JSON wire key for the plan value.
const PLAN_KEY: &str = "plan";

/// A structured plan attached to a message.
///
/// The `plan` value is opaque to the codec: its meaning and shape are
/// defined entirely by the caller. The `target_date` is an advisory
/// `YYYY-MM-DD` string; the codec neither validates nor interprets it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanPayload {
    /// Opaque structured plan value
    pub plan: Value,

    /// Calendar date the plan targets, `YYYY-MM-DD` by convention
    #[serde(rename = "targetDate", skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
}

impl PlanPayload {
    /// Creates a payload with no target date.
    pub fn new(plan: Value) -> Self {
        Self {
            plan,
            target_date: None,
        }
    }

    /// Creates a payload targeting a calendar date.
    pub fn with_target_date(plan: Value, target_date: impl Into<String>) -> Self {
        Self {
            plan,
            target_date: Some(target_date.into()),
        }
    }

    /// Deserializes the opaque plan value into a concrete shape.
    ///
    /// The application layer above the codec decides what a plan looks
    /// like; this is the seam where that shape is imposed.
    pub fn plan_as<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.plan.clone())?)
    }
}

/// Why a found block yielded no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedBlock {
    /// A start marker with no end marker after it; everything from the
    /// start marker onward was discarded
    Unterminated,

    /// Both markers present but the interior is not valid JSON
    Unparsable,
}

/// Outcome of searching message content for an embedded plan block.
///
/// Decoding never raises a user-visible error: every failure mode
/// degrades to clean display text, and this variant records which case
/// occurred so callers can distinguish "no payload" from "payload lost".
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadBlock {
    /// No start marker in the content
    Absent,

    /// A block was found and stripped, but no payload could be recovered
    Malformed(MalformedBlock),

    /// A payload was recovered (current or legacy format)
    Present(PlanPayload),
}

impl PayloadBlock {
    /// True when a payload was recovered.
    pub fn is_present(&self) -> bool {
        matches!(self, PayloadBlock::Present(_))
    }
}

/// Message content split into display text and payload outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMessage {
    /// Human-readable text with markers and block stripped
    pub text: String,

    /// What the embedded block search found
    pub block: PayloadBlock,
}

impl DecodedMessage {
    /// The recovered payload, collapsing the absent and malformed cases.
    ///
    /// Rendering surfaces that only care whether a widget can be shown
    /// use this; callers that need the malformed distinction match on
    /// [`DecodedMessage::block`] instead.
    pub fn payload(&self) -> Option<&PlanPayload> {
        match &self.block {
            PayloadBlock::Present(payload) => Some(payload),
            _ => None,
        }
    }

    /// Consumes the decoded message into text and optional payload.
    pub fn into_parts(self) -> (String, Option<PlanPayload>) {
        let payload = match self.block {
            PayloadBlock::Present(payload) => Some(payload),
            _ => None,
        };
        (self.text, payload)
    }
}

/// Embeds a plan into message text.
///
/// Trims trailing whitespace from `text`, then appends a blank line, the
/// start marker, the serialized `{plan, targetDate}` block, and the end
/// marker, each on its own line. The text itself is never otherwise
/// mutated.
///
/// # Errors
///
/// Returns [`crate::MessengerError::Serialization`] when `plan` has no
/// JSON representation (e.g. a map with non-string keys). Plans built
/// from [`serde_json::Value`] always succeed.
pub fn encode<P: Serialize>(text: &str, plan: &P, target_date: Option<&str>) -> Result<String> {
    let payload = PlanPayload {
        plan: serde_json::to_value(plan)?,
        target_date: target_date.map(String::from),
    };
    let block = serde_json::to_string(&payload)?;

    Ok(format!(
        "{}\n\n{}\n{}\n{}",
        text.trim_end(),
        PLAN_START_MARKER,
        block,
        PLAN_END_MARKER
    ))
}

/// Splits message content into display text and an embedded payload.
///
/// Total and infallible: arbitrary input (hand-edited, legacy, or
/// marker-free) always yields renderable text. At most one block is
/// recognized; only the first start marker, and the first end marker
/// after it, are honored.
///
/// Interior shapes:
/// - an object with a `plan` member is the current format; its
///   `targetDate` member (when a string) is the advisory date
/// - any other valid JSON value is the legacy format and becomes the
///   plan wholesale, with no date
pub fn decode(content: &str) -> DecodedMessage {
    let Some(start) = content.find(PLAN_START_MARKER) else {
        return DecodedMessage {
            text: content.to_string(),
            block: PayloadBlock::Absent,
        };
    };

    let before = &content[..start];
    let after_start = &content[start + PLAN_START_MARKER.len()..];

    let Some(end) = after_start.find(PLAN_END_MARKER) else {
        // Dangling start marker: the trailing fragment is intentionally
        // lost, not an error.
        return DecodedMessage {
            text: before.trim_end().to_string(),
            block: PayloadBlock::Malformed(MalformedBlock::Unterminated),
        };
    };

    let interior = after_start[..end].trim();
    let after = &after_start[end + PLAN_END_MARKER.len()..];
    let text = format!("{before}{after}").trim().to_string();

    let block = match serde_json::from_str::<Value>(interior) {
        Ok(Value::Object(mut map)) if map.contains_key(PLAN_KEY) => {
            let target_date = map
                .get(TARGET_DATE_KEY)
                .and_then(Value::as_str)
                .map(String::from);
            let plan = map.remove(PLAN_KEY).unwrap_or(Value::Null);
            PayloadBlock::Present(PlanPayload { plan, target_date })
        }
        Ok(value) => PayloadBlock::Present(PlanPayload {
            plan: value,
            target_date: None,
        }),
        Err(_) => PayloadBlock::Malformed(MalformedBlock::Unparsable),
    };

    DecodedMessage { text, block }
}
