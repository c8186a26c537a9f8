//! Display implementations for domain models.
//!
//! Message formatting decodes stored content first: the visible text is
//! rendered as a paragraph, and a recovered plan becomes a structured
//! widget section. A malformed block degrades to clean text with no
//! widget and no error output.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    codec::PlanPayload,
    models::{Author, Message},
};

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Formats the plan widget section for a recovered payload.
fn fmt_plan_widget(payload: &PlanPayload, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &payload.target_date {
        Some(date) => writeln!(f, "## Plan for {date}")?,
        None => writeln!(f, "## Plan")?,
    }
    writeln!(f)?;

    let pretty = serde_json::to_string_pretty(&payload.plan).map_err(|_| fmt::Error)?;
    writeln!(f, "```json")?;
    writeln!(f, "{pretty}")?;
    writeln!(f, "```")?;

    Ok(())
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decoded = self.decoded();

        writeln!(f, "# {}. {}", self.id, self.author)?;
        writeln!(f)?;

        // Metadata section
        writeln!(f, "- Posted: {}", LocalDateTime(&self.created_at))?;
        if self.updated_at != self.created_at {
            writeln!(f, "- Edited: {}", LocalDateTime(&self.updated_at))?;
        }

        // Visible text as a paragraph
        if !decoded.text.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", decoded.text)?;
        }

        if let Some(payload) = decoded.payload() {
            writeln!(f)?;
            fmt_plan_widget(payload, f)?;
        }

        Ok(())
    }
}
