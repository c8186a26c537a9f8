//! Parameter structures for Daymark operations
//!
//! This module contains shared parameter structures that can be used across
//! different interfaces (CLI, MCP, etc.) without framework-specific derives
//! or dependencies. Interface layers wrap these in their own types: the CLI
//! adds clap derives and converts via `From`, the MCP server adds schemars
//! derives behind the `schema` feature with `#[serde(transparent)]`
//! wrappers. Core logic only ever sees the types below.
//!
//! Validation that belongs to the application layer lives here too: the
//! payload codec itself never validates a target date, but an interface
//! accepting one checks it parses as a civil date before posting.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{MessengerError, Result},
    models::Author,
};

/// Generic parameters for operations requiring just an ID.
///
/// Used for operations like show_message and get_message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for posting a new message.
///
/// A plan may be attached; it is embedded into the stored content by the
/// payload codec. A target date is only meaningful alongside a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct PostMessage {
    /// Human-readable message text (required, may be empty)
    pub content: String,
    /// Author of the message ('user' or 'assistant'); defaults to 'user'
    pub author: Option<String>,
    /// Optional structured plan to embed in the message
    pub plan: Option<serde_json::Value>,
    /// Optional calendar date the plan targets, YYYY-MM-DD
    pub target_date: Option<String>,
}

impl PostMessage {
    /// Validate posting parameters and return the parsed author.
    ///
    /// # Errors
    ///
    /// * `MessengerError::InvalidInput` - When the author string is invalid
    /// * `MessengerError::InvalidInput` - When a target date is supplied
    ///   without a plan
    /// * `MessengerError::InvalidInput` - When the target date is not a
    ///   YYYY-MM-DD calendar date
    pub fn validate(&self) -> Result<Author> {
        let author = parse_author(self.author.as_deref())?;

        if self.target_date.is_some() && self.plan.is_none() {
            return Err(MessengerError::invalid_input(
                "target_date",
                "A target date is only meaningful alongside a plan. Provide 'plan' or drop the date.",
            ));
        }

        if let Some(date) = &self.target_date {
            jiff::civil::Date::from_str(date).map_err(|_| {
                MessengerError::invalid_input(
                    "target_date",
                    format!("Invalid date: {date}. Expected YYYY-MM-DD"),
                )
            })?;
        }

        Ok(author)
    }
}

/// Parameters for listing messages.
///
/// Messages are returned newest first, optionally filtered by author and
/// capped at a limit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListMessages {
    /// Only show messages from this author ('user' or 'assistant')
    pub author: Option<String>,
    /// Maximum number of messages to return
    pub limit: Option<u32>,
}

impl ListMessages {
    /// Validate listing parameters and return the parsed author filter.
    ///
    /// # Errors
    ///
    /// * `MessengerError::InvalidInput` - When the author string is invalid
    pub fn validate(&self) -> Result<Option<Author>> {
        match self.author.as_deref() {
            Some(s) => Ok(Some(parse_author(Some(s))?)),
            None => Ok(None),
        }
    }
}

/// Parameters for editing an existing message.
///
/// The stored content is replaced wholesale, which destroys any payload
/// embedded in the previous content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct EditMessage {
    /// Message ID to edit (required)
    pub id: u64,
    /// Replacement message text
    pub content: String,
}

/// Parameters for permanently deleting a message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeleteMessage {
    /// Message ID to delete (required)
    pub id: u64,
    /// Explicit confirmation flag; deletion is refused without it
    #[serde(default)]
    pub confirmed: bool,
}

fn parse_author(author: Option<&str>) -> Result<Author> {
    match author {
        None => Ok(Author::default()),
        Some(s) => Author::from_str(s).map_err(|_| {
            MessengerError::invalid_input(
                "author",
                format!("Invalid author: {s}. Must be 'user' or 'assistant'"),
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn post_defaults_to_user_author() {
        let params = PostMessage {
            content: "hi".to_string(),
            ..Default::default()
        };
        assert_eq!(params.validate().unwrap(), Author::User);
    }

    #[test]
    fn post_accepts_assistant_author() {
        let params = PostMessage {
            content: "hi".to_string(),
            author: Some("assistant".to_string()),
            ..Default::default()
        };
        assert_eq!(params.validate().unwrap(), Author::Assistant);
    }

    #[test]
    fn post_rejects_unknown_author() {
        let params = PostMessage {
            content: "hi".to_string(),
            author: Some("narrator".to_string()),
            ..Default::default()
        };
        match params.validate().unwrap_err() {
            MessengerError::InvalidInput { field, .. } => assert_eq!(field, "author"),
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn post_rejects_date_without_plan() {
        let params = PostMessage {
            content: "hi".to_string(),
            target_date: Some("2024-06-01".to_string()),
            ..Default::default()
        };
        match params.validate().unwrap_err() {
            MessengerError::InvalidInput { field, .. } => assert_eq!(field, "target_date"),
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn post_rejects_malformed_date() {
        let params = PostMessage {
            content: "hi".to_string(),
            plan: Some(json!({"tasks": []})),
            target_date: Some("June 1st".to_string()),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn post_accepts_plan_with_valid_date() {
        let params = PostMessage {
            content: "hi".to_string(),
            plan: Some(json!({"tasks": []})),
            target_date: Some("2024-06-01".to_string()),
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn list_parses_author_filter() {
        let params = ListMessages {
            author: Some("assistant".to_string()),
            limit: None,
        };
        assert_eq!(params.validate().unwrap(), Some(Author::Assistant));

        let params = ListMessages::default();
        assert_eq!(params.validate().unwrap(), None);
    }
}
