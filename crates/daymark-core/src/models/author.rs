//! Author enumeration for messages.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of message authors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    /// The human participant
    #[default]
    User,

    /// The assistant participant
    Assistant,
}

impl FromStr for Author {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Author::User),
            "assistant" => Ok(Author::Assistant),
            _ => Err(format!("Invalid author: {s}")),
        }
    }
}

impl Author {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Author::User => "user",
            Author::Assistant => "assistant",
        }
    }
}
