//! Message model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Author;
use crate::codec::{self, DecodedMessage};

/// Represents a stored chat message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Unique identifier for the message
    pub id: u64,

    /// Who wrote the message
    #[serde(default)]
    pub author: Author,

    /// Stored combined text; may carry an embedded plan block
    pub content: String,

    /// Timestamp when the message was posted (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the message was last edited (UTC)
    pub updated_at: Timestamp,
}

impl Message {
    /// Decodes the stored content into display text and payload outcome.
    ///
    /// Editing a message replaces its content wholesale, so a payload
    /// embedded at post time is destroyed by any later edit unless the
    /// new content carries its own block.
    pub fn decoded(&self) -> DecodedMessage {
        codec::decode(&self.content)
    }
}
