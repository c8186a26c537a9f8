//! Result wrapper types for displaying operation outcomes.
//!
//! These wrappers format the results of post, edit, and delete
//! operations with consistent messaging and the affected message's
//! decoded rendering.

use std::fmt;

use crate::models::Message;

/// Wrapper type for displaying the result of posting a message.
///
/// Records whether a plan payload was embedded at post time so the
/// confirmation can say so without re-decoding stored content.
pub struct PostResult {
    pub message: Message,
    pub plan_attached: bool,
}

impl PostResult {
    /// Create a new PostResult wrapper.
    pub fn new(message: Message, plan_attached: bool) -> Self {
        Self {
            message,
            plan_attached,
        }
    }
}

impl fmt::Display for PostResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.plan_attached {
            writeln!(f, "Posted message with ID: {} (plan attached)", self.message.id)?;
        } else {
            writeln!(f, "Posted message with ID: {}", self.message.id)?;
        }
        writeln!(f)?;
        write!(f, "{}", self.message)
    }
}

/// Wrapper type for displaying the result of an edit operation.
pub struct UpdateResult {
    pub message: Message,
}

impl UpdateResult {
    /// Create a new UpdateResult wrapper.
    pub fn new(message: Message) -> Self {
        Self { message }
    }
}

impl fmt::Display for UpdateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated message with ID: {}", self.message.id)?;
        writeln!(f)?;
        write!(f, "{}", self.message)
    }
}

/// Wrapper type for displaying the result of a delete operation.
pub struct DeleteResult {
    pub message: Message,
}

impl DeleteResult {
    /// Create a new DeleteResult wrapper.
    pub fn new(message: Message) -> Self {
        Self { message }
    }
}

impl fmt::Display for DeleteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Permanently deleted message with ID: {}", self.message.id)?;
        let decoded = self.message.decoded();
        if !decoded.text.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", decoded.text)?;
        }
        Ok(())
    }
}
