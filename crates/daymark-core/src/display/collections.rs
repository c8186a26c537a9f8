//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use super::datetime::LocalDateTime;
use crate::models::Message;

/// Newtype wrapper for displaying a feed of messages.
///
/// Renders each message compactly, newest first as supplied: a header
/// with ID, author, and post time, the decoded text, and a marker line
/// when a plan payload rode along. Handles empty feeds gracefully.
pub struct MessageFeed(pub Vec<Message>);

impl MessageFeed {
    /// Check if the feed is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of messages in the feed.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the message at the given index.
    pub fn get(&self, index: usize) -> Option<&Message> {
        self.0.get(index)
    }

    /// Get an iterator over the messages.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.0.iter()
    }
}

impl Index<usize> for MessageFeed {
    type Output = Message;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for MessageFeed {
    type Item = Message;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for MessageFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No messages found.")?;
            return Ok(());
        }

        for message in &self.0 {
            let decoded = message.decoded();

            writeln!(
                f,
                "## {}. {} ({})",
                message.id,
                message.author,
                LocalDateTime(&message.created_at)
            )?;
            writeln!(f)?;

            if !decoded.text.is_empty() {
                writeln!(f, "{}", decoded.text)?;
            }
            if let Some(payload) = decoded.payload() {
                match &payload.target_date {
                    Some(date) => writeln!(f, "*Plan attached (target {date})*")?,
                    None => writeln!(f, "*Plan attached*")?,
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
