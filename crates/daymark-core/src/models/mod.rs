//! Data models for chat messages.
//!
//! This module contains the domain types that represent stored messages in
//! the Daymark message log. Display implementations live in
//! [`crate::display::models`] to keep data structures separate from
//! presentation logic.
//!
//! A stored message's `content` is the combined text produced by the
//! payload codec; it may carry an embedded plan block. Consumers never
//! render stored content raw: [`Message::decoded`] is the supported path
//! to display text and the recovered payload.

pub mod author;
pub mod message;


pub use author::Author;
pub use message::Message;
