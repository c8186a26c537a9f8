//! Core library for the Daymark messaging application.
//!
//! This crate provides the business logic for a small chat-style message
//! log in which a structured day plan can ride along inside a message.
//! The payload codec ([`codec`]) embeds a plan (and an optional target
//! date) between fixed literal markers appended to the message text, and
//! recovers it tolerantly on display: content with no block, a dangling
//! start marker, an unparsable interior, or a pre-date legacy block
//! always decodes to clean, renderable text.
//!
//! Around the codec sit the message domain model ([`models`]), a
//! SQLite-backed store ([`db`]), the [`Messenger`] coordinator, and
//! Display-based formatting ([`display`]) so every interface renders the
//! same markdown.
//!
//! # Quick Start
//!
//! ```rust
//! use daymark_core::{params::PostMessage, MessengerBuilder};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a messenger instance
//! let messenger = MessengerBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! // Post a message carrying a plan
//! let params = PostMessage {
//!     content: "Here is your plan:".to_string(),
//!     author: Some("assistant".to_string()),
//!     plan: Some(json!({"tasks": ["Write report", "Review PRs"]})),
//!     target_date: Some("2024-06-01".to_string()),
//! };
//! let message = messenger.post_message(&params).await?;
//!
//! // Decode for display: clean text plus the recovered payload
//! let decoded = message.decoded();
//! println!("{}", decoded.text);
//! if let Some(payload) = decoded.payload() {
//!     println!("plan targets {:?}", payload.target_date);
//! }
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod db;
pub mod display;
pub mod error;
pub mod messenger;
pub mod models;
pub mod params;

// Re-export commonly used types
pub use codec::{
    DecodedMessage, MalformedBlock, PayloadBlock, PlanPayload, PLAN_END_MARKER, PLAN_START_MARKER,
};
pub use db::Database;
pub use display::{MessageFeed, OperationStatus, PostResult, UpdateResult};
pub use error::{MessengerError, Result};
pub use messenger::{Messenger, MessengerBuilder};
pub use models::{Author, Message};
pub use params::{DeleteMessage, EditMessage, Id, ListMessages, PostMessage};
