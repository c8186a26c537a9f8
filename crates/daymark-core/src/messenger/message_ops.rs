//! Message operations for the Messenger.

use tokio::task;

use super::Messenger;
use crate::{
    codec,
    db::Database,
    error::{MessengerError, Result},
    models::Message,
    params::{EditMessage, Id, ListMessages, PostMessage},
};

impl Messenger {
    /// Posts a new message, embedding an attached plan when one is
    /// supplied.
    ///
    /// Parameters are validated first: the author string must parse, a
    /// target date requires a plan, and a supplied date must be a real
    /// `YYYY-MM-DD` calendar date. Embedding goes through the payload
    /// codec; callers never hand-build marker blocks.
    pub async fn post_message(&self, params: &PostMessage) -> Result<Message> {
        let author = params.validate()?;

        let content = match &params.plan {
            Some(plan) => codec::encode(&params.content, plan, params.target_date.as_deref())?,
            None => params.content.clone(),
        };

        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.insert_message(author, &content)
        })
        .await
        .map_err(|e| MessengerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a message by its ID.
    pub async fn get_message(&self, params: &Id) -> Result<Option<Message>> {
        let db_path = self.db_path.clone();
        let message_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_message(message_id)
        })
        .await
        .map_err(|e| MessengerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists messages, newest first, honoring the author filter and
    /// limit.
    pub async fn list_messages(&self, params: &ListMessages) -> Result<Vec<Message>> {
        let author = params.validate()?;
        let limit = params.limit;

        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_messages(author, limit)
        })
        .await
        .map_err(|e| MessengerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Replaces a message's content.
    ///
    /// Returns the updated message, or None if the message doesn't exist.
    /// Editing destroys any payload embedded in the previous content.
    pub async fn edit_message(&self, params: &EditMessage) -> Result<Option<Message>> {
        let db_path = self.db_path.clone();
        let message_id = params.id;
        let content = params.content.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.update_message_content(message_id, &content)
        })
        .await
        .map_err(|e| MessengerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Permanently deletes a message by ID.
    pub(crate) async fn delete_message_by_id(&self, params: &Id) -> Result<()> {
        let db_path = self.db_path.clone();
        let message_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_message(message_id)
        })
        .await
        .map_err(|e| MessengerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
