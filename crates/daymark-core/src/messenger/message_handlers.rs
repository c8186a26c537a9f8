//! Message handler operations that return formatted wrapper types.

use super::Messenger;
use crate::{
    display::{MessageFeed, PostResult, UpdateResult},
    error::Result,
    models::Message,
    params::{DeleteMessage, EditMessage, Id, ListMessages, PostMessage},
};

impl Messenger {
    /// Handle posting a message, returning a formatted creation result.
    ///
    /// The result records whether a plan was embedded so interfaces can
    /// confirm the attachment without re-decoding the stored content.
    pub async fn post_message_result(&self, params: &PostMessage) -> Result<PostResult> {
        let plan_attached = params.plan.is_some();
        let message = self.post_message(params).await?;
        Ok(PostResult::new(message, plan_attached))
    }

    /// Handle showing a single message.
    ///
    /// Returns the message for display, or None if it doesn't exist.
    /// The message's Display implementation decodes the stored content,
    /// so raw markers never reach a rendering surface.
    pub async fn show_message(&self, params: &Id) -> Result<Option<Message>> {
        self.get_message(params).await
    }

    /// Handle listing messages as a feed.
    ///
    /// Converts stored messages into a feed wrapper that renders each
    /// entry decoded, with a marker line for attached plans.
    pub async fn list_message_feed(&self, params: &ListMessages) -> Result<MessageFeed> {
        let messages = self.list_messages(params).await?;
        Ok(MessageFeed(messages))
    }

    /// Handle editing a message with a formatted update result.
    pub async fn edit_message_result(&self, params: &EditMessage) -> Result<Option<UpdateResult>> {
        let message = self.edit_message(params).await?;
        Ok(message.map(UpdateResult::new))
    }

    /// Handle permanently deleting a message with confirmation.
    ///
    /// Requires explicit confirmation via the `confirmed` field to
    /// prevent accidental deletion. Uses get-before-delete to return the
    /// deleted message for confirmation, or None if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `MessengerError::InvalidInput` if `confirmed` is false
    pub async fn delete_message(&self, params: &DeleteMessage) -> Result<Option<Message>> {
        if !params.confirmed {
            return Err(crate::MessengerError::invalid_input(
                "confirmed",
                "Message deletion requires explicit confirmation. Set 'confirmed' to true to proceed with permanent deletion.",
            ));
        }

        let id_params = Id { id: params.id };
        let message = self.get_message(&id_params).await?;

        if message.is_some() {
            self.delete_message_by_id(&id_params).await?;
        }

        Ok(message)
    }
}
