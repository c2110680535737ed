//! Handlers for logging and sender filtering.

use async_trait::async_trait;
use ddbot_core::{Handler, HandlerResponse, Message, Result};
use tracing::{debug, info, instrument};

/// Logs each message in before() and the response in after(); always continues.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = message.user_id(),
            chat_id = message.chat.id,
            username = %message
                .user
                .as_ref()
                .and_then(|u| u.username.as_deref())
                .unwrap_or("unknown"),
            message_content = %message.content,
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        debug!(
            message_id = ?message.id,
            response = ?response,
            "Processed message"
        );
        Ok(())
    }
}

/// Stops the chain for messages without a sender or sent by a bot.
pub struct HumanOnlyHandler;

#[async_trait]
impl Handler for HumanOnlyHandler {
    async fn before(&self, message: &Message) -> Result<bool> {
        match &message.user {
            None => {
                debug!(chat_id = message.chat.id, "Message has no sender, ignoring");
                Ok(false)
            }
            Some(user) if user.is_bot => {
                debug!(user_id = user.id, "Message sent by a bot, ignoring");
                Ok(false)
            }
            Some(_) => Ok(true),
        }
    }
}
