//! Bot abstraction for sending replies.
//!
//! [`Bot`] is transport-agnostic; the teloxide implementation lives in the `ddbot` crate.

use crate::error::{DbotError, Result};
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// Abstraction for sending messages. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a plain text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends text already escaped for Telegram MarkdownV2 to the given chat.
    async fn send_markdown_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Replies to the given message (same chat, quoting it) with plain text.
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Replies to the given message with text already escaped for Telegram MarkdownV2.
    async fn reply_markdown_to(&self, message: &Message, text: &str) -> Result<()>;
}

/// Parses a message id string into an i32 (Telegram message ids are 32-bit).
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| DbotError::Bot(format!("Invalid message_id: {}", s)))
}
