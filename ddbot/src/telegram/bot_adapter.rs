//! Wraps teloxide::Bot and implements [`ddbot_core::Bot`].

use async_trait::async_trait;
use ddbot_core::{parse_message_id, Bot as CoreBot, Chat, DbotError, Message, Result};
use teloxide::payloads::setters::*;
use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId, ParseMode, ReplyParameters};

/// Thin wrapper around teloxide::Bot that implements ddbot-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }

    async fn send(
        &self,
        chat: &Chat,
        text: &str,
        reply_to: Option<&Message>,
        parse_mode: Option<ParseMode>,
    ) -> Result<()> {
        let mut request = self.bot.send_message(ChatId(chat.id), text.to_string());
        if let Some(message) = reply_to {
            let id = parse_message_id(&message.id)?;
            request = request.reply_parameters(ReplyParameters::new(MessageId(id)));
        }
        if let Some(mode) = parse_mode {
            request = request.parse_mode(mode);
        }
        request
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.send(chat, text, None, None).await
    }

    async fn send_markdown_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.send(chat, text, None, Some(ParseMode::MarkdownV2)).await
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send(&message.chat, text, Some(message), None).await
    }

    async fn reply_markdown_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send(&message.chat, text, Some(message), Some(ParseMode::MarkdownV2))
            .await
    }
}
