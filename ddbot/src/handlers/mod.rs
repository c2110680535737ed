//! Bot handlers: middleware-style logging and sender filtering, plus one handler per command family.

mod character_commands;
mod help;
mod logging;
mod roll;

pub use character_commands::{CacheClearHandler, CharacterSetHandler};
pub use help::{escape_markdown, render_help_message, HelpHandler};
pub use logging::{HumanOnlyHandler, LoggingHandler};
pub use roll::RollHandler;

use std::sync::Arc;

use ::character::CharacterError;
use ddbot_core::{Message, ParsedCommand};
use tokio::sync::RwLock;

use crate::messages;

/// Bot username resolved at startup (`get_me`); `None` until then.
pub type BotUsername = Arc<RwLock<Option<String>>>;

/// Parses the message as a command addressed to this bot.
pub(crate) async fn parse_command(message: &Message, bot_username: &BotUsername) -> Option<ParsedCommand> {
    let username = bot_username.read().await;
    ParsedCommand::parse(&message.content, username.as_deref())
}

/// Reply text for a failed character lookup.
pub(crate) fn character_fetch_error_reply(err: &CharacterError, character_id: i64) -> String {
    let template = match err {
        CharacterError::NotFound(_) => messages::CHARACTER_FETCH_NOT_FOUND,
        CharacterError::AccessDenied(_) => messages::CHARACTER_FETCH_NO_ACCESS,
        CharacterError::Repository(_) => messages::CHARACTER_FETCH_UNKNOWN_ERROR,
    };
    messages::with_character_id(template, character_id)
}
