//! /character_set and /character_cache_clear.

use std::sync::Arc;

use async_trait::async_trait;
use character::CharacterService;
use context_store::{Context, ContextError, ContextService};
use ddbot_core::{Bot, BotCommand, DbotError, Handler, HandlerResponse, Message, Result};
use tracing::{info, instrument, warn};

use super::{character_fetch_error_reply, parse_command, BotUsername};
use crate::commands;
use crate::messages;

/// Binds a character to the sender in the current chat after fetching it once.
pub struct CharacterSetHandler {
    bot: Arc<dyn Bot>,
    bot_username: BotUsername,
    contexts: ContextService,
    characters: Arc<dyn CharacterService>,
}

impl CharacterSetHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        bot_username: BotUsername,
        contexts: ContextService,
        characters: Arc<dyn CharacterService>,
    ) -> Self {
        Self {
            bot,
            bot_username,
            contexts,
            characters,
        }
    }

    async fn reply(&self, message: &Message, text: String) -> Result<HandlerResponse> {
        self.bot.reply_to(message, &text).await?;
        Ok(HandlerResponse::Reply(text))
    }
}

#[async_trait]
impl Handler for CharacterSetHandler {
    fn commands(&self) -> Vec<BotCommand> {
        vec![commands::character_set_command()]
    }

    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(command) = parse_command(message, &self.bot_username).await else {
            return Ok(HandlerResponse::Continue);
        };
        if command.name != commands::CHARACTER_SET {
            return Ok(HandlerResponse::Continue);
        }
        let Some(context_key) = message.context_key() else {
            return Ok(HandlerResponse::Stop);
        };

        let Some(args) = command.args else {
            return self.reply(message, messages::CHARACTER_SET_NO_ARGS.to_string()).await;
        };
        let Ok(character_id) = args.parse::<i64>() else {
            return self
                .reply(
                    message,
                    messages::with_character_id(messages::CHARACTER_SET_INVALID_ARGS, &args),
                )
                .await;
        };

        let character = match self.characters.get(character_id).await {
            Ok(character) => character,
            Err(e) => {
                warn!(character_id, error = %e, "Failed to fetch character");
                return self
                    .reply(message, character_fetch_error_reply(&e, character_id))
                    .await;
            }
        };

        self.contexts
            .set(&context_key, Context::new(character.id))
            .await
            .map_err(|e| DbotError::Context(e.to_string()))?;
        info!(
            context_key = %context_key,
            character_id = character.id,
            "Character set"
        );

        self.reply(message, messages::character_set_success(&character.name))
            .await
    }
}

/// Drops the cached copy of the sender's current character.
pub struct CacheClearHandler {
    bot: Arc<dyn Bot>,
    bot_username: BotUsername,
    contexts: ContextService,
    characters: Arc<dyn CharacterService>,
}

impl CacheClearHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        bot_username: BotUsername,
        contexts: ContextService,
        characters: Arc<dyn CharacterService>,
    ) -> Self {
        Self {
            bot,
            bot_username,
            contexts,
            characters,
        }
    }
}

#[async_trait]
impl Handler for CacheClearHandler {
    fn commands(&self) -> Vec<BotCommand> {
        vec![commands::character_cache_clear_command()]
    }

    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(command) = parse_command(message, &self.bot_username).await else {
            return Ok(HandlerResponse::Continue);
        };
        if command.name != commands::CHARACTER_CACHE_CLEAR {
            return Ok(HandlerResponse::Continue);
        }
        let Some(context_key) = message.context_key() else {
            return Ok(HandlerResponse::Stop);
        };

        let context = match self.contexts.get(&context_key).await {
            Ok(context) => context,
            Err(ContextError::NotFound(_)) => {
                let text = messages::CHARACTER_FETCH_NOT_SET.to_string();
                self.bot.reply_to(message, &text).await?;
                return Ok(HandlerResponse::Reply(text));
            }
            Err(e) => return Err(DbotError::Context(e.to_string())),
        };

        self.characters.forget(context.character_id).await;
        info!(character_id = context.character_id, "Character cache cleared");

        let text = messages::CHARACTER_CACHE_CLEAR_SUCCESS.to_string();
        self.bot.reply_to(message, &text).await?;
        Ok(HandlerResponse::Reply(text))
    }
}
