//! Roll commands: one handler serving every check, save, initiative and death save command.

use std::sync::Arc;

use async_trait::async_trait;
use character::{CharacterService, RollService};
use context_store::{ContextError, ContextService};
use ddbot_core::{Bot, BotCommand, DbotError, Handler, HandlerResponse, Message, Result};
use tracing::{debug, instrument, warn};

use super::{character_fetch_error_reply, parse_command, BotUsername};
use crate::commands::RollCommand;
use crate::messages;

pub struct RollHandler {
    bot: Arc<dyn Bot>,
    bot_username: BotUsername,
    contexts: ContextService,
    characters: Arc<dyn CharacterService>,
    rolls: RollService,
    commands: Vec<RollCommand>,
}

impl RollHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        bot_username: BotUsername,
        contexts: ContextService,
        characters: Arc<dyn CharacterService>,
        rolls: RollService,
        commands: Vec<RollCommand>,
    ) -> Self {
        Self {
            bot,
            bot_username,
            contexts,
            characters,
            rolls,
            commands,
        }
    }
}

#[async_trait]
impl Handler for RollHandler {
    fn commands(&self) -> Vec<BotCommand> {
        self.commands.iter().map(|c| c.command.clone()).collect()
    }

    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(parsed) = parse_command(message, &self.bot_username).await else {
            return Ok(HandlerResponse::Continue);
        };
        let Some(roll) = self.commands.iter().find(|c| parsed.is(&c.command)) else {
            return Ok(HandlerResponse::Continue);
        };
        let Some(context_key) = message.context_key() else {
            return Ok(HandlerResponse::Stop);
        };

        let context = match self.contexts.get(&context_key).await {
            Ok(context) => context,
            Err(ContextError::NotFound(_)) => {
                let text = messages::CHARACTER_FETCH_NOT_SET.to_string();
                self.bot.reply_markdown_to(message, &text).await?;
                return Ok(HandlerResponse::Reply(text));
            }
            Err(e) => return Err(DbotError::Context(e.to_string())),
        };

        let character_id = context.character_id;
        let text = match self.characters.get(character_id).await {
            Ok(character) => {
                let result = self.rolls.roll(&character, roll.kind);
                debug!(
                    command = %roll.command.command,
                    character_id,
                    value = result.value,
                    "Rolled"
                );
                result.to_string()
            }
            Err(e) => {
                warn!(character_id, error = %e, "Failed to fetch character");
                character_fetch_error_reply(&e, character_id)
            }
        };

        self.bot.reply_to(message, &text).await?;
        Ok(HandlerResponse::Reply(text))
    }
}
