//! /help and /start.

use std::sync::Arc;

use async_trait::async_trait;
use ddbot_core::{Bot, BotCommand, Handler, HandlerResponse, Message, Result};
use tracing::instrument;

use super::{parse_command, BotUsername};
use crate::commands::{self, CommandGroups};

/// Backslash-escapes every character of `text` found in `characters`.
pub fn escape_markdown(text: &str, characters: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if characters.contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn command_lines(commands: &[BotCommand], escape_characters: &str) -> String {
    commands
        .iter()
        .map(|c| {
            escape_markdown(
                &format!("/{} - {}", c.command, c.description),
                escape_characters,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fills the help template's command-list placeholders. Only the generated lines are escaped; the
/// template itself must already be valid MarkdownV2.
pub fn render_help_message(template: &str, groups: &CommandGroups, escape_characters: &str) -> String {
    [
        ("{general_commands}", &groups.general),
        ("{ability_check_commands}", &groups.ability_checks),
        ("{saving_throw_commands}", &groups.saving_throws),
        ("{skill_check_commands}", &groups.skill_checks),
        ("{miscellaneous_check_commands}", &groups.miscellaneous),
    ]
    .into_iter()
    .fold(template.to_string(), |text, (placeholder, commands)| {
        text.replace(placeholder, &command_lines(commands, escape_characters))
    })
}

/// Answers /help and /start with the pre-rendered help text (MarkdownV2).
pub struct HelpHandler {
    bot: Arc<dyn Bot>,
    bot_username: BotUsername,
    text: String,
}

impl HelpHandler {
    pub fn new(bot: Arc<dyn Bot>, bot_username: BotUsername, text: String) -> Self {
        Self {
            bot,
            bot_username,
            text,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[async_trait]
impl Handler for HelpHandler {
    fn commands(&self) -> Vec<BotCommand> {
        commands::help_commands()
    }

    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(command) = parse_command(message, &self.bot_username).await else {
            return Ok(HandlerResponse::Continue);
        };
        if command.name != commands::HELP && command.name != commands::START {
            return Ok(HandlerResponse::Continue);
        }

        self.bot.send_markdown_message(&message.chat, &self.text).await?;
        Ok(HandlerResponse::Reply(self.text.clone()))
    }
}
