//! Startup steps that resolve the bot's identity and sync its public profile with Telegram.
//!
//! Each sync step reads the current value first and only writes when it differs.

use anyhow::{Context as _, Result};
use ddbot_core::BotCommand;
use lifecycle::LifecycleStep;
use teloxide::payloads::setters::*;
use teloxide::prelude::*;
use tracing::{debug, info};

use crate::handlers::BotUsername;

/// Stores the bot's `@username` for command addressing and readiness.
pub fn resolve_username_step(bot: teloxide::Bot, bot_username: BotUsername) -> LifecycleStep {
    LifecycleStep::new(
        move || resolve_username(bot, bot_username),
        "Telegram bot username has been resolved",
        "Failed to resolve telegram bot username",
    )
}

pub fn sync_name_step(bot: teloxide::Bot, name: String) -> LifecycleStep {
    LifecycleStep::new(
        move || sync_name(bot, name),
        "Telegram bot name has been set",
        "Failed to set telegram bot name",
    )
}

pub fn sync_description_step(bot: teloxide::Bot, description: String) -> LifecycleStep {
    LifecycleStep::new(
        move || sync_description(bot, description),
        "Telegram bot description has been set",
        "Failed to set telegram bot description",
    )
}

pub fn sync_short_description_step(
    bot: teloxide::Bot,
    short_description: String,
) -> LifecycleStep {
    LifecycleStep::new(
        move || sync_short_description(bot, short_description),
        "Telegram bot short description has been set",
        "Failed to set telegram bot short description",
    )
}

/// Registers `commands` in order, unless Telegram already has exactly that list.
pub fn sync_commands_step(bot: teloxide::Bot, commands: Vec<BotCommand>) -> LifecycleStep {
    LifecycleStep::new(
        move || sync_commands(bot, commands),
        "Telegram bot commands have been set",
        "Failed to set telegram bot commands",
    )
}

async fn resolve_username(bot: teloxide::Bot, bot_username: BotUsername) -> Result<()> {
    let me = bot.get_me().await.context("get_me failed")?;
    let username = me.username().to_string();
    info!(username = %username, "Bot username resolved");
    *bot_username.write().await = Some(username);
    Ok(())
}

async fn sync_name(bot: teloxide::Bot, name: String) -> Result<()> {
    if bot.get_my_name().await?.name == name {
        debug!("Bot name is up to date");
        return Ok(());
    }
    bot.set_my_name().name(name).await?;
    Ok(())
}

async fn sync_description(bot: teloxide::Bot, description: String) -> Result<()> {
    if bot.get_my_description().await?.description == description {
        debug!("Bot description is up to date");
        return Ok(());
    }
    bot.set_my_description().description(description).await?;
    Ok(())
}

async fn sync_short_description(bot: teloxide::Bot, short_description: String) -> Result<()> {
    if bot.get_my_short_description().await?.short_description == short_description {
        debug!("Bot short description is up to date");
        return Ok(());
    }
    bot.set_my_short_description()
        .short_description(short_description)
        .await?;
    Ok(())
}

async fn sync_commands(bot: teloxide::Bot, commands: Vec<BotCommand>) -> Result<()> {
    let current = bot.get_my_commands().await?;
    if !commands_differ(&current, &commands) {
        debug!(count = commands.len(), "Bot commands are up to date");
        return Ok(());
    }

    let commands: Vec<_> = commands
        .into_iter()
        .map(|c| teloxide::types::BotCommand::new(c.command, c.description))
        .collect();
    info!(count = commands.len(), "Registering bot commands");
    bot.set_my_commands(commands).await?;
    Ok(())
}

fn commands_differ(current: &[teloxide::types::BotCommand], wanted: &[BotCommand]) -> bool {
    current.len() != wanted.len()
        || current.iter().zip(wanted).any(|(c, w)| {
            (c.command.as_str(), c.description.as_str())
                != (w.command.as_str(), w.description.as_str())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_differ() {
        let wanted = vec![
            BotCommand::new("help", "Show help message"),
            BotCommand::new("str_check", "Strength check"),
        ];
        let same = vec![
            teloxide::types::BotCommand::new("help", "Show help message"),
            teloxide::types::BotCommand::new("str_check", "Strength check"),
        ];
        assert!(!commands_differ(&same, &wanted));
        assert!(commands_differ(&same[..1], &wanted));
        assert!(commands_differ(&[], &wanted));

        let reordered = vec![same[1].clone(), same[0].clone()];
        assert!(commands_differ(&reordered, &wanted));
    }
}
