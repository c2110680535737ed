//! Bot profile shown in Telegram (name, descriptions) and the /help message.

use std::env;

/// Default /help text, Telegram MarkdownV2. Placeholders are replaced by command lists.
pub const DEFAULT_HELP_MESSAGE_TEMPLATE: &str = "*DnD Beyond Character Bot*

Link a public DnD Beyond character with `/character_set <character_id>` and roll with its modifiers\\.

*General*
{general_commands}

*Ability checks*
{ability_check_commands}

*Saving throws*
{saving_throw_commands}

*Skill checks*
{skill_check_commands}

*Other*
{miscellaneous_check_commands}";

#[derive(Debug, Clone)]
pub struct ProfileConfig {
    /// BOT_NAME
    pub bot_name: String,
    /// BOT_DESCRIPTION
    pub bot_description: String,
    /// BOT_SHORT_DESCRIPTION
    pub bot_short_description: String,
    /// HELP_MESSAGE_TEMPLATE
    pub help_message_template: String,
    /// HELP_MESSAGE_ESCAPE_CHARACTERS: characters backslash-escaped in rendered command lists.
    pub help_message_escape_characters: String,
}

impl ProfileConfig {
    pub fn from_env() -> Self {
        let var = |name: &str, default: &str| env::var(name).unwrap_or_else(|_| default.to_string());
        Self {
            bot_name: var("BOT_NAME", "DndBeyond Character Bot"),
            bot_description: var(
                "BOT_DESCRIPTION",
                "Telegram bot for rolling dices using DnD Beyond character sheets",
            ),
            bot_short_description: var("BOT_SHORT_DESCRIPTION", "DndBeyond Character Bot"),
            help_message_template: var("HELP_MESSAGE_TEMPLATE", DEFAULT_HELP_MESSAGE_TEMPLATE),
            help_message_escape_characters: var("HELP_MESSAGE_ESCAPE_CHARACTERS", "_-."),
        }
    }
}
