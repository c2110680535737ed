//! Slash-command model: [`BotCommand`] (what the bot advertises) and [`ParsedCommand`] (what a user sent).

use serde::{Deserialize, Serialize};

/// A command the bot registers with the transport and lists in help.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotCommand {
    /// Command name without the leading slash, e.g. `str_check`.
    pub command: String,
    pub description: String,
}

impl BotCommand {
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
        }
    }
}

/// A slash command extracted from message text: `/name[@bot] [args]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Lower-cased command name without slash or mention.
    pub name: String,
    /// Text after the command, trimmed; `None` when empty.
    pub args: Option<String>,
}

impl ParsedCommand {
    /// Parses `text` as a command. Returns `None` if the text is not a command, or if it is
    /// addressed (`/cmd@other_bot`) to a bot other than `bot_username`.
    pub fn parse(text: &str, bot_username: Option<&str>) -> Option<Self> {
        let text = text.trim_start();
        let rest = text.strip_prefix('/')?;

        let (head, tail) = match rest.split_once(char::is_whitespace) {
            Some((head, tail)) => (head, tail),
            None => (rest, ""),
        };

        let (name, mention) = match head.split_once('@') {
            Some((name, mention)) => (name, Some(mention)),
            None => (head, None),
        };

        if name.is_empty() {
            return None;
        }

        if let (Some(mention), Some(own)) = (mention, bot_username) {
            if !mention.eq_ignore_ascii_case(own.trim_start_matches('@')) {
                return None;
            }
        }

        let args = tail.trim();
        Some(Self {
            name: name.to_lowercase(),
            args: (!args.is_empty()).then(|| args.to_string()),
        })
    }

    /// True when this is the given advertised command.
    pub fn is(&self, command: &BotCommand) -> bool {
        self.name == command.command
    }
}
