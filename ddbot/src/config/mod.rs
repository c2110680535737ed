//! Bot configuration, loaded from env: base (Telegram + log), profile (name, descriptions, help),
//! context store, character source, health server.

mod base;
mod bot_config;
mod context;
mod ddb;
mod profile;
mod server;

#[cfg(test)]
mod tests;

pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use context::{ContextStoreConfig, ContextStoreKind};
pub use ddb::CharacterConfig;
pub use profile::{ProfileConfig, DEFAULT_HELP_MESSAGE_TEMPLATE};
pub use server::ServerConfig;

/// Reads a boolean env var; anything but `true`/`false` (any case) or `1`/`0` falls back to `default`.
pub(crate) fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name).map(|v| v.trim().to_ascii_lowercase()) {
        Ok(v) if v == "true" || v == "1" => true,
        Ok(v) if v == "false" || v == "0" => false,
        _ => default,
    }
}
