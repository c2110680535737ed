//! BotConfig: every config section. Use load() for env-based loading.

use anyhow::Result;

use super::{BaseConfig, CharacterConfig, ContextStoreConfig, ProfileConfig, ServerConfig};

/// Full bot config. Use BotConfig::load() for env-based loading, then validate().
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub profile: ProfileConfig,
    pub context: ContextStoreConfig,
    pub character: CharacterConfig,
    pub server: ServerConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    pub fn load(token: Option<String>) -> Result<Self> {
        Ok(Self {
            base: BaseConfig::load(token)?,
            profile: ProfileConfig::from_env(),
            context: ContextStoreConfig::from_env(),
            character: CharacterConfig::from_env(),
            server: ServerConfig::from_env(),
        })
    }

    /// Validate config. Call after load() to fail fast before anything is built.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.context.validate()?;
        self.character.validate()?;
        self.server.validate()
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
}
