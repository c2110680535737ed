//! DnD Beyond character source and cache settings.

use anyhow::Result;
use std::env;
use std::time::Duration;

use super::env_flag;

#[derive(Debug, Clone)]
pub struct CharacterConfig {
    /// DDB_BASE_URL
    pub ddb_base_url: String,
    /// CHARACTER_CACHE_TTL_SECONDS
    pub cache_ttl_seconds: u64,
    /// CHARACTER_CACHE_ENABLED
    pub cache_enabled: bool,
}

impl CharacterConfig {
    pub fn from_env() -> Self {
        Self {
            ddb_base_url: env::var("DDB_BASE_URL")
                .unwrap_or_else(|_| character::DDB_API_BASE.to_string()),
            cache_ttl_seconds: env::var("CHARACTER_CACHE_TTL_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600),
            cache_enabled: env_flag("CHARACTER_CACHE_ENABLED", true),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    pub fn validate(&self) -> Result<()> {
        if reqwest::Url::parse(&self.ddb_base_url).is_err() {
            anyhow::bail!("DDB_BASE_URL is not a valid URL: {}", self.ddb_base_url);
        }
        Ok(())
    }
}
