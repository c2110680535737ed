//! Context store selection.

use anyhow::Result;
use std::env;
use std::fmt;

/// Backend kinds accepted by CONTEXT_STORE_TYPE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextStoreKind {
    Local,
    Redis,
    Sqlite,
}

impl ContextStoreKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" | "memory" => Some(Self::Local),
            "redis" => Some(Self::Redis),
            "sqlite" => Some(Self::Sqlite),
            _ => None,
        }
    }
}

impl fmt::Display for ContextStoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Local => "local",
            Self::Redis => "redis",
            Self::Sqlite => "sqlite",
        })
    }
}

#[derive(Debug, Clone)]
pub struct ContextStoreConfig {
    /// CONTEXT_STORE_TYPE (local | redis | sqlite)
    pub store_type: String,
    /// REDIS_URL
    pub redis_url: String,
    /// CONTEXT_SQLITE_PATH
    pub sqlite_path: String,
}

impl ContextStoreConfig {
    pub fn from_env() -> Self {
        Self {
            store_type: env::var("CONTEXT_STORE_TYPE").unwrap_or_else(|_| "local".to_string()),
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379/0".to_string()),
            sqlite_path: env::var("CONTEXT_SQLITE_PATH")
                .unwrap_or_else(|_| "./data/contexts.db".to_string()),
        }
    }

    pub fn kind(&self) -> Result<ContextStoreKind> {
        ContextStoreKind::parse(&self.store_type).ok_or_else(|| {
            anyhow::anyhow!(
                "CONTEXT_STORE_TYPE must be one of local, redis, sqlite; got: {}",
                self.store_type
            )
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.kind()? == ContextStoreKind::Redis && reqwest::Url::parse(&self.redis_url).is_err() {
            anyhow::bail!("REDIS_URL is not a valid URL: {}", self.redis_url);
        }
        Ok(())
    }
}
