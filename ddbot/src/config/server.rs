//! Health server settings.

use anyhow::Result;
use std::env;
use std::net::SocketAddr;

use super::env_flag;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HEALTH_SERVER_ENABLED
    pub enabled: bool,
    /// SERVER_HOST
    pub host: String,
    /// SERVER_PORT
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            enabled: env_flag("HEALTH_SERVER_ENABLED", true),
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("SERVER_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address {}:{}: {}", self.host, self.port, e))
    }

    pub fn validate(&self) -> Result<()> {
        if self.enabled {
            self.bind_addr()?;
        }
        Ok(())
    }
}
