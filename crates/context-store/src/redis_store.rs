//! Redis-backed context store.
//!
//! Each context is a JSON string under `context:{key}`, written without expiry.

use std::sync::Arc;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::{Context, ContextError, ContextRepository};

const KEY_PREFIX: &str = "context:";

/// Context store over a shared Redis connection manager.
///
/// The manager reconnects on its own after a dropped connection. [`ContextRepository::close`]
/// takes it out for every clone, so later calls fail with [`ContextError::Closed`].
#[derive(Clone)]
pub struct RedisContextRepository {
    conn: Arc<RwLock<Option<ConnectionManager>>>,
}

impl RedisContextRepository {
    /// Opens a connection manager for `redis_url` (`redis://host:port/db`).
    pub async fn connect(redis_url: &str) -> Result<Self, ContextError> {
        info!(redis_url = %redis_url, "Connecting to Redis context store");
        let client = redis::Client::open(redis_url)?;
        let conn = client.get_connection_manager().await?;
        Ok(Self {
            conn: Arc::new(RwLock::new(Some(conn))),
        })
    }

    /// Round-trips a `PING`; used as a startup check.
    pub async fn ping(&self) -> Result<(), ContextError> {
        let mut conn = self.connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        debug!("Redis context store answered PING");
        Ok(())
    }

    async fn connection(&self) -> Result<ConnectionManager, ContextError> {
        self.conn.read().await.clone().ok_or(ContextError::Closed)
    }

    fn redis_key(key: &str) -> String {
        format!("{KEY_PREFIX}{key}")
    }
}

#[async_trait]
impl ContextRepository for RedisContextRepository {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<Context>, ContextError> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = conn.get(Self::redis_key(key)).await?;
        match raw {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn set(&self, key: &str, context: &Context) -> Result<(), ContextError> {
        let body = serde_json::to_string(context)?;
        let mut conn = self.connection().await?;
        let _: () = conn.set(Self::redis_key(key), body).await?;
        Ok(())
    }

    /// Drops the shared manager. Its connection closes once in-flight calls release their clones.
    async fn close(&self) -> Result<(), ContextError> {
        if self.conn.write().await.take().is_some() {
            info!("Redis context store closed");
        }
        Ok(())
    }
}
