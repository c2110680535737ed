use async_trait::async_trait;

use crate::{Context, ContextError};

/// Key → [`Context`] storage backend.
#[async_trait]
pub trait ContextRepository: Send + Sync {
    /// Returns `Ok(None)` when nothing is stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<Context>, ContextError>;

    /// Inserts or replaces the context under `key`.
    async fn set(&self, key: &str, context: &Context) -> Result<(), ContextError>;

    /// Releases backend connections. Default is a no-op.
    async fn close(&self) -> Result<(), ContextError> {
        Ok(())
    }
}
