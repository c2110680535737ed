use std::sync::Arc;

use tracing::debug;

use crate::{Context, ContextError, ContextRepository};

/// Front for handlers: a missing context is an error rather than `None`.
#[derive(Clone)]
pub struct ContextService {
    repository: Arc<dyn ContextRepository>,
}

impl ContextService {
    pub fn new(repository: Arc<dyn ContextRepository>) -> Self {
        Self { repository }
    }

    /// Returns [`ContextError::NotFound`] when nothing is stored under `key`.
    pub async fn get(&self, key: &str) -> Result<Context, ContextError> {
        match self.repository.get(key).await? {
            Some(context) => Ok(context),
            None => {
                debug!(key, "Context not found");
                Err(ContextError::NotFound(key.to_string()))
            }
        }
    }

    pub async fn set(&self, key: &str, context: Context) -> Result<(), ContextError> {
        self.repository.set(key, &context).await
    }

    pub async fn close(&self) -> Result<(), ContextError> {
        self.repository.close().await
    }
}
