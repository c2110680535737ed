use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{Context, ContextError, ContextRepository};

/// Process-local store; contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryContextRepository {
    contexts: RwLock<HashMap<String, Context>>,
}

impl InMemoryContextRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContextRepository for InMemoryContextRepository {
    async fn get(&self, key: &str) -> Result<Option<Context>, ContextError> {
        Ok(self.contexts.read().await.get(key).copied())
    }

    async fn set(&self, key: &str, context: &Context) -> Result<(), ContextError> {
        self.contexts
            .write()
            .await
            .insert(key.to_string(), *context);
        Ok(())
    }
}
