use async_trait::async_trait;
use tracing::debug;

use crate::{Cache, Producer};

/// Null-object cache: awaits the producer on every call and keeps no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl NoCache {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl<T, E> Cache<T, E> for NoCache
where
    T: Send + 'static,
    E: Send + 'static,
{
    async fn get_or_compute(&self, key: &str, producer: Producer<'_, T, E>) -> Result<T, E> {
        debug!(key, "NoCache: computing");
        producer.await
    }

    async fn clear(&self, _key: &str) {}
}
