use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{Cache, CacheEntry, Producer};

/// In-process cache with one TTL for all entries.
///
/// Expiry is checked lazily on read; there is no background sweep and no size bound. The map lock is
/// never held while the producer runs, so two concurrent misses on the same key both run their
/// producer and the later write wins.
pub struct LocalCache<T> {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry<T>>>,
}

impl<T> LocalCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl<T: Clone> LocalCache<T> {
    /// Fresh value for `key`, or `None` on a miss or expired entry.
    async fn lookup(&self, key: &str) -> Option<T> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            None => {
                debug!(key, "LocalCache: cache miss");
                None
            }
            Some(entry) if entry.is_expired() => {
                debug!(key, age = ?entry.age(), ttl = ?entry.ttl(), "LocalCache: cache expired");
                None
            }
            Some(entry) => {
                debug!(key, age = ?entry.age(), ttl = ?entry.ttl(), "LocalCache: cache hit");
                Some(entry.value().clone())
            }
        }
    }
}

#[async_trait]
impl<T, E> Cache<T, E> for LocalCache<T>
where
    T: Clone + Send + Sync + 'static,
    E: Send + 'static,
{
    async fn get_or_compute(&self, key: &str, producer: Producer<'_, T, E>) -> Result<T, E> {
        if let Some(value) = self.lookup(key).await {
            return Ok(value);
        }

        // A failed producer leaves any previous entry in place.
        let value = producer.await?;
        self.entries
            .write()
            .await
            .insert(key.to_string(), CacheEntry::new(value.clone(), self.ttl));
        Ok(value)
    }

    async fn clear(&self, key: &str) {
        if self.entries.write().await.remove(key).is_some() {
            debug!(key, "LocalCache: entry cleared");
        }
    }
}
