use std::time::Duration;

use tokio::time::Instant;

/// One cached value with its creation time and TTL. Replaced wholesale on refresh.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    value: T,
    created_at: Instant,
    ttl: Duration,
}

impl<T> CacheEntry<T> {
    /// Creates an entry stamped with the current time.
    pub fn new(value: T, ttl: Duration) -> Self {
        Self {
            value,
            created_at: Instant::now(),
            ttl,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Time elapsed since the entry was created.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// Expired iff `age() > ttl` (an entry exactly `ttl` old is still fresh).
    pub fn is_expired(&self) -> bool {
        self.age() > self.ttl
    }
}
