//! # Result cache
//!
//! Key → value cache around an asynchronous producer. [`LocalCache`] keeps each result for a fixed
//! TTL and checks expiry lazily on read; [`NoCache`] always runs the producer and stores nothing, so
//! caching can be switched off without touching call sites.
//!
//! Call sites hold an `Arc<dyn Cache<T, E>>` chosen at construction time. The producer is an
//! unpolled future: on a hit it is dropped without ever running.

mod entry;
mod local;
mod no_cache;

pub use entry::CacheEntry;
pub use local::LocalCache;
pub use no_cache::NoCache;

use async_trait::async_trait;
use futures::future::BoxFuture;

/// Asynchronous producer of a cache value.
pub type Producer<'a, T, E> = BoxFuture<'a, Result<T, E>>;

/// Get-or-compute cache keyed by string.
///
/// Producer errors are passed through unchanged and never cached.
#[async_trait]
pub trait Cache<T, E>: Send + Sync
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Returns the cached value for `key`, or awaits `producer`, stores its result and returns it.
    async fn get_or_compute(&self, key: &str, producer: Producer<'_, T, E>) -> Result<T, E>;

    /// Removes the entry for `key` if present.
    async fn clear(&self, key: &str);
}
