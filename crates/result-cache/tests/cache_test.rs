//! Integration tests for [`result_cache::LocalCache`] and [`result_cache::NoCache`].
//!
//! Time is paused (`start_paused`) and moved with `tokio::time::advance`, so TTL checks are exact.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use result_cache::{Cache, LocalCache, NoCache, Producer};

#[derive(Debug, PartialEq, Eq)]
struct FetchError(&'static str);

/// Producer that counts how many times it was actually polled and yields `value`.
fn counting(calls: &Arc<AtomicUsize>, value: &'static str) -> Producer<'static, String, FetchError> {
    let calls = calls.clone();
    Box::pin(async move {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(value.to_string())
    })
}

fn failing(calls: &Arc<AtomicUsize>) -> Producer<'static, String, FetchError> {
    let calls = calls.clone();
    Box::pin(async move {
        calls.fetch_add(1, Ordering::SeqCst);
        Err(FetchError("upstream down"))
    })
}

fn local_cache(ttl_secs: u64) -> Arc<dyn Cache<String, FetchError>> {
    Arc::new(LocalCache::<String>::new(Duration::from_secs(ttl_secs)))
}

/// **Test: First request for an unseen key runs the producer exactly once.**
#[tokio::test(start_paused = true)]
async fn test_miss_invokes_producer_once() {
    let cache = local_cache(60);
    let calls = Arc::new(AtomicUsize::new(0));

    let value = cache.get_or_compute("42", counting(&calls, "a")).await.unwrap();

    assert_eq!(value, "a");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

fn delayed(calls: &Arc<AtomicUsize>, value: &'static str, delay_secs: u64) -> Producer<'static, String, FetchError> {
    let calls = calls.clone();
    Box::pin(async move {
        calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        Ok(value.to_string())
    })
}

/// **Test: Concurrent misses on one key both compute; the later write wins.**
///
/// **Setup:** empty cache; producer `a` finishes after 2s, producer `b` after 1s.
/// **Action:** both `get_or_compute("42", ..)` calls run together.
/// **Expected:** each caller gets its own value, both producers ran, the stored entry is `a`.
#[tokio::test(start_paused = true)]
async fn test_concurrent_misses_last_write_wins() {
    let cache = local_cache(60);
    let calls = Arc::new(AtomicUsize::new(0));

    let (a, b) = tokio::join!(
        cache.get_or_compute("42", delayed(&calls, "a", 2)),
        cache.get_or_compute("42", delayed(&calls, "b", 1)),
    );

    assert_eq!(a.unwrap(), "a");
    assert_eq!(b.unwrap(), "b");
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    let unused = Arc::new(AtomicUsize::new(0));
    let stored = cache.get_or_compute("42", counting(&unused, "c")).await.unwrap();
    assert_eq!(stored, "a");
    assert_eq!(unused.load(Ordering::SeqCst), 0);
}

/// **Test: Fresh entry is returned without polling the new producer.**
#[tokio::test(start_paused = true)]
async fn test_hit_skips_producer() {
    let cache = local_cache(60);
    let calls_a = Arc::new(AtomicUsize::new(0));
    let calls_b = Arc::new(AtomicUsize::new(0));

    cache.get_or_compute("42", counting(&calls_a, "a")).await.unwrap();
    let value = cache.get_or_compute("42", counting(&calls_b, "b")).await.unwrap();

    assert_eq!(value, "a");
    assert_eq!(calls_a.load(Ordering::SeqCst), 1);
    assert_eq!(calls_b.load(Ordering::SeqCst), 0);
}

/// **Test: TTL scenario: t=0 fetch A, t=30 still A, t=61 fetch B.**
///
/// **Setup:** ttl = 60s.
/// **Expected:** fetchB is not run at t=30; at t=61 its fresh result is returned.
#[tokio::test(start_paused = true)]
async fn test_ttl_scenario() {
    let cache = local_cache(60);
    let calls_a = Arc::new(AtomicUsize::new(0));
    let calls_b = Arc::new(AtomicUsize::new(0));

    assert_eq!(cache.get_or_compute("42", counting(&calls_a, "a")).await.unwrap(), "a");

    tokio::time::advance(Duration::from_secs(30)).await;
    assert_eq!(cache.get_or_compute("42", counting(&calls_b, "b")).await.unwrap(), "a");
    assert_eq!(calls_b.load(Ordering::SeqCst), 0);

    tokio::time::advance(Duration::from_secs(31)).await;
    assert_eq!(cache.get_or_compute("42", counting(&calls_b, "b")).await.unwrap(), "b");
    assert_eq!(calls_a.load(Ordering::SeqCst), 1);
    assert_eq!(calls_b.load(Ordering::SeqCst), 1);
}

/// **Test: clear followed by get always recomputes.**
#[tokio::test(start_paused = true)]
async fn test_clear_forces_recompute() {
    let cache = local_cache(60);
    let calls = Arc::new(AtomicUsize::new(0));

    cache.get_or_compute("42", counting(&calls, "a")).await.unwrap();
    cache.clear("42").await;
    let value = cache.get_or_compute("42", counting(&calls, "b")).await.unwrap();

    assert_eq!(value, "b");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

/// **Test: clear of an unknown key is a no-op.**
#[tokio::test]
async fn test_clear_unknown_key() {
    let cache = LocalCache::<String>::new(Duration::from_secs(60));
    Cache::<String, FetchError>::clear(&cache, "missing").await;
    assert!(cache.is_empty().await);
}

/// **Test: Producer failure on a miss surfaces the error and stores nothing.**
#[tokio::test(start_paused = true)]
async fn test_failure_on_miss_is_not_cached() {
    let cache = LocalCache::<String>::new(Duration::from_secs(60));
    let calls = Arc::new(AtomicUsize::new(0));

    let err = cache.get_or_compute("42", failing(&calls)).await.unwrap_err();
    assert_eq!(err, FetchError("upstream down"));
    assert!(cache.is_empty().await);

    let value = cache.get_or_compute("42", counting(&calls, "a")).await.unwrap();
    assert_eq!(value, "a");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

/// **Test: Failed refresh of an expired entry leaves the old entry in place and retries next time.**
#[tokio::test(start_paused = true)]
async fn test_failure_on_expiry_keeps_old_entry() {
    let cache = LocalCache::<String>::new(Duration::from_secs(60));
    let calls = Arc::new(AtomicUsize::new(0));

    cache.get_or_compute("42", counting(&calls, "a")).await.unwrap();
    tokio::time::advance(Duration::from_secs(61)).await;

    let err = cache.get_or_compute("42", failing(&calls)).await.unwrap_err();
    assert_eq!(err, FetchError("upstream down"));
    assert_eq!(cache.len().await, 1);

    // Still expired, so the next call runs its producer again.
    let value = cache.get_or_compute("42", counting(&calls, "b")).await.unwrap();
    assert_eq!(value, "b");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

/// **Test: Keys are independent.**
#[tokio::test(start_paused = true)]
async fn test_keys_are_independent() {
    let cache = local_cache(60);
    let calls = Arc::new(AtomicUsize::new(0));

    assert_eq!(cache.get_or_compute("1", counting(&calls, "one")).await.unwrap(), "one");
    assert_eq!(cache.get_or_compute("2", counting(&calls, "two")).await.unwrap(), "two");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

/// **Test: NoCache runs the producer on every call.**
#[tokio::test]
async fn test_no_cache_always_invokes_producer() {
    let cache: Arc<dyn Cache<String, FetchError>> = Arc::new(NoCache::new());
    let calls = Arc::new(AtomicUsize::new(0));

    assert_eq!(cache.get_or_compute("42", counting(&calls, "a")).await.unwrap(), "a");
    assert_eq!(cache.get_or_compute("42", counting(&calls, "b")).await.unwrap(), "b");
    cache.clear("42").await;
    assert_eq!(cache.get_or_compute("42", counting(&calls, "c")).await.unwrap(), "c");

    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

/// **Test: NoCache passes producer errors through.**
#[tokio::test]
async fn test_no_cache_propagates_errors() {
    let cache = NoCache::new();
    let calls = Arc::new(AtomicUsize::new(0));

    let err = cache.get_or_compute("42", failing(&calls)).await.unwrap_err();
    assert_eq!(err, FetchError("upstream down"));
}
