//! Tests for the single-slot TTL cache.
//!
//! Time is paused so expiry is driven with `tokio::time::advance`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use courier::{CourierError, TtlCache};

const TTL: Duration = Duration::from_secs(300);

/// A fetcher that counts its calls and returns the call number.
fn counting_fetch(
    calls: &AtomicU32,
) -> impl std::future::Future<Output = courier::Result<u32>> + '_ {
    async move { Ok(calls.fetch_add(1, Ordering::SeqCst) + 1) }
}

#[tokio::test(start_paused = true)]
async fn fresh_hit_returns_same_arc_without_fetching() {
    let cache = TtlCache::new("test", TTL);
    let calls = AtomicU32::new(0);

    let first = cache.get_or_fetch(|| counting_fetch(&calls)).await.unwrap();
    tokio::time::advance(Duration::from_secs(299)).await;
    let second = cache.get_or_fetch(|| counting_fetch(&calls)).await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn expired_entry_refetches_exactly_once() {
    let cache = TtlCache::new("test", TTL);
    let calls = AtomicU32::new(0);

    cache.get_or_fetch(|| counting_fetch(&calls)).await.unwrap();
    tokio::time::advance(TTL).await;

    let refreshed = cache.get_or_fetch(|| counting_fetch(&calls)).await.unwrap();
    let again = cache.get_or_fetch(|| counting_fetch(&calls)).await.unwrap();

    assert_eq!(*refreshed, 2);
    assert!(Arc::ptr_eq(&refreshed, &again));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn failed_refresh_keeps_previous_entry() {
    let cache = TtlCache::new("test", TTL);
    let first = cache.get_or_fetch(|| async { Ok(1u32) }).await.unwrap();

    tokio::time::advance(TTL).await;
    let err = cache
        .get_or_fetch(|| async { Err(CourierError::Http("connection refused".into())) })
        .await
        .unwrap_err();
    assert!(matches!(err, CourierError::Http(_)));

    // Still expired (timestamp untouched), so the next read fetches again.
    assert!(cache.peek().await.is_none());
    let next = cache.get_or_fetch(|| async { Ok(3u32) }).await.unwrap();
    assert_eq!(*next, 3);
    assert_eq!(*first, 1);
}

#[tokio::test(start_paused = true)]
async fn failed_fetch_propagates_error() {
    let cache: TtlCache<u32> = TtlCache::new("test", TTL);
    let err = cache
        .get_or_fetch(|| async {
            Err(CourierError::Upstream {
                status: 503,
                message: "Service Unavailable".into(),
            })
        })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(503));
}

#[tokio::test(start_paused = true)]
async fn peek_never_fetches() {
    let cache: TtlCache<u32> = TtlCache::new("test", TTL);
    assert!(cache.peek().await.is_none());

    cache.get_or_fetch(|| async { Ok(9) }).await.unwrap();
    assert_eq!(cache.peek().await.as_deref(), Some(&9));
    assert_eq!(cache.ttl(), TTL);
}

#[tokio::test(start_paused = true)]
async fn concurrent_readers_share_fresh_entry() {
    let cache = Arc::new(TtlCache::new("test", TTL));
    let seeded = cache.get_or_fetch(|| async { Ok(42u32) }).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let cache = Arc::clone(&cache);
        handles.push(tokio::spawn(async move {
            cache
                .get_or_fetch(|| async { Ok(0u32) })
                .await
                .unwrap()
        }));
    }
    for handle in handles {
        let value = handle.await.unwrap();
        assert!(Arc::ptr_eq(&value, &seeded));
    }
}
