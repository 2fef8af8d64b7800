//! Single-slot TTL cache.
//!
//! [`TtlCache`] memoizes exactly one resource (e.g. the hero stats list).
//! There is no key space: each provider client owns one instance per
//! cacheable resource.
//!
//! # Refresh policy
//!
//! Refresh is lazy. A read that observes a missing or expired entry calls
//! the fetcher once; on success the slot is replaced wholesale, on failure
//! the slot is left exactly as it was and the error goes to the caller.
//! Stale data is never served in place of a failed fetch.
//!
//! # Concurrency
//!
//! The lock is held only while reading or writing the slot, never across the
//! upstream call. Two tasks that miss at the same time both fetch; the later
//! completion overwrites the earlier one. Payloads are immutable snapshots
//! behind an `Arc`, so the overwrite is not observable beyond its timestamp.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::Result;
use crate::telemetry;

/// The cached payload and when it was fetched.
///
/// `payload` is `None` until the first successful fetch.
#[derive(Debug)]
pub struct CacheEntry<T> {
    pub payload: Option<Arc<T>>,
    pub fetched_at: Instant,
}

impl<T> CacheEntry<T> {
    fn empty() -> Self {
        Self {
            payload: None,
            fetched_at: Instant::now(),
        }
    }

    /// The payload, if present and younger than `ttl`.
    fn fresh(&self, ttl: Duration) -> Option<Arc<T>> {
        let payload = self.payload.as_ref()?;
        (self.fetched_at.elapsed() < ttl).then(|| Arc::clone(payload))
    }
}

/// Lazily refreshed single-slot cache with a fixed time-to-live.
#[derive(Debug)]
pub struct TtlCache<T> {
    resource: &'static str,
    ttl: Duration,
    entry: RwLock<CacheEntry<T>>,
}

impl<T> TtlCache<T> {
    /// Create an empty cache for `resource` (used as a metrics label).
    pub fn new(resource: &'static str, ttl: Duration) -> Self {
        Self {
            resource,
            ttl,
            entry: RwLock::new(CacheEntry::empty()),
        }
    }

    /// Time-to-live of cached payloads.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached payload if fresh, otherwise fetch and store it.
    ///
    /// A fresh hit returns the same `Arc` that was stored, without calling
    /// `fetch`. Fetch errors propagate and leave the slot untouched.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(hit) = self.peek().await {
            metrics::counter!(telemetry::CACHE_HITS_TOTAL, "resource" => self.resource)
                .increment(1);
            return Ok(hit);
        }

        metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "resource" => self.resource)
            .increment(1);
        debug!(resource = self.resource, "cache miss, fetching");

        let payload = Arc::new(fetch().await?);
        let mut entry = self.entry.write().await;
        *entry = CacheEntry {
            payload: Some(Arc::clone(&payload)),
            fetched_at: Instant::now(),
        };
        Ok(payload)
    }

    /// The cached payload if it is still fresh. Never fetches.
    pub async fn peek(&self) -> Option<Arc<T>> {
        self.entry.read().await.fresh(self.ttl)
    }

    /// Drop the cached payload so the next read refetches.
    pub async fn invalidate(&self) {
        *self.entry.write().await = CacheEntry::empty();
    }
}
