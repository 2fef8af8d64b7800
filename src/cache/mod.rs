//! Caching subsystem.
//!
//! Provider clients memoize their list endpoints in a [`TtlCache`]: one
//! instance per cacheable resource, owned by the client that fetches it.
//!
//! - hero stats (`OpenDotaClient`)
//! - now-playing movies (`TmdbClient`)
//!
//! Match details are never cached: each payload is large and asked for once.

pub mod slot;

pub use slot::{CacheEntry, TtlCache};

use std::time::Duration;

/// Default time-to-live for cached list endpoints: five minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);
