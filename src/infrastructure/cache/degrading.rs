//! Fail-open cache wrapper
//!
//! The cache backend is a pure performance optimization: its total
//! unavailability must be invisible to the end user, observable only as
//! latency and log volume. This wrapper turns every backend failure into a
//! typed miss/no-op so callers make that degradation decision explicitly
//! instead of relying on blanket error suppression.

use std::sync::Arc;
use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::domain::cache::{Cache, CacheExt};

/// Default time-to-live for cached entries
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Outcome of a degraded cache lookup
///
/// Backend errors and undecodable payloads both surface as `Miss`; callers
/// fall through to live computation either way.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup<V> {
    Hit(V),
    Miss,
}

impl<V> CacheLookup<V> {
    /// Returns true for a hit
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }

    /// Converts to an Option, discarding the miss/hit distinction
    pub fn into_option(self) -> Option<V> {
        match self {
            Self::Hit(value) => Some(value),
            Self::Miss => None,
        }
    }
}

/// Outcome of a degraded cache write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheWrite {
    /// The backend accepted the write
    Stored,
    /// The backend was unreachable; the next request recomputes
    Skipped,
}

/// Cache wrapper that degrades to miss/no-op on any backend failure
#[derive(Debug, Clone)]
pub struct DegradingCache {
    inner: Arc<dyn Cache>,
    default_ttl: Duration,
}

impl DegradingCache {
    /// Wraps a cache backend with the default TTL
    pub fn new(inner: Arc<dyn Cache>) -> Self {
        Self::with_default_ttl(inner, DEFAULT_CACHE_TTL)
    }

    /// Wraps a cache backend with a custom default TTL
    pub fn with_default_ttl(inner: Arc<dyn Cache>, default_ttl: Duration) -> Self {
        Self { inner, default_ttl }
    }

    /// Get the default TTL applied by [`DegradingCache::set`]
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Looks up a typed value; never fails.
    pub async fn get<V>(&self, key: &str) -> CacheLookup<V>
    where
        V: DeserializeOwned + Send,
    {
        match self.inner.get(key).await {
            Ok(Some(value)) => CacheLookup::Hit(value),
            Ok(None) => CacheLookup::Miss,
            Err(e) => {
                warn!(key = %key, error = %e, "Cache GET failed, treating as miss");
                CacheLookup::Miss
            }
        }
    }

    /// Stores a typed value under the default TTL; never fails.
    pub async fn set<V>(&self, key: &str, value: &V) -> CacheWrite
    where
        V: Serialize + Send + Sync,
    {
        self.set_with_ttl(key, value, self.default_ttl).await
    }

    /// Stores a typed value under an explicit TTL; never fails.
    pub async fn set_with_ttl<V>(&self, key: &str, value: &V, ttl: Duration) -> CacheWrite
    where
        V: Serialize + Send + Sync,
    {
        match self.inner.set(key, value, ttl).await {
            Ok(()) => CacheWrite::Stored,
            Err(e) => {
                warn!(key = %key, error = %e, "Cache SET failed, skipping write");
                CacheWrite::Skipped
            }
        }
    }

    /// Probes the backend; used by the readiness check.
    pub async fn is_reachable(&self) -> bool {
        self.inner.get_raw("health:probe").await.is_ok()
    }

    /// The wrapped backend, for operations that must observe real errors
    /// (the rate limiter applies its own fail-open policy).
    pub fn backend(&self) -> Arc<dyn Cache> {
        self.inner.clone()
    }
}
