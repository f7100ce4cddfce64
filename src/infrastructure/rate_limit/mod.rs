//! Fixed-window rate limiting over the shared key-value store
//!
//! Each client identity gets a counter incremented through the store's
//! atomic INCR+EXPIRE pipeline, so concurrent requests from one client
//! cannot race past the threshold. If the store is unreachable the limiter
//! fails open: availability of the core service never depends on the
//! rate-limiting backend.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::domain::cache::{Cache, rate_limit_key};

/// Default number of requests admitted per window
pub const DEFAULT_MAX_REQUESTS: i64 = 20;

/// Default window length
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Rate limiter policy knobs
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Requests admitted per identity per window
    pub max_requests: i64,
    /// Fixed window length
    pub window: Duration,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            window: DEFAULT_WINDOW,
        }
    }
}

/// Outcome of an admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Admitted,
    Rejected,
}

impl RateLimitDecision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted)
    }
}

/// Fixed-window counter rate limiter
#[derive(Debug, Clone)]
pub struct FixedWindowRateLimiter {
    cache: Arc<dyn Cache>,
    config: RateLimiterConfig,
}

impl FixedWindowRateLimiter {
    /// Creates a limiter with default policy (20 requests / 60 s)
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self::with_config(cache, RateLimiterConfig::default())
    }

    /// Creates a limiter with a custom policy
    pub fn with_config(cache: Arc<dyn Cache>, config: RateLimiterConfig) -> Self {
        Self { cache, config }
    }

    /// Get the configured policy
    pub fn config(&self) -> &RateLimiterConfig {
        &self.config
    }

    /// Checks whether a request from `identity` is admitted.
    ///
    /// One atomic INCR+EXPIRE round trip per call; backend failure admits
    /// the request and logs a warning.
    pub async fn check(&self, identity: &str) -> RateLimitDecision {
        let key = rate_limit_key(identity);

        match self
            .cache
            .increment_with_expiry(&key, 1, self.config.window)
            .await
        {
            Ok(count) if count > self.config.max_requests => RateLimitDecision::Rejected,
            Ok(_) => RateLimitDecision::Admitted,
            Err(e) => {
                warn!(
                    identity = %identity,
                    error = %e,
                    "Rate limiter backend error, failing open"
                );
                RateLimitDecision::Admitted
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::MockCache;

    fn limiter(max_requests: i64) -> FixedWindowRateLimiter {
        FixedWindowRateLimiter::with_config(
            Arc::new(MockCache::new()),
            RateLimiterConfig {
                max_requests,
                window: Duration::from_secs(60),
            },
        )
    }

    #[tokio::test]
    async fn test_admits_up_to_limit() {
        let limiter = limiter(3);

        for _ in 0..3 {
            assert_eq!(limiter.check("1.2.3.4").await, RateLimitDecision::Admitted);
        }

        assert_eq!(limiter.check("1.2.3.4").await, RateLimitDecision::Rejected);
    }

    #[tokio::test]
    async fn test_identities_are_independent() {
        let limiter = limiter(1);

        assert_eq!(limiter.check("1.2.3.4").await, RateLimitDecision::Admitted);
        assert_eq!(limiter.check("1.2.3.4").await, RateLimitDecision::Rejected);
        assert_eq!(limiter.check("5.6.7.8").await, RateLimitDecision::Admitted);
    }

    #[tokio::test]
    async fn test_concurrent_burst_admits_exactly_the_limit() {
        let limiter = Arc::new(FixedWindowRateLimiter::new(Arc::new(MockCache::new())));
        let mut handles = Vec::new();

        // 25 concurrent requests from one client against the 20/window default
        for _ in 0..25 {
            let limiter = limiter.clone();
            handles.push(tokio::spawn(
                async move { limiter.check("1.2.3.4").await },
            ));
        }

        let mut admitted = 0;
        let mut rejected = 0;
        for handle in handles {
            match handle.await.unwrap() {
                RateLimitDecision::Admitted => admitted += 1,
                RateLimitDecision::Rejected => rejected += 1,
            }
        }

        assert_eq!(admitted, 20);
        assert_eq!(rejected, 5);
    }

    #[tokio::test]
    async fn test_fails_open_when_backend_down() {
        let limiter = FixedWindowRateLimiter::with_config(
            Arc::new(MockCache::new().with_error("connection refused")),
            RateLimiterConfig {
                max_requests: 1,
                window: Duration::from_secs(60),
            },
        );

        // Well past the limit, every request is still admitted
        for _ in 0..10 {
            assert_eq!(limiter.check("1.2.3.4").await, RateLimitDecision::Admitted);
        }
    }

    #[tokio::test]
    async fn test_counter_key_is_namespaced() {
        let backend = Arc::new(MockCache::new());
        let limiter = FixedWindowRateLimiter::new(backend.clone());

        limiter.check("1.2.3.4").await;

        assert!(backend.exists("rate:1.2.3.4").await.unwrap());
    }
}
