//! In-memory cache implementation using moka

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;
use tokio::sync::Mutex;

use crate::domain::DomainError;
use crate::domain::cache::Cache;

/// Configuration for in-memory cache
#[derive(Debug, Clone)]
pub struct InMemoryCacheConfig {
    /// Maximum number of entries
    pub max_capacity: u64,
    /// Default TTL for entries without explicit TTL
    pub default_ttl: Duration,
}

impl Default for InMemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            default_ttl: Duration::from_secs(3600), // 1 hour
        }
    }
}

impl InMemoryCacheConfig {
    /// Creates a new configuration with specified max capacity
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }

    /// Sets the default TTL
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }
}

/// Cache entry stored in moka
#[derive(Debug, Clone)]
struct CacheEntry {
    /// Serialized JSON value
    data: String,
    /// Expiration timestamp (millis since epoch)
    expires_at: u64,
}

/// Thread-safe in-memory cache implementation using moka
///
/// Used for development and tests so the server runs without Redis.
#[derive(Debug)]
pub struct InMemoryCache {
    cache: MokaCache<String, CacheEntry>,
    // Serializes increment_with_expiry so concurrent callers cannot race
    // past a limit; moka alone has no atomic read-modify-write.
    counter_lock: Mutex<()>,
}

impl InMemoryCache {
    /// Creates a new in-memory cache with default configuration
    pub fn new() -> Self {
        Self::with_config(InMemoryCacheConfig::default())
    }

    /// Creates a new in-memory cache with the given configuration
    pub fn with_config(config: InMemoryCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(config.default_ttl)
            .build();

        Self {
            cache,
            counter_lock: Mutex::new(()),
        }
    }

    fn current_time_millis() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    fn is_expired(entry: &CacheEntry) -> bool {
        Self::current_time_millis() > entry.expires_at
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        match self.cache.get(key).await {
            Some(entry) => {
                if Self::is_expired(&entry) {
                    self.cache.remove(key).await;
                    return Ok(None);
                }

                Ok(Some(entry.data.clone()))
            }
            None => Ok(None),
        }
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
        let expires_at = Self::current_time_millis() + ttl.as_millis() as u64;
        let entry = CacheEntry {
            data: value.to_string(),
            expires_at,
        };

        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn increment_with_expiry(
        &self,
        key: &str,
        delta: i64,
        ttl: Duration,
    ) -> Result<i64, DomainError> {
        let _guard = self.counter_lock.lock().await;

        let current: i64 = match self.cache.get(key).await {
            Some(entry) if !Self::is_expired(&entry) => entry.data.parse().unwrap_or(0),
            _ => 0,
        };

        let new_value = current + delta;
        self.set_raw(key, &new_value.to_string(), ttl).await?;

        Ok(new_value)
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        let existed = self.cache.get(key).await.is_some();
        self.cache.remove(key).await;
        Ok(existed)
    }

    async fn ttl(&self, key: &str) -> Result<Option<Duration>, DomainError> {
        match self.cache.get(key).await {
            Some(entry) => {
                let now = Self::current_time_millis();

                if now > entry.expires_at {
                    return Ok(None);
                }

                Ok(Some(Duration::from_millis(entry.expires_at - now)))
            }
            None => Ok(None),
        }
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }

    async fn size(&self) -> Result<usize, DomainError> {
        self.cache.run_pending_tasks().await;
        Ok(self.cache.entry_count() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::CacheExt;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = InMemoryCache::new();

        cache
            .set("key1", &"value1", Duration::from_secs(60))
            .await
            .unwrap();

        let result: Option<String> = cache.get("key1").await.unwrap();
        assert_eq!(result, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let cache = InMemoryCache::new();

        let result: Option<String> = cache.get("missing").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let cache = InMemoryCache::new();

        cache
            .set_raw("key1", "\"value1\"", Duration::from_millis(1))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(20)).await;

        let result = cache.get_raw("key1").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_overwrite_entry() {
        let cache = InMemoryCache::new();

        cache
            .set("key1", &"first", Duration::from_secs(60))
            .await
            .unwrap();
        cache
            .set("key1", &"second", Duration::from_secs(60))
            .await
            .unwrap();

        let result: Option<String> = cache.get("key1").await.unwrap();
        assert_eq!(result, Some("second".to_string()));
    }

    #[tokio::test]
    async fn test_increment_with_expiry() {
        let cache = InMemoryCache::new();

        for expected in 1..=5 {
            let val = cache
                .increment_with_expiry("counter", 1, Duration::from_secs(60))
                .await
                .unwrap();
            assert_eq!(val, expected);
        }

        let ttl = cache.ttl("counter").await.unwrap();
        assert!(ttl.is_some());
    }

    #[tokio::test]
    async fn test_increment_concurrent_callers() {
        use std::sync::Arc;

        let cache = Arc::new(InMemoryCache::new());
        let mut handles = Vec::new();

        for _ in 0..25 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                cache
                    .increment_with_expiry("counter", 1, Duration::from_secs(60))
                    .await
                    .unwrap()
            }));
        }

        let mut values = Vec::new();
        for handle in handles {
            values.push(handle.await.unwrap());
        }

        // Every caller sees a distinct post-increment value
        values.sort_unstable();
        assert_eq!(values, (1..=25).collect::<Vec<i64>>());
    }

    #[tokio::test]
    async fn test_expired_counter_restarts() {
        let cache = InMemoryCache::new();

        cache
            .increment_with_expiry("counter", 1, Duration::from_millis(1))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(20)).await;

        let val = cache
            .increment_with_expiry("counter", 1, Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(val, 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = InMemoryCache::new();

        cache
            .set("key1", &"value1", Duration::from_secs(60))
            .await
            .unwrap();

        let deleted = cache.delete("key1").await.unwrap();
        assert!(deleted);

        let result: Option<String> = cache.get("key1").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_clear_and_size() {
        let cache = InMemoryCache::new();

        cache
            .set("key1", &"value1", Duration::from_secs(60))
            .await
            .unwrap();
        cache
            .set("key2", &"value2", Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(cache.size().await.unwrap(), 2);

        cache.clear().await.unwrap();

        assert_eq!(cache.size().await.unwrap(), 0);
    }
}
