//! Cache infrastructure - backends and the fail-open wrapper

mod degrading;
mod factory;
mod in_memory;
mod redis;

pub use degrading::{CacheLookup, CacheWrite, DEFAULT_CACHE_TTL, DegradingCache};
pub use factory::{CacheConfig, CacheFactory, CacheType};
pub use in_memory::{InMemoryCache, InMemoryCacheConfig};
pub use redis::{RedisCache, RedisCacheConfig};
