//! Cache domain - Generic caching abstraction layer

pub mod key;
mod repository;

pub use key::{embedding_key, rate_limit_key, search_key};
pub use repository::{Cache, CacheExt};

#[cfg(test)]
pub use repository::mock::MockCache;
