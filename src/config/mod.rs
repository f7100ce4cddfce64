//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, CacheSettings, DatabaseSettings, EmbeddingSettings, LogFormat, LoggingConfig,
    RateLimitSettings, SearchSettings, ServerConfig, VectorIndexSettings,
};
