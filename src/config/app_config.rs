use serde::Deserialize;

/// Application configuration
///
/// Loaded from `config/default`, `config/local` and `APP__`-prefixed
/// environment variables, in that order. Every policy knob the service
/// carries (TTL, rate-limit window, similarity threshold) lives here rather
/// than as a literal in the code that uses it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub cache: CacheSettings,
    pub rate_limit: RateLimitSettings,
    pub search: SearchSettings,
    pub embedding: EmbeddingSettings,
    pub vector_index: VectorIndexSettings,
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Cache backend: "redis" or "in_memory"
    pub backend: String,
    /// Redis connection URL (required when backend = "redis")
    pub redis_url: Option<String>,
    /// Key prefix applied to every cache family
    pub key_prefix: String,
    /// Default TTL for cached search responses, in seconds
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitSettings {
    /// Requests admitted per identity per window
    pub max_requests: i64,
    /// Fixed window length, in seconds
    pub window_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub default_top_k: usize,
    pub max_top_k: usize,
    /// Cosine similarity above which a graph edge is emitted
    pub similarity_threshold: f32,
    /// Node count at which graph building moves to a worker thread
    pub graph_offload_threshold: usize,
    /// Nodes fetched by the initial-graph probe
    pub graph_sample_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Base URL of the embedding inference server
    pub url: String,
    /// Vector dimensionality of the deployed model
    pub dimensions: usize,
    /// Request timeout, in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VectorIndexSettings {
    /// Base URL of the vector index host
    pub url: String,
    /// Index name
    pub index_name: String,
    /// API key; prefer setting via APP__VECTOR_INDEX__API_KEY
    pub api_key: String,
    /// Request timeout, in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// PostgreSQL URL for the relational movie mirror; browse falls back to
    /// an empty in-memory catalog when unset
    pub url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: "in_memory".to_string(),
            redis_url: None,
            key_prefix: "nebula".to_string(),
            ttl_secs: 3600,
        }
    }
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_requests: 20,
            window_secs: 60,
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_top_k: 20,
            max_top_k: 100,
            similarity_threshold: 0.5,
            graph_offload_threshold: 10,
            graph_sample_size: 100,
        }
    }
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8081".to_string(),
            dimensions: 384,
            timeout_secs: 30,
        }
    }
}

impl Default for VectorIndexSettings {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8082".to_string(),
            index_name: "nebula-index".to_string(),
            api_key: String::new(),
            timeout_secs: 30,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
