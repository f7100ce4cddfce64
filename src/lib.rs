//! Nebula API
//!
//! A semantic search engine for movies: free-text queries are embedded into
//! vectors, matched against a hosted nearest-neighbor index and returned as
//! a ranked list plus a cosine-similarity graph for visualization. A
//! fail-open cache and rate limiter sit in front; both degrade silently
//! when their shared backend is down.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use domain::movie::MovieRepository;
use infrastructure::cache::{CacheConfig, CacheFactory, CacheType, DegradingCache, InMemoryCache};
use infrastructure::embedding::{HttpEmbeddingConfig, HttpEmbeddingProvider};
use infrastructure::movie::{InMemoryMovieRepository, PostgresMovieRepository};
use infrastructure::rate_limit::{FixedWindowRateLimiter, RateLimiterConfig};
use infrastructure::services::{CatalogService, SearchConfig, SearchService, check_dimensions};
use infrastructure::vector_index::{HttpVectorIndex, HttpVectorIndexConfig};
use tracing::{info, warn};

/// Create the application state with all services initialized.
///
/// Collaborators are constructed here and injected explicitly; request
/// handlers never read ambient global state.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let cache_backend = create_cache_backend(config).await;
    let cache = DegradingCache::with_default_ttl(
        cache_backend.clone(),
        Duration::from_secs(config.cache.ttl_secs),
    );

    let embedding = Arc::new(HttpEmbeddingProvider::new(
        HttpEmbeddingConfig::new(&config.embedding.url)
            .with_dimensions(config.embedding.dimensions)
            .with_timeout(Duration::from_secs(config.embedding.timeout_secs)),
    )?);

    let index = Arc::new(HttpVectorIndex::new(
        HttpVectorIndexConfig::new(
            &config.vector_index.url,
            &config.vector_index.index_name,
            &config.vector_index.api_key,
        )
        .with_timeout(Duration::from_secs(config.vector_index.timeout_secs)),
    )?);

    info!(
        index = %config.vector_index.index_name,
        embedding_url = %config.embedding.url,
        "Collaborator clients initialized"
    );

    let search_config = SearchConfig {
        default_top_k: config.search.default_top_k,
        max_top_k: config.search.max_top_k,
        cache_ttl: Duration::from_secs(config.cache.ttl_secs),
        graph_offload_threshold: config.search.graph_offload_threshold,
        graph_sample_size: config.search.graph_sample_size,
        similarity_threshold: config.search.similarity_threshold,
        dimensions: config.embedding.dimensions,
    };
    check_dimensions(&search_config, embedding.as_ref());

    let search_service = Arc::new(SearchService::new(
        embedding,
        index,
        cache.clone(),
        search_config,
    ));

    let repository = create_movie_repository(config).await?;
    let catalog_service = Arc::new(CatalogService::new(repository));

    let rate_limiter = Arc::new(FixedWindowRateLimiter::with_config(
        cache_backend,
        RateLimiterConfig {
            max_requests: config.rate_limit.max_requests,
            window: Duration::from_secs(config.rate_limit.window_secs),
        },
    ));

    Ok(AppState::new(
        search_service,
        catalog_service,
        rate_limiter,
        cache,
    ))
}

/// Builds the shared key-value store backend.
///
/// A Redis backend that cannot be reached at startup falls back to an
/// in-memory cache with a warning: the store is an optimization and must
/// never keep the service from coming up.
async fn create_cache_backend(config: &AppConfig) -> Arc<dyn domain::Cache> {
    let cache_type: CacheType = match config.cache.backend.parse() {
        Ok(cache_type) => cache_type,
        Err(e) => {
            warn!(error = %e, "Invalid cache backend, using in-memory");
            CacheType::InMemory
        }
    };

    let mut cache_config = CacheConfig {
        cache_type,
        redis_url: config.cache.redis_url.clone(),
        key_prefix: None,
        default_ttl: Duration::from_secs(config.cache.ttl_secs),
        max_capacity: 10_000,
    };
    cache_config = cache_config.with_key_prefix(config.cache.key_prefix.clone());

    match CacheFactory::create(&cache_config).await {
        Ok(backend) => {
            info!(backend = %cache_config.cache_type, "Cache backend initialized");
            backend
        }
        Err(e) => {
            warn!(
                error = %e,
                "Cache backend unavailable at startup, falling back to in-memory"
            );
            Arc::new(InMemoryCache::new())
        }
    }
}

/// Connects the relational movie mirror when configured, otherwise serves
/// an empty in-memory catalog so the process still comes up without a
/// database.
async fn create_movie_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn MovieRepository>> {
    match &config.database.url {
        Some(url) => {
            info!("Connecting to PostgreSQL...");
            let pool = sqlx::PgPool::connect(url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
            info!("PostgreSQL connection established");

            Ok(Arc::new(PostgresMovieRepository::new(pool)))
        }
        None => {
            warn!("No database configured, browse endpoint serves an empty catalog");
            Ok(Arc::new(InMemoryMovieRepository::new()))
        }
    }
}
