//! Semantic search orchestration
//!
//! Drives the per-request pipeline: cache check, embed, index query,
//! similarity graph build, response assembly, detached cache write. The
//! cache is consulted and written through [`DegradingCache`], so a dead
//! backend only costs latency, never correctness.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::cache::{embedding_key, search_key};
use crate::domain::graph::{DEFAULT_SIMILARITY_THRESHOLD, SimilarityEdge, SimilarityGraphBuilder};
use crate::domain::movie::MovieNode;
use crate::domain::vector_index::{VectorIndex, VectorQuery};
use crate::domain::{DomainError, EmbeddingProvider};
use crate::infrastructure::cache::{CacheLookup, DegradingCache};

/// Tuning knobs for the search pipeline
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Result count when the request does not specify one
    pub default_top_k: usize,
    /// Upper bound on `top_k`; bounds the quadratic graph computation
    pub max_top_k: usize,
    /// TTL for cached search responses
    pub cache_ttl: Duration,
    /// Node count at which graph building moves to a blocking worker thread
    pub graph_offload_threshold: usize,
    /// Nodes fetched by the initial-graph probe
    pub graph_sample_size: usize,
    /// Similarity threshold for emitting an edge
    pub similarity_threshold: f32,
    /// Embedding dimensionality of the deployment
    pub dimensions: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_top_k: 20,
            max_top_k: 100,
            cache_ttl: Duration::from_secs(3600),
            graph_offload_threshold: 10,
            graph_sample_size: 100,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            dimensions: 384,
        }
    }
}

/// Assembled search response; also the payload cached under the query key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub nodes: Vec<MovieNode>,
    pub links: Vec<SimilarityEdge>,
    pub query: String,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    pub cached: bool,
}

/// Node/link payload for the initial visualization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphResponse {
    pub nodes: Vec<MovieNode>,
    pub links: Vec<SimilarityEdge>,
}

/// Orchestrates a search request across cache, embedding model and index
#[derive(Debug, Clone)]
pub struct SearchService {
    embedding: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    cache: DegradingCache,
    graph_builder: SimilarityGraphBuilder,
    config: SearchConfig,
}

impl SearchService {
    /// Creates the service with injected collaborators
    pub fn new(
        embedding: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
        cache: DegradingCache,
        config: SearchConfig,
    ) -> Self {
        let graph_builder = SimilarityGraphBuilder::new(config.similarity_threshold);

        Self {
            embedding,
            index,
            cache,
            graph_builder,
            config,
        }
    }

    /// Runs a search for `query`, returning up to `top_k` nodes plus the
    /// similarity links between them.
    ///
    /// On a cache hit no collaborator is called. On a miss the response is
    /// computed live and a detached task writes it back; the caller never
    /// waits on that write.
    pub async fn search(
        &self,
        query: &str,
        top_k: Option<usize>,
    ) -> Result<SearchResponse, DomainError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Query cannot be empty"));
        }

        let top_k = top_k.unwrap_or(self.config.default_top_k);
        if top_k == 0 || top_k > self.config.max_top_k {
            return Err(DomainError::validation(format!(
                "top_k must be between 1 and {}",
                self.config.max_top_k
            )));
        }

        let key = search_key(query);

        if let CacheLookup::Hit(mut response) = self.cache.get::<SearchResponse>(&key).await {
            debug!(query = %trimmed, "Search served from cache");
            response.cached = true;
            return Ok(response);
        }

        let vector = self.embedding.embed(trimmed).await?;

        let matches = self
            .index
            .query(VectorQuery::new(vector, top_k).with_values())
            .await?;

        let nodes: Vec<MovieNode> = matches.iter().map(MovieNode::from_match).collect();
        let links = self.build_links(&nodes).await?;

        let response = SearchResponse {
            total_results: nodes.len(),
            nodes,
            links,
            query: query.to_string(),
            cached: false,
        };

        self.schedule_cache_write(key, response.clone());

        Ok(response)
    }

    /// Fetches a spread of nodes to seed the visualization.
    ///
    /// The index has no "get all", so a constant probe vector stands in for
    /// a random sample. The result is cached under the probe vector's key
    /// (the embedding-derived cache family, separate from query-text keys).
    pub async fn initial_graph(&self) -> Result<GraphResponse, DomainError> {
        let probe = vec![0.1; self.config.dimensions];
        let key = embedding_key(&probe);

        if let CacheLookup::Hit(response) = self.cache.get::<GraphResponse>(&key).await {
            debug!("Initial graph served from cache");
            return Ok(response);
        }

        let matches = self
            .index
            .query(VectorQuery::new(probe, self.config.graph_sample_size).with_values())
            .await?;

        let nodes: Vec<MovieNode> = matches.iter().map(MovieNode::from_match).collect();
        let links = self.build_links(&nodes).await?;

        let response = GraphResponse { nodes, links };
        self.schedule_cache_write(key, response.clone());

        Ok(response)
    }

    /// Computes similarity links, offloading the quadratic loop to a
    /// blocking worker thread once the node count is large enough to
    /// matter.
    async fn build_links(&self, nodes: &[MovieNode]) -> Result<Vec<SimilarityEdge>, DomainError> {
        let pairs: Vec<(String, Vec<f32>)> = nodes
            .iter()
            .filter(|n| !n.vector.is_empty())
            .map(|n| (n.id.clone(), n.vector.clone()))
            .collect();

        if pairs.len() < self.config.graph_offload_threshold {
            return self.graph_builder.build(&pairs);
        }

        let builder = self.graph_builder.clone();
        tokio::task::spawn_blocking(move || builder.build(&pairs))
            .await
            .map_err(|e| DomainError::internal(format!("Graph worker failed: {}", e)))?
    }

    /// Spawns the fire-and-forget cache write.
    ///
    /// The task has no return channel and may outlive the request; a failed
    /// write is logged by the degrading cache and never retried.
    fn schedule_cache_write<V>(&self, key: String, response: V)
    where
        V: serde::Serialize + Send + Sync + 'static,
    {
        let cache = self.cache.clone();
        let ttl = self.config.cache_ttl;

        tokio::spawn(async move {
            let outcome = cache.set_with_ttl(&key, &response, ttl).await;
            debug!(key = %key, ?outcome, "Background cache write finished");
        });
    }
}

/// Warns when the configured dimensionality disagrees with the provider's.
pub fn check_dimensions(config: &SearchConfig, provider: &dyn EmbeddingProvider) {
    if provider.dimensions() != config.dimensions {
        warn!(
            configured = config.dimensions,
            provider = provider.dimensions(),
            "Embedding dimensionality mismatch between config and provider"
        );
    }
}
