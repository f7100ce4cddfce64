//! HTTP vector index client
//!
//! Call-through to a Pinecone-style REST surface: `POST /query` for
//! nearest-neighbor search and `POST /vectors/upsert` for writes.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::DomainError;
use crate::domain::vector_index::{VectorIndex, VectorMatch, VectorQuery};

/// Configuration for the HTTP vector index client
#[derive(Clone)]
pub struct HttpVectorIndexConfig {
    /// Base URL of the index host
    pub base_url: String,
    /// Index name, for logging and diagnostics
    pub index_name: String,
    /// API key sent in the `Api-Key` header
    pub api_key: String,
    /// Request timeout
    pub timeout: Duration,
}

impl fmt::Debug for HttpVectorIndexConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpVectorIndexConfig")
            .field("base_url", &self.base_url)
            .field("index_name", &self.index_name)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HttpVectorIndexConfig {
    /// Creates a configuration for the given host and index
    pub fn new(
        base_url: impl Into<String>,
        index_name: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            index_name: index_name.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequestBody {
    vector: Vec<f32>,
    top_k: usize,
    include_metadata: bool,
    include_values: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct QueryResponseBody {
    #[serde(default)]
    matches: Vec<VectorMatch>,
}

#[derive(Debug, Serialize)]
struct UpsertVector {
    id: String,
    values: Vec<f32>,
    metadata: Value,
}

#[derive(Debug, Serialize)]
struct UpsertRequestBody {
    vectors: Vec<UpsertVector>,
}

/// Vector index backed by a Pinecone-style HTTP API
#[derive(Debug, Clone)]
pub struct HttpVectorIndex {
    client: reqwest::Client,
    config: HttpVectorIndexConfig,
}

impl HttpVectorIndex {
    /// Creates a client from configuration
    pub fn new(config: HttpVectorIndexConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, DomainError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .header("Api-Key", &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| DomainError::provider("vector-index", format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(DomainError::provider(
                "vector-index",
                format!("HTTP {}: {}", status, error_body),
            ));
        }

        Ok(response)
    }
}

#[async_trait]
impl VectorIndex for HttpVectorIndex {
    async fn query(&self, query: VectorQuery) -> Result<Vec<VectorMatch>, DomainError> {
        let body = QueryRequestBody {
            vector: query.vector,
            top_k: query.top_k,
            include_metadata: query.include_metadata,
            include_values: query.include_values,
            filter: query.filter,
        };

        let response = self.post_json("query", &body).await?;

        let parsed: QueryResponseBody = response.json().await.map_err(|e| {
            DomainError::provider("vector-index", format!("Failed to parse response: {}", e))
        })?;

        Ok(parsed.matches)
    }

    async fn upsert(
        &self,
        id: &str,
        vector: Vec<f32>,
        metadata: Value,
    ) -> Result<(), DomainError> {
        let body = UpsertRequestBody {
            vectors: vec![UpsertVector {
                id: id.to_string(),
                values: vector,
                metadata,
            }],
        };

        self.post_json("vectors/upsert", &body).await?;

        Ok(())
    }

    fn index_name(&self) -> &str {
        &self.config.index_name
    }
}
