//! HTTP embedding provider
//!
//! Call-through to an external embedding inference server exposing a
//! text-embeddings-inference style `POST /embed` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::DomainError;
use crate::domain::embedding::EmbeddingProvider;

/// Configuration for the HTTP embedding provider
#[derive(Debug, Clone)]
pub struct HttpEmbeddingConfig {
    /// Base URL of the inference server
    pub base_url: String,
    /// Expected vector dimensionality
    pub dimensions: usize,
    /// Request timeout
    pub timeout: Duration,
}

impl HttpEmbeddingConfig {
    /// Creates a configuration with the 384-dimension default deployment
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            dimensions: 384,
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the expected dimensionality
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Sets the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct EmbedRequestBody<'a> {
    inputs: &'a str,
}

/// Embedding provider backed by an HTTP inference server
#[derive(Debug, Clone)]
pub struct HttpEmbeddingProvider {
    client: reqwest::Client,
    config: HttpEmbeddingConfig,
}

impl HttpEmbeddingProvider {
    /// Creates a provider from configuration
    pub fn new(config: HttpEmbeddingConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/embed", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(&EmbedRequestBody { inputs: text })
            .send()
            .await
            .map_err(|e| DomainError::provider("embedding", format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(DomainError::provider(
                "embedding",
                format!("HTTP {}: {}", status, error_body),
            ));
        }

        // The server returns one vector per input; we always send one input.
        let mut vectors: Vec<Vec<f32>> = response.json().await.map_err(|e| {
            DomainError::provider("embedding", format!("Failed to parse response: {}", e))
        })?;

        if vectors.is_empty() {
            return Err(DomainError::provider(
                "embedding",
                "Server returned no embeddings",
            ));
        }
        let vector = vectors.swap_remove(0);

        if vector.len() != self.config.dimensions {
            return Err(DomainError::provider(
                "embedding",
                format!(
                    "Expected {} dimensions, got {}",
                    self.config.dimensions,
                    vector.len()
                ),
            ));
        }

        Ok(vector)
    }

    fn provider_name(&self) -> &'static str {
        "http-embedding"
    }

    fn dimensions(&self) -> usize {
        self.config.dimensions
    }
}
