//! Vector index query and match types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameters for a nearest-neighbor query
#[derive(Debug, Clone)]
pub struct VectorQuery {
    /// The query vector
    pub vector: Vec<f32>,
    /// Number of neighbors to return
    pub top_k: usize,
    /// Optional metadata filter document
    pub filter: Option<Value>,
    /// Whether to return stored metadata with each match
    pub include_metadata: bool,
    /// Whether to return the raw stored vectors with each match
    pub include_values: bool,
}

impl VectorQuery {
    /// Creates a query returning metadata but not raw vectors
    pub fn new(vector: Vec<f32>, top_k: usize) -> Self {
        Self {
            vector,
            top_k,
            filter: None,
            include_metadata: true,
            include_values: false,
        }
    }

    /// Requests the raw stored vectors alongside each match
    pub fn with_values(mut self) -> Self {
        self.include_values = true;
        self
    }

    /// Sets a metadata filter document
    pub fn with_filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// A single ranked match returned by the index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorMatch {
    /// Stable identifier of the stored vector
    pub id: String,
    /// Relevance score assigned by the index
    pub score: f32,
    /// Stored metadata, if requested
    #[serde(default)]
    pub metadata: Value,
    /// Raw stored vector, if requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f32>>,
}

impl VectorMatch {
    /// Reads a string metadata field, if present
    pub fn metadata_str(&self, field: &str) -> Option<&str> {
        self.metadata.get(field).and_then(Value::as_str)
    }

    /// Reads a numeric metadata field, if present
    pub fn metadata_f64(&self, field: &str) -> Option<f64> {
        self.metadata.get(field).and_then(Value::as_f64)
    }
}
