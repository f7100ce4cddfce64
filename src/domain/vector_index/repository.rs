//! Vector index trait definition

use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

use super::{VectorMatch, VectorQuery};
use crate::domain::DomainError;

/// Trait for the external vector-index collaborator
#[async_trait]
pub trait VectorIndex: Send + Sync + Debug {
    /// Runs a nearest-neighbor query and returns ranked matches
    async fn query(&self, query: VectorQuery) -> Result<Vec<VectorMatch>, DomainError>;

    /// Inserts or overwrites a vector with its metadata
    async fn upsert(
        &self,
        id: &str,
        vector: Vec<f32>,
        metadata: Value,
    ) -> Result<(), DomainError>;

    /// Get the index name
    fn index_name(&self) -> &str;
}
