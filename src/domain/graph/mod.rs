//! Similarity graph domain model
//!
//! Builds the node/link structure the visualization consumes: one edge per
//! unordered pair of result vectors whose cosine similarity clears a
//! threshold.

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::domain::embedding::cosine_similarity;

/// Default similarity threshold above which an edge is emitted
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.5;

/// An edge between two result nodes
///
/// The similarity score is mirrored into both a generic `value` field (node
/// link weight for the renderer) and a semantic `similarity` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityEdge {
    pub source: String,
    pub target: String,
    pub value: f32,
    pub similarity: f32,
}

impl SimilarityEdge {
    fn new(source: impl Into<String>, target: impl Into<String>, similarity: f32) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value: similarity,
            similarity,
        }
    }
}

/// Computes pairwise similarity edges over a set of result vectors
#[derive(Debug, Clone)]
pub struct SimilarityGraphBuilder {
    threshold: f32,
}

impl Default for SimilarityGraphBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SIMILARITY_THRESHOLD)
    }
}

impl SimilarityGraphBuilder {
    /// Creates a builder emitting edges strictly above `threshold`
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Get the configured threshold
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Builds the edge list for the given `(id, vector)` pairs.
    ///
    /// Fewer than two nodes yield an empty edge set. All vectors must share
    /// the same dimensionality; a mismatch is rejected before any pair is
    /// compared. Quadratic in node count, which is why `top_k` is bounded at
    /// the API boundary.
    pub fn build(&self, nodes: &[(String, Vec<f32>)]) -> Result<Vec<SimilarityEdge>, DomainError> {
        if nodes.len() < 2 {
            return Ok(Vec::new());
        }

        let dimensions = nodes[0].1.len();
        for (id, vector) in nodes {
            if vector.len() != dimensions {
                return Err(DomainError::validation(format!(
                    "Vector for node '{}' has {} dimensions, expected {}",
                    id,
                    vector.len(),
                    dimensions
                )));
            }
        }

        let mut edges = Vec::new();

        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                let similarity = cosine_similarity(&nodes[i].1, &nodes[j].1);

                if similarity > self.threshold {
                    edges.push(SimilarityEdge::new(
                        nodes[i].0.clone(),
                        nodes[j].0.clone(),
                        similarity,
                    ));
                }
            }
        }

        Ok(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, vector: Vec<f32>) -> (String, Vec<f32>) {
        (id.to_string(), vector)
    }

    #[test]
    fn test_identical_vectors_yield_one_edge() {
        let builder = SimilarityGraphBuilder::default();
        let nodes = vec![node("a", vec![1.0, 0.0, 0.0]), node("b", vec![1.0, 0.0, 0.0])];

        let edges = builder.build(&nodes).unwrap();

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].source, "a");
        assert_eq!(edges[0].target, "b");
        assert!((edges[0].similarity - 1.0).abs() < 0.001);
        assert_eq!(edges[0].value, edges[0].similarity);
    }

    #[test]
    fn test_orthogonal_vectors_yield_no_edge() {
        let builder = SimilarityGraphBuilder::default();
        let nodes = vec![node("a", vec![1.0, 0.0]), node("b", vec![0.0, 1.0])];

        let edges = builder.build(&nodes).unwrap();

        assert!(edges.is_empty());
    }

    #[test]
    fn test_opposite_vectors_yield_no_edge() {
        let builder = SimilarityGraphBuilder::default();
        let nodes = vec![node("a", vec![1.0, 0.0]), node("b", vec![-1.0, 0.0])];

        let edges = builder.build(&nodes).unwrap();

        assert!(edges.is_empty());
    }

    #[test]
    fn test_empty_input_yields_no_edges() {
        let builder = SimilarityGraphBuilder::default();

        let edges = builder.build(&[]).unwrap();

        assert!(edges.is_empty());
    }

    #[test]
    fn test_single_node_yields_no_edges() {
        let builder = SimilarityGraphBuilder::default();
        let nodes = vec![node("a", vec![1.0, 0.0])];

        let edges = builder.build(&nodes).unwrap();

        assert!(edges.is_empty());
    }

    #[test]
    fn test_one_edge_per_unordered_pair() {
        let builder = SimilarityGraphBuilder::new(0.0);
        let nodes = vec![
            node("a", vec![1.0, 0.1]),
            node("b", vec![1.0, 0.2]),
            node("c", vec![1.0, 0.3]),
        ];

        let edges = builder.build(&nodes).unwrap();

        // 3 choose 2, source index always before target index
        assert_eq!(edges.len(), 3);
        for edge in &edges {
            assert!(edge.source < edge.target);
        }
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let builder = SimilarityGraphBuilder::default();
        let nodes = vec![node("a", vec![1.0, 0.0]), node("b", vec![1.0, 0.0, 0.0])];

        let result = builder.build(&nodes);

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[test]
    fn test_deterministic_for_identical_input() {
        let builder = SimilarityGraphBuilder::default();
        let nodes = vec![
            node("a", vec![1.0, 0.2, 0.1]),
            node("b", vec![0.9, 0.3, 0.0]),
            node("c", vec![0.0, 1.0, 0.0]),
        ];

        let first = builder.build(&nodes).unwrap();
        let second = builder.build(&nodes).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // Similarity exactly at the threshold must not produce an edge.
        let builder = SimilarityGraphBuilder::new(1.0);
        let nodes = vec![node("a", vec![1.0, 0.0]), node("b", vec![2.0, 0.0])];

        let edges = builder.build(&nodes).unwrap();

        assert!(edges.is_empty());
    }
}
