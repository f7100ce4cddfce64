//! Search result node

use serde::{Deserialize, Serialize};

use crate::domain::vector_index::VectorMatch;

/// A single movie returned by a semantic search
///
/// Produced fresh per query and owned by the response object. The raw
/// embedding vector is carried for similarity-graph computation but never
/// serialized onto the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieNode {
    pub id: String,
    pub title: String,
    pub score: f32,
    pub rating: f32,
    pub popularity: f32,
    pub poster: Option<String>,
    pub overview: Option<String>,
    pub genres: Option<String>,
    pub year: Option<i32>,
    /// Node size hint for the graph renderer
    pub val: f32,
    #[serde(skip)]
    pub vector: Vec<f32>,
}

impl MovieNode {
    /// Builds a node from an index match, reading display metadata with
    /// lenient defaults so a sparse metadata document still renders.
    pub fn from_match(m: &VectorMatch) -> Self {
        Self {
            id: m.id.clone(),
            title: m
                .metadata_str("title")
                .unwrap_or("Unknown")
                .to_string(),
            score: m.score,
            rating: m.metadata_f64("rating").unwrap_or(0.0) as f32,
            popularity: m.metadata_f64("popularity").unwrap_or(0.0) as f32,
            poster: m.metadata_str("poster_path").map(str::to_string),
            overview: m.metadata_str("overview").map(str::to_string),
            genres: m.metadata_str("genres").map(str::to_string),
            year: m.metadata_f64("year").map(|y| y as i32).filter(|y| *y > 0),
            val: 1.0,
            vector: m.values.clone().unwrap_or_default(),
        }
    }
}
