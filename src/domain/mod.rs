//! Domain layer - Core business logic and entities

pub mod cache;
pub mod embedding;
pub mod error;
pub mod graph;
pub mod movie;
pub mod vector_index;

pub use cache::{Cache, CacheExt};
pub use embedding::{EmbeddingProvider, cosine_similarity};
pub use error::DomainError;
pub use graph::{DEFAULT_SIMILARITY_THRESHOLD, SimilarityEdge, SimilarityGraphBuilder};
pub use movie::{BrowseFilter, BrowsePage, MovieNode, MovieRepository, MovieSummary};
pub use vector_index::{VectorIndex, VectorMatch, VectorQuery};
