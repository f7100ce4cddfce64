//! Infrastructure layer - Concrete implementations of domain traits

pub mod cache;
pub mod embedding;
pub mod logging;
pub mod movie;
pub mod rate_limit;
pub mod services;
pub mod vector_index;
