//! Wire types for the HTTP API

pub mod error;
pub mod json;
pub mod search;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
pub use search::{BrowseQuery, SearchRequest};
