//! Search and browse request types

use serde::Deserialize;

use crate::domain::movie::BrowseFilter;

/// Body of `POST /search`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    /// Result count; the service applies its default when absent
    pub top_k: Option<usize>,
}

/// Query string of `GET /movies`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrowseQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub genre: Option<String>,
    pub decade: Option<String>,
    /// Minimum rating, inclusive
    pub rating: Option<f32>,
    pub min_year: Option<i32>,
}

impl BrowseQuery {
    /// Splits the query into the repository filter and pagination parts
    pub fn into_filter(self) -> (BrowseFilter, Option<u32>, Option<u32>) {
        let filter = BrowseFilter {
            genre: self.genre,
            decade: self.decade,
            min_rating: self.rating,
            min_year: self.min_year,
        };

        (filter, self.page, self.limit)
    }
}
