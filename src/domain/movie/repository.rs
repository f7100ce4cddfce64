//! Movie catalog repository trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::DomainError;

/// A row from the relational movie mirror, used by the browse endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: String,
    pub title: String,
    pub year: Option<i32>,
    pub genres: Option<String>,
    pub rating: Option<f32>,
    pub popularity: Option<f32>,
    pub poster: Option<String>,
    pub overview: Option<String>,
}

/// Filters for browsing the catalog
#[derive(Debug, Clone, Default)]
pub struct BrowseFilter {
    /// Substring genre match, e.g. "Action"
    pub genre: Option<String>,
    /// Decade label, e.g. "1990s"
    pub decade: Option<String>,
    /// Minimum rating, inclusive
    pub min_rating: Option<f32>,
    /// Minimum release year, inclusive
    pub min_year: Option<i32>,
}

impl BrowseFilter {
    /// Resolves the decade label into an inclusive `(first, last)` year
    /// range, rejecting anything that is not of the form "1990s".
    pub fn decade_bounds(&self) -> Result<Option<(i32, i32)>, DomainError> {
        let Some(decade) = &self.decade else {
            return Ok(None);
        };

        let digits = decade
            .strip_suffix('s')
            .filter(|d| d.len() == 4)
            .and_then(|d| d.parse::<i32>().ok())
            .filter(|start| start % 10 == 0);

        match digits {
            Some(start) => Ok(Some((start, start + 9))),
            None => Err(DomainError::validation(format!(
                "Invalid decade '{}', expected e.g. '1990s'",
                decade
            ))),
        }
    }
}

/// One page of browse results
#[derive(Debug, Clone)]
pub struct BrowsePage {
    pub movies: Vec<MovieSummary>,
    /// Total rows matching the filter, across all pages
    pub total: u64,
}

/// Trait for the relational movie catalog
#[async_trait]
pub trait MovieRepository: Send + Sync + Debug {
    /// Returns one page of the catalog matching the filter.
    ///
    /// `page` is 1-based; `limit` is the page size.
    async fn browse(
        &self,
        filter: &BrowseFilter,
        page: u32,
        limit: u32,
    ) -> Result<BrowsePage, DomainError>;
}
