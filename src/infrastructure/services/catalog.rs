//! Movie catalog browsing service

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::domain::movie::{BrowseFilter, MovieRepository, MovieSummary};

/// Pagination policy for the browse endpoint
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Page size when the request does not specify one
    pub default_limit: u32,
    /// Upper bound on the page size
    pub max_limit: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
        }
    }
}

/// One page of the catalog, as returned to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseResponse {
    pub movies: Vec<MovieSummary>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

/// Serves paginated, filtered views over the relational movie mirror
#[derive(Debug, Clone)]
pub struct CatalogService {
    repository: Arc<dyn MovieRepository>,
    config: CatalogConfig,
}

impl CatalogService {
    /// Creates the service with an injected repository
    pub fn new(repository: Arc<dyn MovieRepository>) -> Self {
        Self::with_config(repository, CatalogConfig::default())
    }

    /// Creates the service with a custom pagination policy
    pub fn with_config(repository: Arc<dyn MovieRepository>, config: CatalogConfig) -> Self {
        Self { repository, config }
    }

    /// Returns one page of the catalog.
    ///
    /// `page` is 1-based; out-of-range pagination parameters are rejected
    /// before the repository is consulted.
    pub async fn browse(
        &self,
        filter: &BrowseFilter,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<BrowseResponse, DomainError> {
        let page = page.unwrap_or(1);
        if page == 0 {
            return Err(DomainError::validation("page must be at least 1"));
        }

        let limit = limit.unwrap_or(self.config.default_limit);
        if limit == 0 || limit > self.config.max_limit {
            return Err(DomainError::validation(format!(
                "limit must be between 1 and {}",
                self.config.max_limit
            )));
        }

        let result = self.repository.browse(filter, page, limit).await?;
        let has_more = u64::from(page) * u64::from(limit) < result.total;

        Ok(BrowseResponse {
            movies: result.movies,
            total: result.total,
            page,
            limit,
            has_more,
        })
    }
}
