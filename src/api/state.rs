//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::cache::DegradingCache;
use crate::infrastructure::rate_limit::FixedWindowRateLimiter;
use crate::infrastructure::services::{CatalogService, SearchService};

/// Shared per-process services, injected into every handler.
///
/// Constructed once at startup by `create_app_state`; no handler reads
/// ambient global state.
#[derive(Clone)]
pub struct AppState {
    pub search_service: Arc<SearchService>,
    pub catalog_service: Arc<CatalogService>,
    pub rate_limiter: Arc<FixedWindowRateLimiter>,
    pub cache: DegradingCache,
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(
        search_service: Arc<SearchService>,
        catalog_service: Arc<CatalogService>,
        rate_limiter: Arc<FixedWindowRateLimiter>,
        cache: DegradingCache,
    ) -> Self {
        Self {
            search_service,
            catalog_service,
            rate_limiter,
            cache,
        }
    }
}
