//! Catalog browse endpoint handler

use axum::extract::{Query, State};

use crate::api::state::AppState;
use crate::api::types::{ApiError, BrowseQuery, Json};
use crate::infrastructure::services::BrowseResponse;

/// GET /movies
///
/// Paginated, filtered listing over the relational movie mirror.
pub async fn browse(
    State(state): State<AppState>,
    Query(query): Query<BrowseQuery>,
) -> Result<Json<BrowseResponse>, ApiError> {
    let (filter, page, limit) = query.into_filter();

    let response = state.catalog_service.browse(&filter, page, limit).await?;

    Ok(Json(response))
}
