use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::rate_limit;
use super::routes;
use super::state::AppState;

/// Create the application router.
///
/// Search, graph and browse sit behind the rate-limit middleware; health
/// probes do not. CORS is permissive so the visualization frontend can be
/// served from anywhere.
pub fn create_router(state: AppState) -> Router {
    let limited = Router::new()
        .route("/search", post(routes::search::search))
        .route("/graph", get(routes::graph::graph))
        .route("/movies", get(routes::movies::browse))
        .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit));

    Router::new()
        .merge(limited)
        // Health endpoints (never rate limited)
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Add state and middleware
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
