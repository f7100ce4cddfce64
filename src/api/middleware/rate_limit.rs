//! Per-client rate limiting middleware

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::infrastructure::rate_limit::RateLimitDecision;

/// Gates a request on the fixed-window limiter.
///
/// A rejection surfaces as HTTP 429 with the typed error body, distinct
/// from internal errors so clients can tell "try again later" from
/// "something broke". Backend failures inside the limiter fail open and
/// never reach this layer.
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let identity = client_identity(&request);

    match state.rate_limiter.check(&identity).await {
        RateLimitDecision::Admitted => next.run(request).await,
        RateLimitDecision::Rejected => {
            ApiError::rate_limited("Too many requests").into_response()
        }
    }
}

/// Resolves the client identity: first X-Forwarded-For hop when present
/// (deployments behind a proxy), else the peer address, else "unknown".
fn client_identity(request: &Request<Body>) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
