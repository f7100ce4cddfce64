//! Semantic search endpoint handler

use axum::extract::State;
use tracing::info;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, SearchRequest};
use crate::infrastructure::services::SearchResponse;

/// POST /search
///
/// Embeds the query, retrieves nearest neighbors and returns the node/link
/// graph. Served from cache when an equivalent query is still fresh.
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let request_id = Uuid::new_v4();

    info!(
        request_id = %request_id,
        query = %request.query,
        top_k = ?request.top_k,
        "Processing search request"
    );

    let response = state
        .search_service
        .search(&request.query, request.top_k)
        .await?;

    info!(
        request_id = %request_id,
        total_results = response.total_results,
        cached = response.cached,
        "Search request complete"
    );

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use crate::api::router::create_router;
    use crate::api::state::test_support::TestStateBuilder;
    use crate::domain::vector_index::{MockVectorIndex, VectorMatch};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn sample_match(id: &str, vector: Vec<f32>) -> VectorMatch {
        VectorMatch {
            id: id.to_string(),
            score: 0.9,
            metadata: json!({"title": format!("Movie {}", id)}),
            values: Some(vector),
        }
    }

    fn search_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/search")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_search_returns_nodes_and_links() {
        let state = TestStateBuilder::new()
            .with_index(MockVectorIndex::new().with_matches(vec![
                sample_match("1", vec![1.0, 0.0, 0.0]),
                sample_match("2", vec![1.0, 0.0, 0.0]),
            ]))
            .build();
        let app = create_router(state);

        let response = app
            .oneshot(search_request(json!({"query": "sad robots"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["query"], "sad robots");
        assert_eq!(body["totalResults"], 2);
        assert_eq!(body["cached"], false);
        assert_eq!(body["nodes"].as_array().unwrap().len(), 2);
        assert_eq!(body["links"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_empty_query_is_400() {
        let state = TestStateBuilder::new().build();
        let app = create_router(state);

        let response = app
            .oneshot(search_request(json!({"query": "   "})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["type"], "invalid_request_error");
    }

    #[tokio::test]
    async fn test_search_upstream_failure_is_500() {
        let state = TestStateBuilder::new()
            .with_index(MockVectorIndex::new().with_error("index offline"))
            .build();
        let app = create_router(state);

        let response = app
            .oneshot(search_request(json!({"query": "sad robots"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"]["type"], "server_error");
        assert!(body["error"]["message"].as_str().unwrap().contains("index"));
    }

    #[tokio::test]
    async fn test_search_malformed_body_is_json_error() {
        let state = TestStateBuilder::new().build();
        let app = create_router(state);

        let request = Request::builder()
            .method("POST")
            .uri("/search")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["type"], "invalid_request_error");
    }

    #[tokio::test]
    async fn test_search_rate_limited_after_threshold() {
        use crate::infrastructure::rate_limit::RateLimiterConfig;
        use std::time::Duration;

        let state = TestStateBuilder::new()
            .with_index(
                MockVectorIndex::new().with_matches(vec![sample_match("1", vec![1.0, 0.0, 0.0])]),
            )
            .with_rate_limit(RateLimiterConfig {
                max_requests: 2,
                window: Duration::from_secs(60),
            })
            .build();
        let app = create_router(state);

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(search_request(json!({"query": "sad robots"})))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .oneshot(search_request(json!({"query": "sad robots"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        let body = body_json(response).await;
        assert_eq!(body["error"]["type"], "rate_limit_error");
    }
}
