//! Initial visualization graph endpoint handler

use axum::extract::State;
use tracing::info;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::infrastructure::services::GraphResponse;

/// GET /graph
///
/// Returns a probe-sampled spread of nodes plus similarity links to seed
/// the 3D graph before the first search.
pub async fn graph(State(state): State<AppState>) -> Result<Json<GraphResponse>, ApiError> {
    let response = state.search_service.initial_graph().await?;

    info!(
        nodes = response.nodes.len(),
        links = response.links.len(),
        "Initial graph request complete"
    );

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use crate::api::router::create_router;
    use crate::api::state::test_support::TestStateBuilder;
    use crate::domain::vector_index::{MockVectorIndex, VectorMatch};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_graph_returns_nodes_and_links() {
        let state = TestStateBuilder::new()
            .with_index(MockVectorIndex::new().with_matches(vec![
                VectorMatch {
                    id: "1".to_string(),
                    score: 0.9,
                    metadata: json!({"title": "Alien"}),
                    values: Some(vec![1.0, 0.0, 0.0]),
                },
                VectorMatch {
                    id: "2".to_string(),
                    score: 0.8,
                    metadata: json!({"title": "Aliens"}),
                    values: Some(vec![0.99, 0.05, 0.0]),
                },
            ]))
            .build();
        let app = create_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/graph")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["nodes"].as_array().unwrap().len(), 2);
        assert_eq!(body["links"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_graph_index_failure_is_500() {
        let state = TestStateBuilder::new()
            .with_index(MockVectorIndex::new().with_error("index offline"))
            .build();
        let app = create_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/graph")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
