use crate::common::{TestClient, TestStateBuilder};
use axum::http::StatusCode;

#[tokio::test]
async fn test_health() {
    let client = TestClient::with_state(TestStateBuilder::new().build());

    let response = client.get("/health").await;
    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route() {
    let client = TestClient::with_state(TestStateBuilder::new().build());

    let response = client.get("/v1/attempts").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "The requested resource was not found");
}

#[tokio::test]
async fn test_evaluate_requires_post() {
    let client = TestClient::with_state(TestStateBuilder::new().build());

    let response = client.get("/v1/scoring/read-aloud/evaluate").await;
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}
