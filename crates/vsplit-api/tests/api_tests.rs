//! Router-level tests for the transport layer.
//!
//! These exercise the auth gate, validation, and error shaping without a
//! storage backend: the state is built with storage unconfigured, so any
//! request that gets past validation fails with a configuration error.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use vsplit_api::{create_router, ApiConfig, AppState};

const TEST_KEY: &str = "test-secret";

fn test_app() -> axum::Router {
    // Storage stays unconfigured so no request can reach a real backend.
    std::env::remove_var("STORAGE_ENDPOINT_URL");

    let config = ApiConfig {
        api_key: Some(TEST_KEY.to_string()),
        ..ApiConfig::default()
    };
    create_router(AppState::new(config))
}

fn segment_request(api_key: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/segment")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoint_needs_no_auth() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_missing_api_key_is_forbidden() {
    let app = test_app();

    let response = app
        .oneshot(segment_request(
            None,
            json!({"bucket": "videos", "path": "talk.webm"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("API key"));
}

#[tokio::test]
async fn test_wrong_api_key_is_forbidden() {
    let app = test_app();

    let response = app
        .oneshot(segment_request(
            Some("wrong"),
            json!({"bucket": "videos", "path": "talk.webm"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_auth_is_checked_before_body_parsing() {
    let app = test_app();

    // Body is not even valid JSON; the gate must reject first.
    let request = Request::builder()
        .method("POST")
        .uri("/segment")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_missing_bucket_is_bad_request() {
    let app = test_app();

    let response = app
        .oneshot(segment_request(
            Some(TEST_KEY),
            json!({"path": "talk.webm"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("bucket"));
}

#[tokio::test]
async fn test_missing_path_is_bad_request() {
    let app = test_app();

    let response = app
        .oneshot(segment_request(
            Some(TEST_KEY),
            json!({"bucket": "videos"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("path"));
}

#[tokio::test]
async fn test_zero_duration_is_bad_request() {
    let app = test_app();

    let response = app
        .oneshot(segment_request(
            Some(TEST_KEY),
            json!({"bucket": "videos", "path": "talk.webm", "segmentDuration": 0}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unconfigured_storage_is_internal_error() {
    let app = test_app();

    let response = app
        .oneshot(segment_request(
            Some(TEST_KEY),
            json!({"bucket": "videos", "path": "talk.webm"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("storage backend not configured"));
}
