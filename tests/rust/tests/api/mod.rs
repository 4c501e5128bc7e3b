//! HTTP API tests driving the full router over an in-memory database.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use testimonia_core::LogLevel;
use testimonia_server::{build_router, AppState, HttpLogConfig};
use testimonia_storage::{Database, SqliteTestimonyRepository};
use tokio::sync::Mutex;
use tower::ServiceExt;

fn app() -> Router {
    let db = Database::open_in_memory().expect("Failed to open in-memory database");
    let state = AppState {
        testimonies: Arc::new(SqliteTestimonyRepository::new(Arc::new(Mutex::new(db)))),
    };
    let log_config = Arc::new(HttpLogConfig {
        development: false,
        threshold: LogLevel::Warn,
    });
    build_router(state, log_config)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_public_submission_creates_new_testimony() {
    let response = app()
        .oneshot(post_json(
            "/api/testimonies/public",
            json!({
                "fullName": "Ada Lovelace",
                "phone": "+1-555-0100",
                "topic": "gratitude"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["fullName"], "Ada Lovelace");
    assert_eq!(json["phone"], "+1-555-0100");
    assert_eq!(json["topic"], "gratitude");
    assert_eq!(json["status"], "NEW");
    assert!(json["id"].as_str().unwrap().parse::<uuid::Uuid>().is_ok());
    assert!(json["createdAt"].is_string());
}

#[tokio::test]
async fn test_submission_then_listing() {
    let app = app();

    let created = app
        .clone()
        .oneshot(post_json(
            "/api/testimonies/public",
            json!({
                "fullName": "Grace Hopper",
                "phone": "+1-555-0101",
                "topic": "healing"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = body_json(created).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/testimonies")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let listed = body_json(response).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], created["id"]);
    assert_eq!(listed[0]["fullName"], "Grace Hopper");
    assert_eq!(listed[0]["status"], "NEW");
}

#[tokio::test]
async fn test_listing_is_empty_before_any_submission() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/testimonies")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_missing_field_is_rejected() {
    let response = app()
        .oneshot(post_json(
            "/api/testimonies/public",
            json!({ "fullName": "No Phone" }),
        ))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_routes_are_nested_under_api_prefix() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/testimonies")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
