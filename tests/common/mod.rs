#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use companies_api::{config::StorageConfig, create_app, storage::Storage, AppState};
use http_body_util::BodyExt; // For Response body handling
use serde_json::Value;
use std::sync::Once;
use tower::ServiceExt; // For oneshot

// For initializing tracing once
static INIT: Once = Once::new();

pub fn setup() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt::try_init();
    });
}

/// App backed by a fresh in-memory store
pub async fn test_app() -> Router {
    setup();
    let storage = Storage::open(&StorageConfig::in_memory()).await.unwrap();
    storage.init_schema().await.unwrap();
    create_app(AppState::new(storage))
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&body_bytes).into_owned())
        })
    };
    (status, body)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .method("DELETE")
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .method(method)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Creates a company and returns the id parsed from the confirmation message
pub async fn create_company(app: &Router, name: &str, industry: &str, lastinv: &str) -> i64 {
    let (status, body) = send_json(
        app,
        "POST",
        "/companies",
        serde_json::json!({ "name": name, "industry": industry, "lastinv": lastinv }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");

    let message = body["message"].as_str().expect("message");
    message
        .strip_prefix("Company with id ")
        .and_then(|rest| rest.strip_suffix(" created"))
        .and_then(|id| id.parse().ok())
        .unwrap_or_else(|| panic!("unexpected create message: {message}"))
}

pub async fn company_count(app: &Router) -> usize {
    let (status, body) = get(app, "/companies").await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().expect("array").len()
}
