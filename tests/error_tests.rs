use axum::{
    http::StatusCode,
    response::IntoResponse,
};
use companies_api::error::AppError;
use http_body_util::BodyExt;
use sea_orm::DbErr;
use serde_json::Value;

async fn error_body(error: AppError) -> (StatusCode, Value) {
    let response = error.into_response();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body_bytes).unwrap())
}

// Test for AppError Display implementation
#[test]
fn test_app_error_display() {
    let error = AppError::Validation("name, industry and lastinv are required".to_string());
    assert_eq!(error.to_string(), "name, industry and lastinv are required");

    let error = AppError::NotFound("Company not found".to_string());
    assert_eq!(error.to_string(), "Company not found");

    let error = AppError::InvalidRequest("expected value".to_string());
    assert_eq!(error.to_string(), "Invalid request: expected value");

    let error = AppError::Database("disk I/O error".to_string());
    assert_eq!(error.to_string(), "Database error: disk I/O error");
}

// Test for AppError IntoResponse implementation
#[tokio::test]
async fn test_app_error_into_response() {
    let (status, body) = error_body(AppError::Validation("missing name".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing name");

    let (status, body) = error_body(AppError::InvalidRequest("bad json".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request: bad json");

    let (status, body) = error_body(AppError::NotFound("Company not found".to_string())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Company not found");
}

#[tokio::test]
async fn test_server_errors_hide_details() {
    let (status, body) = error_body(AppError::from(DbErr::Custom("secret path".to_string()))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal Server Error");

}

#[tokio::test]
async fn test_payload_too_large_into_response() {
    let (status, body) = error_body(AppError::PayloadTooLarge("length limit exceeded".to_string())).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], "Payload too large: length limit exceeded");
}
