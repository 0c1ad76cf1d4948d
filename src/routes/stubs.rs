use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::routes::{MessageResponse, StatusResponse};

const UNKNOWN: &str = "unknown";

/// Welcome message; doubles as a liveness probe
#[utoipa::path(
    get,
    path = "/",
    tag = "service",
    responses((status = 200, description = "Service is up", body = MessageResponse))
)]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("API is running! 🎉"))
}

#[utoipa::path(
    get,
    path = "/ping",
    tag = "service",
    responses((status = 200, description = "Service is up", body = StatusResponse))
)]
pub async fn ping() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}

/// Token status placeholder
#[utoipa::path(
    get,
    path = "/tokens",
    tag = "service",
    responses((status = 200, description = "Fixed token status", body = StatusResponse))
)]
pub async fn token_status() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}

#[utoipa::path(
    get,
    path = "/polipo/bodybody",
    tag = "service",
    responses((status = 200, description = "Fixed probe message", body = MessageResponse))
)]
pub async fn polipo_probe() -> Json<MessageResponse> {
    Json(MessageResponse::new("This page works now!"))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BodyQuery {
    /// Optional: industry to echo back (default: "unknown")
    #[param(required = false)]
    industry: Option<String>,
    /// Optional: location to echo back (default: "unknown")
    #[param(required = false)]
    location: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BodyResponse {
    pub industry: String,
    pub location: String,
    pub x: f64,
    pub y: i64,
}

/// Echo the industry and location query parameters with fixed coordinates
#[utoipa::path(
    get,
    path = "/api/v1/body",
    tag = "service",
    params(BodyQuery),
    responses((status = 200, description = "Echoed parameters", body = BodyResponse))
)]
pub async fn body_echo(Query(query): Query<BodyQuery>) -> Json<BodyResponse> {
    let or_unknown = |value: Option<String>| {
        value
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string())
    };

    Json(BodyResponse {
        industry: or_unknown(query.industry),
        location: or_unknown(query.location),
        x: 0.34,
        y: 1,
    })
}
