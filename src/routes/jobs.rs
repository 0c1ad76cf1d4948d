use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, JsonRejection, PathRejection},
        Path,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::AppResult;
use crate::routes::MessageResponse;

/// Upper bound for a media upload body.
pub const MEDIA_BODY_LIMIT: usize = 10 * 1024 * 1024;

// Wire names match what existing job-tracking clients already read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum JobStatus {
    #[serde(rename = "ikke startet")]
    NotStarted,
    #[serde(rename = "i gang")]
    InProgress,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Job {
    pub id: i64,
    #[serde(rename = "kunde")]
    pub customer: String,
    #[serde(rename = "fra")]
    pub from: String,
    #[serde(rename = "til")]
    pub to: String,
    pub status: JobStatus,
}

/// Hardcoded jobs served by the job listing. Nothing mutates them.
pub fn sample_jobs() -> Vec<Job> {
    vec![
        Job {
            id: 1,
            customer: "Testkunde".to_string(),
            from: "København".to_string(),
            to: "Aarhus".to_string(),
            status: JobStatus::NotStarted,
        },
        Job {
            id: 2,
            customer: "Anden kunde".to_string(),
            from: "Odense".to_string(),
            to: "Aalborg".to_string(),
            status: JobStatus::InProgress,
        },
    ]
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JobListResponse {
    pub jobs: Vec<Job>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JobsTodayResponse {
    pub jobs: Vec<Job>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportResponse {
    pub message: String,
    /// The submitted report, unchanged
    #[schema(value_type = Object)]
    pub data: Value,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MediaResponse {
    pub message: String,
    /// Size of the received body
    pub bytes: usize,
}

#[utoipa::path(
    get,
    path = "/api/jobs",
    tag = "jobs",
    responses((status = 200, description = "Sample jobs", body = JobListResponse))
)]
pub async fn list_jobs() -> Json<JobListResponse> {
    Json(JobListResponse { jobs: sample_jobs() })
}

/// Today's jobs; always empty for now
#[utoipa::path(
    get,
    path = "/api/jobs/today",
    tag = "jobs",
    responses((status = 200, description = "No jobs today", body = JobsTodayResponse))
)]
pub async fn jobs_today() -> Json<JobsTodayResponse> {
    Json(JobsTodayResponse {
        jobs: Vec::new(),
        status: "ok".to_string(),
        note: Some("No jobs found today".to_string()),
    })
}

/// Today's jobs as served on the identity path
#[utoipa::path(
    get,
    path = "/identity/api/v1/job/today",
    tag = "jobs",
    responses((status = 200, description = "No jobs today", body = JobsTodayResponse))
)]
pub async fn identity_jobs_today() -> Json<JobsTodayResponse> {
    Json(JobsTodayResponse {
        jobs: Vec::new(),
        status: "ok".to_string(),
        note: None,
    })
}

#[utoipa::path(
    post,
    path = "/api/jobs/{id}/start",
    tag = "jobs",
    params(("id" = i64, Path, description = "Job id")),
    responses((status = 200, description = "Start acknowledged", body = MessageResponse))
)]
#[tracing::instrument(skip_all, fields(id = tracing::field::Empty))]
pub async fn start_job(path: Result<Path<i64>, PathRejection>) -> AppResult<Json<MessageResponse>> {
    let Path(id) = path?;
    tracing::Span::current().record("id", id);
    tracing::info!("Job start requested");
    Ok(Json(MessageResponse::new(format!("Job {} started", id))))
}

#[utoipa::path(
    post,
    path = "/api/jobs/{id}/stop",
    tag = "jobs",
    params(("id" = i64, Path, description = "Job id")),
    responses((status = 200, description = "Stop acknowledged", body = MessageResponse))
)]
#[tracing::instrument(skip_all, fields(id = tracing::field::Empty))]
pub async fn stop_job(path: Result<Path<i64>, PathRejection>) -> AppResult<Json<MessageResponse>> {
    let Path(id) = path?;
    tracing::Span::current().record("id", id);
    tracing::info!("Job stop requested");
    Ok(Json(MessageResponse::new(format!("Job {} stopped", id))))
}

/// Submit a report for a job; any JSON body is accepted and echoed back
#[utoipa::path(
    post,
    path = "/api/jobs/{id}/report",
    tag = "jobs",
    params(("id" = i64, Path, description = "Job id")),
    responses(
        (status = 200, description = "Report received", body = ReportResponse),
        (status = 400, description = "Body is not JSON", body = crate::routes::ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(id = tracing::field::Empty))]
pub async fn report_job(
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<ReportResponse>> {
    let Path(id) = path?;
    tracing::Span::current().record("id", id);
    let Json(data) = payload?;
    tracing::info!("Job report received");
    Ok(Json(ReportResponse {
        message: format!("Report received for job {}", id),
        data,
    }))
}

/// Upload media for a job. The body is accepted and discarded.
#[utoipa::path(
    post,
    path = "/api/jobs/{id}/media",
    tag = "jobs",
    params(("id" = i64, Path, description = "Job id")),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Media received", body = MediaResponse),
        (status = 413, description = "Body exceeds the upload limit", body = crate::routes::ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(id = tracing::field::Empty))]
pub async fn upload_media(
    path: Result<Path<i64>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Json<MediaResponse>> {
    let Path(id) = path?;
    tracing::Span::current().record("id", id);
    let body = body?;
    tracing::info!(bytes = body.len(), "Job media received");
    Ok(Json(MediaResponse {
        message: format!("Media received for job {}", id),
        bytes: body.len(),
    }))
}
