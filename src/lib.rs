use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod entities;
pub mod error;
pub mod routes;
pub mod storage;

use crate::routes::*;
use crate::storage::Storage;

/// State shared by every handler
#[derive(Clone, Debug)]
pub struct AppState {
    pub storage: Storage,
}

impl AppState {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Companies API",
        version = "0.1.0",
        description = "Company records plus job-tracking stubs"
    ),
    paths(
        routes::companies::list_companies,
        routes::companies::get_company,
        routes::companies::create_company,
        routes::companies::update_company,
        routes::companies::delete_company,
        routes::search::search_companies,
        routes::stubs::root,
        routes::stubs::ping,
        routes::stubs::token_status,
        routes::stubs::polipo_probe,
        routes::stubs::body_echo,
        routes::jobs::list_jobs,
        routes::jobs::jobs_today,
        routes::jobs::identity_jobs_today,
        routes::jobs::start_job,
        routes::jobs::stop_job,
        routes::jobs::report_job,
        routes::jobs::upload_media
    ),
    components(schemas(
        entities::company::Company,
        entities::company::CompanyInput,
        CompanySearch,
        MessageResponse,
        StatusResponse,
        ErrorResponse,
        BodyResponse,
        Job,
        JobStatus,
        JobListResponse,
        JobsTodayResponse,
        ReportResponse,
        MediaResponse
    )),
    tags(
        (name = "companies", description = "Company records"),
        (name = "jobs", description = "Job-tracking placeholders"),
        (name = "service", description = "Health and fixed responses")
    )
)]
pub struct ApiDoc;

/// Create the application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let company_routes = Router::new()
        .route("/companies", get(list_companies).post(create_company))
        .route(
            "/companies/{id}",
            get(get_company).put(update_company).delete(delete_company),
        )
        .route("/search", get(search_companies))
        .with_state(state);

    let stub_routes = Router::new()
        .route("/", get(root))
        .route("/ping", get(ping))
        .route("/tokens", get(token_status))
        .route("/polipo/bodybody", get(polipo_probe))
        .route("/api/v1/body", get(body_echo))
        .route("/identity/api/v1/job/today", get(identity_jobs_today));

    let job_routes = Router::new()
        .route("/api/jobs", get(list_jobs))
        .route("/api/jobs/today", get(jobs_today))
        .route("/api/jobs/{id}/start", post(start_job))
        .route("/api/jobs/{id}/stop", post(stop_job))
        .route("/api/jobs/{id}/report", post(report_job))
        .route(
            "/api/jobs/{id}/media",
            post(upload_media).layer(DefaultBodyLimit::max(MEDIA_BODY_LIMIT)),
        );

    let docs_router = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(company_routes)
        .merge(stub_routes)
        .merge(job_routes)
        .merge(docs_router)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
