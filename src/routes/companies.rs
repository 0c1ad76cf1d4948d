use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::company::{self, Company, CompanyInput};
use crate::entities::Companies;
use crate::error::{AppError, AppResult};
use crate::routes::{ErrorResponse, MessageResponse};
use crate::AppState;

/// List every stored company
#[utoipa::path(
    get,
    path = "/companies",
    tag = "companies",
    responses(
        (status = 200, description = "All companies in insertion order", body = [Company])
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_companies(State(state): State<AppState>) -> AppResult<Json<Vec<Company>>> {
    let handle = state.storage.connect().await?;
    let companies = Companies::find()
        .order_by_asc(company::Column::Id)
        .all(handle.conn())
        .await?;

    tracing::debug!(count = companies.len(), "Listed companies");
    Ok(Json(companies.into_iter().map(Company::from).collect()))
}

/// Fetch a single company by id
#[utoipa::path(
    get,
    path = "/companies/{id}",
    tag = "companies",
    params(("id" = i64, Path, description = "Company id")),
    responses(
        (status = 200, description = "The company", body = Company),
        (status = 404, description = "No company with this id", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(id = tracing::field::Empty))]
pub async fn get_company(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Company>> {
    let Path(id) = path?;
    tracing::Span::current().record("id", id);

    let handle = state.storage.connect().await?;
    let found = Companies::find_by_id(id).one(handle.conn()).await?;

    match found {
        Some(model) => Ok(Json(model.into())),
        None => Err(AppError::NotFound("Company not found".to_string())),
    }
}

/// Create a company; the id is assigned by storage
#[utoipa::path(
    post,
    path = "/companies",
    tag = "companies",
    request_body = CompanyInput,
    responses(
        (status = 201, description = "Company created", body = MessageResponse),
        (status = 400, description = "A required field is missing or empty", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, payload))]
pub async fn create_company(
    State(state): State<AppState>,
    payload: Result<Json<CompanyInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let Json(input) = payload?;
    let new_company = input.validate()?;

    let handle = state.storage.connect().await?;
    let inserted = Companies::insert(new_company.into_active_model())
        .exec(handle.conn())
        .await?;
    handle.commit().await?;

    let id = inserted.last_insert_id;
    tracing::info!(id, "Company created");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(format!("Company with id {} created", id))),
    ))
}

/// Replace all fields of a company
///
/// Succeeds even when no company has this id; nothing is written in that case.
#[utoipa::path(
    put,
    path = "/companies/{id}",
    tag = "companies",
    params(("id" = i64, Path, description = "Company id")),
    request_body = CompanyInput,
    responses(
        (status = 200, description = "Update applied", body = MessageResponse),
        (status = 400, description = "A required field is missing or empty", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(id = tracing::field::Empty))]
pub async fn update_company(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CompanyInput>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Path(id) = path?;
    tracing::Span::current().record("id", id);
    let Json(input) = payload?;
    let fields = input.validate()?;

    let handle = state.storage.connect().await?;
    let result = Companies::update_many()
        .col_expr(company::Column::Name, Expr::value(fields.name))
        .col_expr(company::Column::Industry, Expr::value(fields.industry))
        .col_expr(company::Column::Lastinv, Expr::value(fields.lastinv))
        .filter(company::Column::Id.eq(id))
        .exec(handle.conn())
        .await?;
    handle.commit().await?;

    if result.rows_affected == 0 {
        tracing::warn!(id, "Update matched no company");
    } else {
        tracing::info!(id, "Company updated");
    }
    Ok(Json(MessageResponse::new(format!("Company with id {} updated", id))))
}

/// Delete a company
///
/// Succeeds even when no company has this id.
#[utoipa::path(
    delete,
    path = "/companies/{id}",
    tag = "companies",
    params(("id" = i64, Path, description = "Company id")),
    responses(
        (status = 200, description = "Delete applied", body = MessageResponse)
    )
)]
#[tracing::instrument(skip_all, fields(id = tracing::field::Empty))]
pub async fn delete_company(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Path(id) = path?;
    tracing::Span::current().record("id", id);

    let handle = state.storage.connect().await?;
    let result = Companies::delete_by_id(id).exec(handle.conn()).await?;
    handle.commit().await?;

    if result.rows_affected == 0 {
        tracing::warn!(id, "Delete matched no company");
    } else {
        tracing::info!(id, "Company deleted");
    }
    Ok(Json(MessageResponse::new(format!("Company with id {} deleted", id))))
}
