use axum::{
    extract::{Query, State},
    Json,
};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::entities::company::{self, Company};
use crate::entities::Companies;
use crate::error::{AppError, AppResult};
use crate::routes::ErrorResponse;
use crate::AppState;

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompanySearch {
    /// Optional: substring the company name must contain
    #[serde(default)]
    #[param(required = false)]
    pub name: Option<String>,
    /// Optional: substring the industry must contain
    #[serde(default)]
    #[param(required = false)]
    pub industry: Option<String>,
}

impl CompanySearch {
    /// AND of one `LIKE '%value%'` predicate per supplied filter, values bound as parameters.
    /// Empty filters are ignored, so no filters matches every row.
    pub fn condition(&self) -> Condition {
        let supplied = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());

        Condition::all()
            .add_option(supplied(&self.name).map(|name| company::Column::Name.contains(name)))
            .add_option(supplied(&self.industry).map(|industry| company::Column::Industry.contains(industry)))
    }
}

/// Search companies by name and/or industry substring
#[utoipa::path(
    get,
    path = "/search",
    tag = "companies",
    params(CompanySearch),
    responses(
        (status = 200, description = "Matching companies", body = [Company]),
        (status = 404, description = "No company matched", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn search_companies(
    State(state): State<AppState>,
    Query(search): Query<CompanySearch>,
) -> AppResult<Json<Vec<Company>>> {
    let handle = state.storage.connect().await?;
    let matches = Companies::find()
        .filter(search.condition())
        .order_by_asc(company::Column::Id)
        .all(handle.conn())
        .await?;

    if matches.is_empty() {
        return Err(AppError::NotFound("No companies found".to_string()));
    }

    tracing::debug!(count = matches.len(), "Search matched companies");
    Ok(Json(matches.into_iter().map(Company::from).collect()))
}
