// handlers/companies.rs - /companies

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    handler::Handler,
    middleware::from_fn,
    routing::get,
    Router,
};

use crate::database::models::{Company, CompanyWithJobs};
use crate::database::UpdateData;
use crate::filter::{CompanyFilter, FilterError};
use crate::middleware::{ensure_admin, ApiResponse, ApiResult};
use crate::schemas::{CompanyNew, CompanyUpdate, ValidJson};
use crate::types::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create.layer(from_fn(ensure_admin))))
        .route(
            "/:handle",
            get(show)
                .patch(update.layer(from_fn(ensure_admin)))
                .delete(remove.layer(from_fn(ensure_admin))),
        )
}

/// POST /companies { company } => 201 { company }
pub async fn create(State(state): State<AppState>, ValidJson(body): ValidJson<CompanyNew>) -> ApiResult<Company> {
    let company = Company::create(&state.pool, &body).await?;
    Ok(ApiResponse::created("company", company))
}

/// GET /companies?name=&minEmployees=&maxEmployees= => { companies }
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<CompanyFilter>, QueryRejection>,
) -> ApiResult<Vec<Company>> {
    let Query(filter) = query.map_err(|e| FilterError::InvalidQuery(e.body_text()))?;
    let companies = Company::find_all(&state.pool, &filter).await?;
    Ok(ApiResponse::success("companies", companies))
}

/// GET /companies/:handle => { company } including its jobs
pub async fn show(State(state): State<AppState>, Path(handle): Path<String>) -> ApiResult<CompanyWithJobs> {
    let company = Company::get(&state.pool, &handle).await?;
    Ok(ApiResponse::success("company", company))
}

/// PATCH /companies/:handle { fld1, ... } => { company }
pub async fn update(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    ValidJson(body): ValidJson<CompanyUpdate>,
) -> ApiResult<Company> {
    let data = UpdateData::from(body);
    let company = Company::update(&state.pool, &handle, &data).await?;
    Ok(ApiResponse::success("company", company))
}

/// DELETE /companies/:handle => { deleted: handle }
pub async fn remove(State(state): State<AppState>, Path(handle): Path<String>) -> ApiResult<String> {
    Company::remove(&state.pool, &handle).await?;
    Ok(ApiResponse::success("deleted", handle))
}
