// handlers/jobs.rs - /jobs

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    handler::Handler,
    middleware::from_fn,
    routing::get,
    Router,
};

use crate::database::models::{Job, JobListing, JobWithCompany};
use crate::database::UpdateData;
use crate::error::ApiError;
use crate::filter::{FilterError, JobFilter};
use crate::middleware::{ensure_admin, ApiResponse, ApiResult};
use crate::schemas::{JobNew, JobUpdate, ValidJson};
use crate::types::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create.layer(from_fn(ensure_admin))))
        .route(
            "/:id",
            get(show)
                .patch(update.layer(from_fn(ensure_admin)))
                .delete(remove.layer(from_fn(ensure_admin))),
        )
}

/// Job ids are serial integers; anything else is a client error
pub fn parse_job_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>().map_err(|_| ApiError::bad_request("Invalid job id"))
}

/// POST /jobs { title, salary, equity, companyHandle } => 201 { job }
pub async fn create(State(state): State<AppState>, ValidJson(body): ValidJson<JobNew>) -> ApiResult<Job> {
    let equity = body.equity_decimal()?;
    let job = Job::create(&state.pool, &body, equity).await?;
    Ok(ApiResponse::created("job", job))
}

/// GET /jobs?title=&minSalary=&hasEquity= => { jobs }
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<JobFilter>, QueryRejection>,
) -> ApiResult<Vec<JobListing>> {
    let Query(filter) = query.map_err(|e| FilterError::InvalidQuery(e.body_text()))?;
    let jobs = Job::find_all(&state.pool, &filter).await?;
    Ok(ApiResponse::success("jobs", jobs))
}

/// GET /jobs/:id => { job } including its company
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<JobWithCompany> {
    let id = parse_job_id(&id)?;
    let job = Job::get(&state.pool, id).await?;
    Ok(ApiResponse::success("job", job))
}

/// PATCH /jobs/:id { title, salary, equity } => { job }
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<JobUpdate>,
) -> ApiResult<Job> {
    let id = parse_job_id(&id)?;
    let data = UpdateData::try_from(body)?;
    let job = Job::update(&state.pool, id, &data).await?;
    Ok(ApiResponse::success("job", job))
}

/// DELETE /jobs/:id => { deleted: id }
pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<i32> {
    let id = parse_job_id(&id)?;
    Job::remove(&state.pool, id).await?;
    Ok(ApiResponse::success("deleted", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_ids_only() {
        assert_eq!(parse_job_id("42").unwrap(), 42);
        assert_eq!(parse_job_id("abc").unwrap_err().status_code(), 400);
        assert!(parse_job_id("1.5").is_err());
    }
}
