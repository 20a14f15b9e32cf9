// handlers/users.rs - /users

use axum::{
    extract::{Path, State},
    handler::Handler,
    http::StatusCode,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use serde::Serialize;

use super::jobs::parse_job_id;
use crate::auth::create_token;
use crate::database::models::{User, UserWithJobs};
use crate::database::UpdateData;
use crate::middleware::{ensure_admin, ensure_correct_user_or_admin, ApiResponse, ApiResult};
use crate::schemas::{UserNew, UserUpdate, ValidJson};
use crate::types::AppState;

#[derive(Debug, Serialize)]
pub struct UserCreated {
    pub user: User,
    pub token: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/:username", get(show).patch(update).delete(remove))
        .route("/:username/jobs/:id", post(apply))
        .route_layer(from_fn(ensure_correct_user_or_admin))
        .route(
            "/",
            get(list.layer(from_fn(ensure_admin))).post(create.layer(from_fn(ensure_admin))),
        )
}

/// POST /users { user } => 201 { user, token }
///
/// Admin-only; unlike /auth/register this can create admins.
pub async fn create(State(state): State<AppState>, ValidJson(body): ValidJson<UserNew>) -> ApiResult<UserCreated> {
    let user = User::register(&state.pool, &body).await?;
    let token = create_token(&user.username, user.is_admin)?;
    Ok(ApiResponse::body(UserCreated { user, token }).with_status(StatusCode::CREATED))
}

/// GET /users => { users }
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let users = User::find_all(&state.pool).await?;
    Ok(ApiResponse::success("users", users))
}

/// GET /users/:username => { user } including applied job ids
pub async fn show(State(state): State<AppState>, Path(username): Path<String>) -> ApiResult<UserWithJobs> {
    let user = User::get(&state.pool, &username).await?;
    Ok(ApiResponse::success("user", user))
}

/// PATCH /users/:username { password, firstName, lastName, email } => { user }
pub async fn update(
    State(state): State<AppState>,
    Path(username): Path<String>,
    ValidJson(body): ValidJson<UserUpdate>,
) -> ApiResult<User> {
    let data = UpdateData::from(body);
    let user = User::update(&state.pool, &username, &data).await?;
    Ok(ApiResponse::success("user", user))
}

/// DELETE /users/:username => { deleted: username }
pub async fn remove(State(state): State<AppState>, Path(username): Path<String>) -> ApiResult<String> {
    User::remove(&state.pool, &username).await?;
    Ok(ApiResponse::success("deleted", username))
}

/// POST /users/:username/jobs/:id => { applied: id }
pub async fn apply(
    State(state): State<AppState>,
    Path((username, id)): Path<(String, String)>,
) -> ApiResult<i32> {
    let job_id = parse_job_id(&id)?;
    User::apply_to_job(&state.pool, &username, job_id).await?;
    Ok(ApiResponse::success("applied", job_id))
}
