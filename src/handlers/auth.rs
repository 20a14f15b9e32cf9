// handlers/auth.rs - Token acquisition, no authentication required

use axum::{extract::State, routing::post, Router};

use crate::auth::create_token;
use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult};
use crate::schemas::{UserAuth, UserNew, UserRegister, ValidJson};
use crate::types::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/token", post(token))
        .route("/register", post(register))
}

/// POST /auth/token { username, password } => { token }
pub async fn token(State(state): State<AppState>, ValidJson(body): ValidJson<UserAuth>) -> ApiResult<String> {
    let user = User::authenticate(&state.pool, &body.username, &body.password).await?;
    let token = create_token(&user.username, user.is_admin)?;
    Ok(ApiResponse::success("token", token))
}

/// POST /auth/register { user } => 201 { token }
///
/// Self-registered users are never admins.
pub async fn register(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<UserRegister>,
) -> ApiResult<String> {
    let new_user = UserNew::from(body);
    let user = User::register(&state.pool, &new_user).await?;
    let token = create_token(&user.username, user.is_admin)?;
    Ok(ApiResponse::created("token", token))
}
