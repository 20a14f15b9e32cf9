// handlers/mod.rs - Route handlers grouped by resource
//
// Public: /auth/*, GET /companies*, GET /jobs*
// Admin only: writes to /companies and /jobs, GET/POST /users
// Same user or admin: /users/:username*

pub mod auth;
pub mod companies;
pub mod jobs;
pub mod users;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::types::AppState;

/// GET / - service description
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "Jobly API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": "/auth/token, /auth/register (public)",
            "companies": "/companies[/:handle] (reads public, writes admin)",
            "jobs": "/jobs[/:id] (reads public, writes admin)",
            "users": "/users[/:username[/jobs/:id]] (admin, or the user themself)",
        }
    }))
}

/// GET /health - liveness plus database reachability
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}

/// Fallback for unmatched routes
pub async fn not_found() -> ApiError {
    ApiError::not_found("Not Found")
}
