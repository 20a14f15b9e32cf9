/// Shared types used across the codebase

use sqlx::PgPool;

/// State handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
