pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod schemas;
pub mod types;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::from_fn,
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::config;
use crate::types::AppState;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let settings = config();

    let mut router = Router::new()
        // Public
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .nest("/auth", handlers::auth::routes())
        .nest("/companies", handlers::companies::routes())
        .nest("/jobs", handlers::jobs::routes())
        .nest("/users", handlers::users::routes())
        .fallback(handlers::not_found)
        // Global middleware, outermost last
        .layer(from_fn(middleware::authenticate_jwt))
        .layer(DefaultBodyLimit::max(settings.api.max_request_size_bytes));

    if settings.security.enable_cors {
        router = router.layer(cors_layer(&settings.security.cors_origins));
    }

    if settings.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    CorsLayer::permissive().allow_origin(allowed)
}
