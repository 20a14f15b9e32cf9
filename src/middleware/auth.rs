use std::collections::HashMap;

use axum::{
    extract::{Path, Request},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{decode_token, Claims};
use crate::error::ApiError;

/// Authenticated user context extracted from JWT
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub username: String,
    pub is_admin: bool,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.username,
            is_admin: claims.is_admin,
        }
    }
}

/// Stores `AuthUser` in the request extensions when a valid token is sent.
///
/// Never rejects: a missing or bad token just leaves the request anonymous,
/// and the `ensure_*` guards decide what that means for a route.
pub async fn authenticate_jwt(mut request: Request, next: Next) -> Response {
    if let Some(token) = extract_jwt_from_headers(request.headers()) {
        match decode_token(&token) {
            Ok(claims) => {
                request.extensions_mut().insert(AuthUser::from(claims));
            }
            Err(e) => tracing::debug!("Ignoring invalid token: {}", e),
        }
    }

    next.run(request).await
}

/// Requires any authenticated user
pub async fn ensure_logged_in(request: Request, next: Next) -> Result<Response, ApiError> {
    if request.extensions().get::<AuthUser>().is_none() {
        return Err(ApiError::unauthorized("Unauthorized"));
    }
    Ok(next.run(request).await)
}

/// Requires an authenticated admin
pub async fn ensure_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    match request.extensions().get::<AuthUser>() {
        Some(user) if user.is_admin => Ok(next.run(request).await),
        _ => Err(ApiError::unauthorized("Unauthorized")),
    }
}

/// Requires an admin, or the user named by the `:username` path parameter
pub async fn ensure_correct_user_or_admin(
    Path(params): Path<HashMap<String, String>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let allowed = match request.extensions().get::<AuthUser>() {
        Some(user) => user.is_admin || params.get("username") == Some(&user.username),
        None => false,
    };

    if !allowed {
        return Err(ApiError::unauthorized("Unauthorized"));
    }
    Ok(next.run(request).await)
}

/// Token from `Authorization: Bearer <token>`; the scheme is case-insensitive
fn extract_jwt_from_headers(headers: &HeaderMap) -> Option<String> {
    let auth_str = headers.get("authorization")?.to_str().ok()?;

    let (scheme, token) = auth_str.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
