pub mod password;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;

pub use password::{hash_password, verify_password};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid username/password")]
    InvalidCredentials,

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Password hashing error: {0}")]
    Hashing(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub username: String,
    pub is_admin: bool,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(username: impl Into<String>, is_admin: bool) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;

        Self {
            username: username.into(),
            is_admin,
            exp: expires_at(now, expiry_hours),
            iat: now.timestamp(),
        }
    }
}

/// `now + hours` as a unix timestamp, saturating at chrono's latest instant
fn expires_at(now: DateTime<Utc>, hours: u64) -> i64 {
    i64::try_from(hours)
        .ok()
        .and_then(Duration::try_hours)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
        .timestamp()
}

/// Sign a token for the given user with the configured secret.
pub fn create_token(username: &str, is_admin: bool) -> Result<String, AuthError> {
    let secret = &config::config().security.secret_key;
    if secret.is_empty() {
        return Err(AuthError::TokenGeneration("secret key not configured".to_string()));
    }

    let claims = Claims::new(username, is_admin);
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

/// Verify signature and expiry, returning the embedded claims.
pub fn decode_token(token: &str) -> Result<Claims, AuthError> {
    let secret = &config::config().security.secret_key;
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());

    decode::<Claims>(token, &decoding_key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))
}
