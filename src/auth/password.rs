// Password hashing; bcrypt runs on the blocking pool so it never stalls the runtime.

use bcrypt::{hash, verify};

use super::AuthError;
use crate::config;

/// Hash `password` at the configured bcrypt cost.
pub async fn hash_password(password: &str) -> Result<String, AuthError> {
    let password = password.to_string();
    let cost = config::config().security.bcrypt_work_factor;

    tokio::task::spawn_blocking(move || hash(password, cost).map_err(|e| AuthError::Hashing(e.to_string())))
        .await
        .map_err(|e| AuthError::Hashing(format!("Task join error: {}", e)))?
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
pub async fn verify_password(password: &str, hashed: &str) -> Result<bool, AuthError> {
    let password = password.to_string();
    let hashed = hashed.to_string();

    tokio::task::spawn_blocking(move || verify(password, &hashed).map_err(|e| AuthError::Hashing(e.to_string())))
        .await
        .map_err(|e| AuthError::Hashing(format!("Task join error: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify() {
        let hashed = hash_password("password1").await.unwrap();
        assert!(hashed.starts_with("$2"));
        assert!(verify_password("password1", &hashed).await.unwrap());
        assert!(!verify_password("wrong", &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn malformed_hash_is_an_error() {
        assert!(verify_password("password1", "not-a-hash").await.is_err());
    }
}
