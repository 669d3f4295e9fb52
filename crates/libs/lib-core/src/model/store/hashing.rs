//! # Password Hashing Off the Runtime
//!
//! Argon2 hashing and verification are CPU-bound. Identity backends call
//! them through these wrappers, which run on tokio's blocking pool.

use tokio::task;

use crate::error::{AppError, Result};

/// Argon2 hash of `password`, computed on the blocking pool.
pub async fn hash_password(password: &str) -> Result<String> {
    let password = password.to_string();

    let hash = task::spawn_blocking(move || lib_auth::hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))??;

    Ok(hash)
}

/// Whether `password` matches the stored Argon2 `hash`, checked on the blocking pool.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let password = password.to_string();
    let hash = hash.to_string();

    let matches = task::spawn_blocking(move || lib_auth::verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))??;

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hash = hash_password("Secret1!").await.unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("Secret1!", &hash).await.unwrap());
        assert!(!verify_password("wrong", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_malformed_hash_is_internal() {
        let err = verify_password("Secret1!", "not-a-hash").await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
