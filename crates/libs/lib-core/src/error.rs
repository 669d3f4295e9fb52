//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used consistently
//! across the gateway. It follows the `thiserror` pattern for ergonomic error handling.
//!
//! ## Error Categories
//!
//! 1. **Client Errors** (4xx)
//!    - [`InvalidInput`](AppError::InvalidInput) → 403 Forbidden (malformed request)
//!    - [`PolicyViolation`](AppError::PolicyViolation) → 401 Unauthorized (registration input rejected by the identity provider)
//!    - [`InvalidCredentials`](AppError::InvalidCredentials) → 401 Unauthorized
//!    - [`EmailAlreadyInUse`](AppError::EmailAlreadyInUse) → 409 Conflict
//!
//! 2. **Server Errors** (5xx)
//!    - [`Internal`](AppError::Internal) → 500, the underlying message is returned to the caller
//!    - [`Config`](AppError::Config) → 500, startup only
//!
//! `InvalidInput` and `PolicyViolation` are the two kinds of invalid input;
//! [`AppError::is_invalid_input`] groups them.
//!
//! Unknown email and wrong password both surface as `InvalidCredentials` with
//! the same status and body.
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn require_email(email: &str) -> Result<()> {
//!     if email.is_empty() {
//!         return Err(AppError::InvalidInput("Email cannot be empty".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::dto::ErrorResponse;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppError {
    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Structurally invalid request data (missing fields, malformed email, bad JSON).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The identity provider refused the registration input (password policy).
    #[error("Registration rejected: {0}")]
    PolicyViolation(String),

    /// Unknown email or wrong password. Deliberately a single variant.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Registration conflict on email.
    #[error("Email already in use")]
    EmailAlreadyInUse,

    /// Unexpected provider or infrastructure failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::FORBIDDEN,
            AppError::PolicyViolation(_) | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::EmailAlreadyInUse => StatusCode::CONFLICT,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message returned to the caller.
    ///
    /// `Internal` carries the raw underlying message through to the caller.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) | AppError::PolicyViolation(msg) => msg.clone(),
            AppError::InvalidCredentials => "Invalid credentials".to_string(),
            AppError::EmailAlreadyInUse => "Email already in use".to_string(),
            AppError::Internal(msg) => msg.clone(),
            AppError::Config(_) => "An internal error occurred".to_string(),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "Config",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::PolicyViolation(_) => "PolicyViolation",
            AppError::InvalidCredentials => "InvalidCredentials",
            AppError::EmailAlreadyInUse => "EmailAlreadyInUse",
            AppError::Internal(_) => "Internal",
        }
    }

    /// True for both kinds of invalid input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, AppError::InvalidInput(_) | AppError::PolicyViolation(_))
    }
}

/// Implement Axum's `IntoResponse` for automatic error handling.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Server error: {}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        let body = Json(ErrorResponse {
            error: self.user_message(),
            code: self.code().to_string(),
        });

        (status, body).into_response()
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert `sqlx::Error` to `AppError`.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                AppError::Internal(format!("Database error: {}", db_err.message()))
            }
            _ => AppError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert `lib_auth::Error` to `AppError`.
///
/// Policy failures are caller input; everything else is internal.
impl From<lib_auth::Error> for AppError {
    fn from(err: lib_auth::Error) -> Self {
        match err {
            lib_auth::Error::PasswordPolicy(_) => AppError::PolicyViolation(err.to_string()),
            _ => AppError::Internal(err.to_string()),
        }
    }
}

/// Unparseable or non-JSON request bodies are malformed input.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_http_contract() {
        assert_eq!(
            AppError::InvalidInput("x".to_string()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::PolicyViolation("x".to_string()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::EmailAlreadyInUse.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::Internal("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_message_is_surfaced() {
        let err = AppError::Internal("disk full".to_string());
        assert_eq!(err.user_message(), "disk full");
    }

    #[test]
    fn test_config_message_is_generic() {
        let err = AppError::Config("JWT_KEY must be set".to_string());
        assert_eq!(err.user_message(), "An internal error occurred");
    }

    #[test]
    fn test_invalid_input_grouping() {
        assert!(AppError::InvalidInput("x".to_string()).is_invalid_input());
        assert!(AppError::PolicyViolation("x".to_string()).is_invalid_input());
        assert!(!AppError::InvalidCredentials.is_invalid_input());
    }

    #[test]
    fn test_from_password_policy_error() {
        let err: AppError =
            lib_auth::Error::PasswordPolicy(vec!["Too short.".to_string()]).into();
        assert_eq!(err, AppError::PolicyViolation("Too short.".to_string()));
    }

    #[test]
    fn test_from_hash_error_is_internal() {
        let err: AppError = lib_auth::Error::Hash("bad salt".to_string()).into();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn test_into_response_body() {
        let response = AppError::EmailAlreadyInUse.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "Email already in use");
        assert_eq!(value["code"], "EmailAlreadyInUse");
    }

    #[tokio::test]
    async fn test_into_response_body_is_error_response() {
        let response = AppError::Internal("disk full".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            parsed,
            ErrorResponse {
                error: "disk full".to_string(),
                code: "Internal".to_string(),
            }
        );
    }
}
