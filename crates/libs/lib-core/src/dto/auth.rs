//! # Authentication Data Transfer Objects
//!
//! Request and response bodies for the authentication endpoints.
//!
//! ## Endpoints Using These DTOs
//!
//! - `POST /api/Auth/Login` - [`LoginRequest`] -> [`AuthResponse`]
//! - `POST /api/Auth/Register` - [`RegisterRequest`] -> [`AuthResponse`]
//!
//! Failures on either endpoint return [`ErrorResponse`].
//!
//! ## Wire Format
//!
//! Field names are **camelCase** in JSON. Every request field is optional on
//! the wire and defaults to an empty string, so a missing `email` or
//! `password` is reported by [`LoginRequest::validate`] /
//! [`RegisterRequest::validate`] as invalid input instead of being rejected
//! by the JSON extractor.
//!
//! ```text
//! POST /api/Auth/Register
//! Content-Type: application/json
//!
//! {
//!   "firstName": "Ada",
//!   "lastName": "Lovelace",
//!   "email": "ada@example.com",
//!   "password": "Secret1!"
//! }
//! ```
//!
//! Response:
//! ```text
//! {
//!   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
//!   "message": "Registration successful",
//!   "user": {
//!     "id": "5f0c6a0e-...",
//!     "firstName": "Ada",
//!     "lastName": "Lovelace",
//!     "email": "ada@example.com",
//!     "createdAt": "2024-01-01T00:00:00Z"
//!   }
//! }
//! ```

use lib_utils::{format_time, validate_email, validate_not_empty};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::model::UserAccount;

/// Login request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// Structural validation: email present and well-formed, password present.
    pub fn validate(&self) -> Result<()> {
        validate_credentials(&self.email, &self.password)
    }
}

/// Registration request.
///
/// `first_name` and `last_name` are optional; the email doubles as the
/// account's user name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    /// Structural validation, same rules as login.
    ///
    /// Password strength is not checked here; that is the identity
    /// provider's call when the account is created.
    pub fn validate(&self) -> Result<()> {
        validate_credentials(&self.email, &self.password)
    }
}

fn validate_credentials(email: &str, password: &str) -> Result<()> {
    validate_not_empty(email, "Email").map_err(AppError::InvalidInput)?;
    validate_email(email).map_err(AppError::InvalidInput)?;
    if password.is_empty() {
        return Err(AppError::InvalidInput("Password cannot be empty".to_string()));
    }
    Ok(())
}

/// Successful login or registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    /// Signed access token, also delivered as a cookie.
    pub token: String,
    pub message: String,
    pub user: UserInfo,
}

/// Public view of an account. Never carries the password credential.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: String,
}

impl From<&UserAccount> for UserInfo {
    fn from(account: &UserAccount) -> Self {
        Self {
            id: account.id.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            email: account.email.clone(),
            created_at: format_time(account.created_at),
        }
    }
}

/// Error body returned by every failing endpoint.
///
/// `code` is the [`AppError::code`] of the failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
