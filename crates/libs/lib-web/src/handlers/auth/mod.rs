//! # Authentication Handlers
//!
//! HTTP surface of the [`AuthGateway`].
//!
//! ## Overview
//!
//! - `POST /api/Auth/Login` - authenticate with email/password
//! - `POST /api/Auth/Register` - create an account and authenticate it
//!
//! On success both answer `200 OK` with an [`AuthResponse`] and set a cookie
//! named after the account id carrying the token (see [`cookie`]). Failures
//! are rendered by [`AppError`]:
//!
//! | Outcome                          | Status |
//! |----------------------------------|--------|
//! | malformed body or fields         | 403    |
//! | password refused by the provider | 401    |
//! | unknown email / wrong password   | 401    |
//! | email already registered         | 409    |
//! | anything unexpected              | 500    |
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use axum::{Router, routing::post};
//! use lib_web::handlers::auth::{login, register};
//! use lib_web::services::AuthGateway;
//!
//! # fn build(gateway: AuthGateway) -> Router {
//! Router::new()
//!     .route("/api/Auth/Login", post(login))
//!     .route("/api/Auth/Register", post(register))
//!     .with_state(Arc::new(gateway))
//! # }
//! ```

pub mod cookie;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
};
use lib_core::{
    dto::{AuthResponse, LoginRequest, RegisterRequest, UserInfo},
    AppError,
};
use tracing::{debug, info, instrument, warn};

use crate::services::{AuthGateway, AuthOutcome};
use self::cookie::token_cookie;

type AuthReply = (StatusCode, HeaderMap, Json<AuthResponse>);

/// Login handler - authenticates an existing account.
///
/// # Returns
///
/// * `Ok((StatusCode::OK, Set-Cookie, AuthResponse))` - token issued
/// * `Err(AppError)` - invalid input, invalid credentials, or server error
///
/// A body that is not JSON, or a JSON body that is missing `email` or
/// `password`, is invalid input and never reaches the identity provider.
#[instrument(skip_all)]
pub async fn login(
    State(gateway): State<Arc<AuthGateway>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<AuthReply, AppError> {
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("[LOGIN] LOGIN ATTEMPT");
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let Json(req) = payload.inspect_err(|e| warn!("[LOGIN] Unreadable body: {}", e))?;
    debug!("   Email: {}", req.email);

    let outcome = gateway.login(&req).await?;
    deliver(outcome, "Login successful")
}

/// Register handler - creates an account and authenticates it.
///
/// # Returns
///
/// * `Ok((StatusCode::OK, Set-Cookie, AuthResponse))` - account created, token issued
/// * `Err(AppError)` - invalid input, email already in use, or server error
///
/// `firstName` and `lastName` may be omitted.
#[instrument(skip_all)]
pub async fn register(
    State(gateway): State<Arc<AuthGateway>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<AuthReply, AppError> {
    info!("[REGISTER] NEW ACCOUNT REQUEST");

    let Json(req) = payload.inspect_err(|e| warn!("[REGISTER] Unreadable body: {}", e))?;
    debug!("   Email: {}", req.email);

    let outcome = gateway.register(&req).await?;
    deliver(outcome, "Registration successful")
}

fn deliver(outcome: AuthOutcome, message: &str) -> Result<AuthReply, AppError> {
    let AuthOutcome { account, token } = outcome;

    let cookie = token_cookie(&account.id, &token)
        .map_err(|e| AppError::Internal(format!("Failed to build token cookie: {}", e)))?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);

    Ok((
        StatusCode::OK,
        headers,
        Json(AuthResponse {
            user: UserInfo::from(&account),
            token,
            message: message.to_string(),
        }),
    ))
}

#[cfg(test)]
mod tests;
