//! Token cookie delivery.
//!
//! The cookie is named after the account id so several accounts can hold
//! tokens side by side in one browser.

use axum::http::header::{HeaderValue, InvalidHeaderValue};

/// Build the `Set-Cookie` value carrying `token` for `account_id`.
///
/// Always `HttpOnly` and `Secure`; scoped to the whole site.
pub fn token_cookie(account_id: &str, token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{account_id}={token}; Path=/; HttpOnly; Secure"
    ))
}
