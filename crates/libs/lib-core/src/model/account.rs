use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::dto::RegisterRequest;

/// Account record owned by an identity provider.
#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct UserAccount {
    /// Opaque identifier (UUID v4 string). Also the name of the token cookie.
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Unique across accounts, compared case-sensitively.
    pub email: String,
    /// Login name; always equal to `email`.
    pub user_name: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

/// Data structure for creating a new account.
///
/// The password travels separately so the provider can apply its policy and
/// hash it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccountForCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub user_name: String,
}

impl UserAccountForCreate {
    /// Create a new `UserAccountForCreate`, using the email as user name.
    pub fn new(first_name: String, last_name: String, email: String) -> Self {
        Self {
            first_name,
            last_name,
            user_name: email.clone(),
            email,
        }
    }
}

impl From<&RegisterRequest> for UserAccountForCreate {
    fn from(req: &RegisterRequest) -> Self {
        Self::new(req.first_name.clone(), req.last_name.clone(), req.email.clone())
    }
}
