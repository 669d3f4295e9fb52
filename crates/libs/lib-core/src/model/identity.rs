//! # Identity Capabilities
//!
//! The gateway never touches account storage, hashing or credential checks
//! directly. It talks to these two traits, so any backend that honors them can
//! be substituted ([`SqliteIdentity`](super::store::SqliteIdentity),
//! [`MemoryIdentity`](super::store::MemoryIdentity), or an external service).

use async_trait::async_trait;

use super::account::{UserAccount, UserAccountForCreate};
use crate::error::Result;

/// Account lookup, creation and credential verification.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Find the account whose email equals `email` exactly.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>>;

    /// Create an account with `password` as its credential.
    ///
    /// # Errors
    ///
    /// - [`AppError::PolicyViolation`](crate::AppError::PolicyViolation) when the password is refused
    /// - [`AppError::EmailAlreadyInUse`](crate::AppError::EmailAlreadyInUse) when the email is taken at
    ///   insert time; implementations must make this check atomic with the insert
    /// - [`AppError::Internal`](crate::AppError::Internal) for anything else
    async fn create_account(
        &self,
        account: UserAccountForCreate,
        password: &str,
    ) -> Result<UserAccount>;

    /// Check `password` against the account's credential. A mismatch is `Ok(false)`.
    async fn verify_password(&self, account: &UserAccount, password: &str) -> Result<bool>;

    /// Record a successful sign-in.
    async fn sign_in(&self, account: &UserAccount) -> Result<()>;
}

/// Bulk account listing, used for the registration uniqueness scan.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list_all_accounts(&self) -> Result<Vec<UserAccount>>;
}
