//! # SQLite Identity Provider
//!
//! [`IdentityProvider`] and [`UserStore`] over the `users` table. Email
//! uniqueness is enforced by the table's `UNIQUE` constraint, so two
//! concurrent registrations for the same email cannot both succeed.

use async_trait::async_trait;
use lib_auth::PasswordPolicy;
use tracing::debug;

use super::{hashing, AccountRepository, DbPool};
use crate::error::{AppError, Result};
use crate::model::account::{UserAccount, UserAccountForCreate};
use crate::model::identity::{IdentityProvider, UserStore};

#[derive(Clone)]
pub struct SqliteIdentity {
    pool: DbPool,
    policy: PasswordPolicy,
}

impl SqliteIdentity {
    pub fn new(pool: DbPool, policy: PasswordPolicy) -> Self {
        Self { pool, policy }
    }
}

#[async_trait]
impl IdentityProvider for SqliteIdentity {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>> {
        Ok(AccountRepository::find_by_email(&self.pool, email).await?)
    }

    async fn create_account(
        &self,
        account: UserAccountForCreate,
        password: &str,
    ) -> Result<UserAccount> {
        self.policy.check(password)?;
        let password_hash = hashing::hash_password(password).await?;

        AccountRepository::create(&self.pool, &account, &password_hash)
            .await
            .map_err(|err| match err {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    debug!("[IDENTITY] Unique constraint hit for {}", account.email);
                    AppError::EmailAlreadyInUse
                }
                other => AppError::from(other),
            })
    }

    async fn verify_password(&self, account: &UserAccount, password: &str) -> Result<bool> {
        hashing::verify_password(password, &account.password_hash).await
    }

    async fn sign_in(&self, account: &UserAccount) -> Result<()> {
        Ok(AccountRepository::update_last_login(&self.pool, &account.id).await?)
    }
}

#[async_trait]
impl UserStore for SqliteIdentity {
    async fn list_all_accounts(&self) -> Result<Vec<UserAccount>> {
        Ok(AccountRepository::list_all(&self.pool).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::test_support::setup_test_db;

    async fn identity() -> SqliteIdentity {
        SqliteIdentity::new(setup_test_db().await, PasswordPolicy::default())
    }

    fn account(email: &str) -> UserAccountForCreate {
        UserAccountForCreate::new(String::new(), String::new(), email.to_string())
    }

    #[tokio::test]
    async fn test_create_then_verify() {
        let identity = identity().await;

        let created = identity
            .create_account(account("a@b.com"), "Secret1!")
            .await
            .unwrap();

        assert_ne!(created.password_hash, "Secret1!");
        assert!(identity.verify_password(&created, "Secret1!").await.unwrap());
        assert!(!identity.verify_password(&created, "wrong").await.unwrap());
    }

    #[tokio::test]
    async fn test_weak_password_is_policy_violation() {
        let identity = identity().await;

        let err = identity
            .create_account(account("a@b.com"), "weak")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::PolicyViolation(_)));
        assert!(identity.list_all_accounts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let identity = identity().await;
        identity
            .create_account(account("a@b.com"), "Secret1!")
            .await
            .unwrap();

        let err = identity
            .create_account(account("a@b.com"), "Secret1!")
            .await
            .unwrap_err();

        assert_eq!(err, AppError::EmailAlreadyInUse);
        assert_eq!(identity.list_all_accounts().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sign_in_records_last_login() {
        let identity = identity().await;
        let created = identity
            .create_account(account("a@b.com"), "Secret1!")
            .await
            .unwrap();

        identity.sign_in(&created).await.unwrap();

        let found = identity.find_by_email("a@b.com").await.unwrap().unwrap();
        assert!(found.last_login.is_some());
    }
}
