//! # In-Memory Identity Provider
//!
//! Process-local [`IdentityProvider`] and [`UserStore`]. Accounts are lost on
//! restart. The existence check and the insert happen under one write lock.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use lib_auth::PasswordPolicy;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::hashing;
use crate::error::{AppError, Result};
use crate::model::account::{UserAccount, UserAccountForCreate};
use crate::model::identity::{IdentityProvider, UserStore};

/// Accounts keyed by email.
#[derive(Default)]
pub struct MemoryIdentity {
    accounts: RwLock<HashMap<String, UserAccount>>,
    policy: PasswordPolicy,
}

impl MemoryIdentity {
    pub fn new(policy: PasswordPolicy) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            policy,
        }
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentity {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>> {
        Ok(self.accounts.read().await.get(email).cloned())
    }

    async fn create_account(
        &self,
        account: UserAccountForCreate,
        password: &str,
    ) -> Result<UserAccount> {
        self.policy.check(password)?;
        let password_hash = hashing::hash_password(password).await?;

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.email) {
            return Err(AppError::EmailAlreadyInUse);
        }

        let created = UserAccount {
            id: Uuid::new_v4().to_string(),
            first_name: account.first_name,
            last_name: account.last_name,
            email: account.email,
            user_name: account.user_name,
            password_hash,
            created_at: Utc::now(),
            last_login: None,
        };
        accounts.insert(created.email.clone(), created.clone());

        Ok(created)
    }

    async fn verify_password(&self, account: &UserAccount, password: &str) -> Result<bool> {
        hashing::verify_password(password, &account.password_hash).await
    }

    async fn sign_in(&self, account: &UserAccount) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        let stored = accounts
            .get_mut(&account.email)
            .ok_or_else(|| AppError::Internal(format!("Unknown account: {}", account.id)))?;
        stored.last_login = Some(Utc::now());
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryIdentity {
    async fn list_all_accounts(&self) -> Result<Vec<UserAccount>> {
        let mut all: Vec<UserAccount> = self.accounts.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.email.cmp(&b.email)));
        Ok(all)
    }
}
