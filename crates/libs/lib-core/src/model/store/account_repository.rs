//! # Account Repository
//!
//! SQL access for the `users` table.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::store::{create_pool, AccountRepository};
//! # use lib_core::UserAccountForCreate;
//! # async fn example() -> anyhow::Result<()> {
//! let pool = create_pool("sqlite:data/auth.db").await?;
//!
//! let account = UserAccountForCreate::new(
//!     "Ada".to_string(),
//!     "Lovelace".to_string(),
//!     "ada@example.com".to_string(),
//! );
//! AccountRepository::create(&pool, &account, "$argon2id$...").await?;
//!
//! let found = AccountRepository::find_by_email(&pool, "ada@example.com").await?;
//! assert!(found.is_some());
//! # Ok(())
//! # }
//! ```

use chrono::Utc;
use sqlx::query_as;
use uuid::Uuid;

use super::DbPool;
use crate::model::account::{UserAccount, UserAccountForCreate};

/// Account repository for database operations.
pub struct AccountRepository;

impl AccountRepository {
    /// Find an account by email. Exact, case-sensitive match.
    pub async fn find_by_email(
        pool: &DbPool,
        email: &str,
    ) -> Result<Option<UserAccount>, sqlx::Error> {
        query_as::<_, UserAccount>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find an account by id.
    pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<UserAccount>, sqlx::Error> {
        query_as::<_, UserAccount>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every account, oldest first.
    pub async fn list_all(pool: &DbPool) -> Result<Vec<UserAccount>, sqlx::Error> {
        query_as::<_, UserAccount>("SELECT * FROM users ORDER BY created_at, email")
            .fetch_all(pool)
            .await
    }

    /// Insert a new account with a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error::Database` with a unique violation when the email
    /// already exists; callers map that to a conflict.
    pub async fn create(
        pool: &DbPool,
        account: &UserAccountForCreate,
        password_hash: &str,
    ) -> Result<UserAccount, sqlx::Error> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO users (id, first_name, last_name, email, user_name, password_hash, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.email)
        .bind(&account.user_name)
        .bind(password_hash)
        .bind(Utc::now())
        .execute(pool)
        .await?;

        Self::find_by_id(pool, &id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Update last login timestamp.
    pub async fn update_last_login(pool: &DbPool, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
