//! # Account Store
//!
//! Database connection pool and the identity backends.

// region: --- Modules
pub mod account_repository;
pub mod hashing;
pub mod memory;
pub mod sqlite_identity;
// endregion: --- Modules

// region: --- Re-exports
pub use account_repository::AccountRepository;
pub use memory::MemoryIdentity;
pub use sqlite_identity::SqliteIdentity;
// endregion: --- Re-exports

// region: --- Types and Functions
use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Create a new SQLite connection pool, creating the database file if needed.
pub async fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true);

    let pool = SqlitePool::connect_with(options).await?;

    Ok(pool)
}
// endregion: --- Types and Functions

#[cfg(test)]
pub(crate) mod test_support {
    use super::DbPool;
    use sqlx::migrate::Migrator;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::path::Path;

    /// Migrations shipped with the backend binary.
    pub const MIGRATIONS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../../backend/migrations");

    /// In-memory database migrated to the current `users` schema.
    ///
    /// A single connection, since every `sqlite::memory:` connection is its own database.
    pub async fn setup_test_db() -> DbPool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::new(Path::new(MIGRATIONS_DIR))
            .await
            .expect("Failed to load migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }
}
