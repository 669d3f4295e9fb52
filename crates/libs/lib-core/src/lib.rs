//! # Core Library
//!
//! Configuration, errors, DTOs, and the account model with its identity backends.

pub mod config;
pub mod dto;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use config::{Config, IdentityBackend};
pub use error::{AppError, Result};
pub use model::store::{create_pool, DbPool, MemoryIdentity, SqliteIdentity};
pub use model::{IdentityProvider, UserAccount, UserAccountForCreate, UserStore};
