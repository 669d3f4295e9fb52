//! # Authentication Library
//!
//! Password hashing, password policy, and JWT token issuing.

pub mod error;
pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use error::{Error, Result};
pub use pwd::{hash_password, verify_password, PasswordPolicy};
pub use token::{decode_token, issue_token, issue_token_at, Claims, TokenConfig, TOKEN_TTL_MINUTES};
