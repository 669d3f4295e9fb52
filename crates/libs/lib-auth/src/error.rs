//! # Auth Errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The password does not satisfy the configured [`PasswordPolicy`](crate::PasswordPolicy).
    /// Holds every violated rule, in policy order.
    #[error("{}", .0.join(" "))]
    PasswordPolicy(Vec<String>),

    #[error("Failed to hash password: {0}")]
    Hash(String),

    #[error("Failed to parse hash: {0}")]
    HashFormat(String),

    #[error("Failed to encode JWT: {0}")]
    TokenEncode(String),

    #[error("Failed to decode JWT: {0}")]
    TokenDecode(String),
}
