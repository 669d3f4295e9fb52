//! # Password Hashing
//!
//! Password policy enforcement, hashing and verification using Argon2.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lib_utils::validate_min_length;

use crate::error::{Error, Result};

/// Rules a password must satisfy before an account is created with it.
///
/// The default mirrors what identity frameworks usually ship with: at least
/// six characters, one digit, one lowercase, one uppercase and one
/// non-alphanumeric character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub require_digit: bool,
    pub require_lowercase: bool,
    pub require_uppercase: bool,
    pub require_non_alphanumeric: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 6,
            require_digit: true,
            require_lowercase: true,
            require_uppercase: true,
            require_non_alphanumeric: true,
        }
    }
}

impl PasswordPolicy {
    /// Policy with the default character-class rules and a custom minimum length.
    pub fn with_min_length(min_length: usize) -> Self {
        Self {
            min_length,
            ..Self::default()
        }
    }

    /// Check `password` against every rule and report all violations at once.
    pub fn check(&self, password: &str) -> Result<()> {
        let mut violations = Vec::new();

        if let Err(msg) = validate_min_length(password, self.min_length, "Password") {
            violations.push(format!("{msg}."));
        }
        if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            violations.push("Password must contain at least one digit ('0'-'9').".to_string());
        }
        if self.require_lowercase && !password.chars().any(char::is_lowercase) {
            violations.push("Password must contain at least one lowercase letter.".to_string());
        }
        if self.require_uppercase && !password.chars().any(char::is_uppercase) {
            violations.push("Password must contain at least one uppercase letter.".to_string());
        }
        if self.require_non_alphanumeric && password.chars().all(char::is_alphanumeric) {
            violations.push(
                "Password must contain at least one non-alphanumeric character.".to_string(),
            );
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(Error::PasswordPolicy(violations))
        }
    }
}

/// Hash a password using the Argon2 algorithm.
///
/// Produces a PHC string (algorithm, parameters and salt embedded), so the
/// hash alone is enough for [`verify_password`].
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Hash(e.to_string()))?
        .to_string();

    Ok(password_hash)
}

/// Verify a plaintext password against an Argon2 hash.
///
/// A mismatch is `Ok(false)`; only an unparseable stored hash is an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| Error::HashFormat(e.to_string()))?;

    let argon2 = Argon2::default();

    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
