//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! | Variable               | Required | Default                   |
//! |------------------------|----------|---------------------------|
//! | `JWT_KEY`              | yes      |                           |
//! | `JWT_ISSUER`           | yes      |                           |
//! | `JWT_AUDIENCE`         | yes      |                           |
//! | `DATABASE_URL`         | no       | `sqlite:data/auth.db`     |
//! | `IDENTITY_BACKEND`     | no       | `sqlite` (or `memory`)    |
//! | `PASSWORD_MIN_LENGTH`  | no       | `6`                       |

use std::str::FromStr;

use lib_auth::{PasswordPolicy, TokenConfig};
use lib_utils::envs::Error as EnvError;
use lib_utils::{get_env, get_env_or, get_env_parse};

use crate::error::{AppError, Result};

const DEFAULT_PASSWORD_MIN_LENGTH: usize = 6;

/// Which identity provider backs the gateway.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentityBackend {
    Sqlite,
    Memory,
}

impl FromStr for IdentityBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(IdentityBackend::Sqlite),
            "memory" => Ok(IdentityBackend::Memory),
            _ => Err(format!("Invalid identity backend: {}", s)),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Secret used to sign access tokens (`Jwt:Key`).
    ///
    /// **Must be at least 32 characters long** for HS256.
    pub jwt_key: String,

    /// Token issuer (`Jwt:Issuer`)
    pub jwt_issuer: String,

    /// Token audience (`Jwt:Audience`)
    pub jwt_audience: String,

    /// Minimum password length enforced on registration
    pub password_min_length: usize,

    pub identity_backend: IdentityBackend,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let database_url = get_env_or("DATABASE_URL", "sqlite:data/auth.db");

        let jwt_key = get_env("JWT_KEY").map_err(|e| AppError::Config(e.to_string()))?;
        let jwt_issuer = get_env("JWT_ISSUER").map_err(|e| AppError::Config(e.to_string()))?;
        let jwt_audience = get_env("JWT_AUDIENCE").map_err(|e| AppError::Config(e.to_string()))?;

        let password_min_length = match get_env_parse::<usize>("PASSWORD_MIN_LENGTH") {
            Ok(len) => len,
            Err(EnvError::MissingEnv(_)) => DEFAULT_PASSWORD_MIN_LENGTH,
            Err(e) => return Err(AppError::Config(e.to_string())),
        };

        let identity_backend = get_env_or("IDENTITY_BACKEND", "sqlite")
            .parse()
            .map_err(AppError::Config)?;

        Ok(Self {
            database_url,
            jwt_key,
            jwt_issuer,
            jwt_audience,
            password_min_length,
            identity_backend,
        })
    }

    /// Validate configuration values against security rules.
    ///
    /// Issuer and audience are trusted as configured.
    pub fn validate(&self) -> Result<()> {
        if self.jwt_key.len() < 32 {
            return Err(AppError::Config(
                "JWT_KEY must be at least 32 characters long".to_string(),
            ));
        }

        if self.password_min_length == 0 {
            return Err(AppError::Config(
                "PASSWORD_MIN_LENGTH must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Signing configuration for the token issuer.
    pub fn token_config(&self) -> TokenConfig {
        TokenConfig {
            signing_key: self.jwt_key.clone(),
            issuer: self.jwt_issuer.clone(),
            audience: self.jwt_audience.clone(),
        }
    }

    /// Password policy enforced by the identity backends.
    pub fn password_policy(&self) -> PasswordPolicy {
        PasswordPolicy::with_min_length(self.password_min_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            jwt_key: "test-secret-key-must-be-at-least-32-characters-long!".to_string(),
            jwt_issuer: "https://auth.test".to_string(),
            jwt_audience: "https://app.test".to_string(),
            password_min_length: 6,
            identity_backend: IdentityBackend::Memory,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_short_key_rejected() {
        let cfg = Config {
            jwt_key: "short".to_string(),
            ..config()
        };
        assert!(matches!(cfg.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_zero_min_length_rejected() {
        let cfg = Config {
            password_min_length: 0,
            ..config()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_token_config_mirrors_jwt_settings() {
        let cfg = config();
        let token_config = cfg.token_config();
        assert_eq!(token_config.signing_key, cfg.jwt_key);
        assert_eq!(token_config.issuer, "https://auth.test");
        assert_eq!(token_config.audience, "https://app.test");
    }

    // Only test in this crate that touches the process environment.
    #[test]
    fn test_from_env_password_min_length() {
        std::env::set_var("JWT_KEY", "test-secret-key-must-be-at-least-32-characters-long!");
        std::env::set_var("JWT_ISSUER", "https://auth.test");
        std::env::set_var("JWT_AUDIENCE", "https://app.test");

        std::env::remove_var("PASSWORD_MIN_LENGTH");
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.password_min_length, DEFAULT_PASSWORD_MIN_LENGTH);

        std::env::set_var("PASSWORD_MIN_LENGTH", "10");
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.password_policy().min_length, 10);

        std::env::set_var("PASSWORD_MIN_LENGTH", "ten");
        let err = Config::from_env().unwrap_err();
        assert_eq!(
            err,
            AppError::Config("PASSWORD_MIN_LENGTH has an invalid format".to_string())
        );

        std::env::remove_var("PASSWORD_MIN_LENGTH");
    }

    #[test]
    fn test_identity_backend_parse() {
        assert_eq!("memory".parse(), Ok(IdentityBackend::Memory));
        assert_eq!("SQLite".parse(), Ok(IdentityBackend::Sqlite));
        assert!("postgres".parse::<IdentityBackend>().is_err());
    }
}
