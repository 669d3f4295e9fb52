//! # Services Layer
//!
//! Business logic between the HTTP handlers and the identity backend.
//!
//! ```text
//! Handlers (HTTP) → Services (Auth decisions) → IdentityProvider / UserStore
//! ```
//!
//! - [`auth`] - Login and registration ([`AuthGateway`])
//!
//! ## Error Handling
//!
//! Services return `Result<T, AppError>` from `lib_core`. Lower-level errors
//! (hashing, token signing, storage) arrive already converted to `AppError`
//! and are propagated unchanged.
//!
//! ## Testing
//!
//! The gateway only sees trait objects, so tests wrap or replace the backend:
//!
//! ```rust,ignore
//! #[tokio::test]
//! async fn test_gateway() {
//!     let backend = Arc::new(MemoryIdentity::default());
//!     let gateway = AuthGateway::with_backend(backend, token_config());
//!     let err = gateway.login(&req).await.unwrap_err();
//!     assert_eq!(err, AppError::InvalidCredentials);
//! }
//! ```

pub mod auth;

pub use auth::{AuthGateway, AuthOutcome};
