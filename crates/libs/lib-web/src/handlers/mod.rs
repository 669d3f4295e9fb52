//! # HTTP Request Handlers
//!
//! Axum request handlers, organized by feature domain. Handlers extract and
//! decode the request, delegate the decision to [`crate::services`], and turn
//! the outcome into a response.
//!
//! ## Handler Modules
//!
//! - **[`auth`]**: Authentication endpoints
//!   - `POST /api/Auth/Login` - Authenticate with email/password
//!   - `POST /api/Auth/Register` - Create an account and authenticate it
//!
//! ## Handler Architecture
//!
//! ```rust,ignore
//! async fn handler(
//!     State(gateway): State<Arc<AuthGateway>>,               // Shared state
//!     payload: Result<Json<RequestBody>, JsonRejection>,     // Request body
//! ) -> Result<(StatusCode, HeaderMap, Json<Response>), AppError> {
//!     let Json(req) = payload?;
//!     // Delegate to the service...
//! }
//! ```
//!
//! The body is extracted as a `Result` so that an unreadable body becomes an
//! `AppError::InvalidInput` (403) instead of axum's default rejection.
//!
//! ## Error Handling
//!
//! Handlers return `Result<T, AppError>`; `AppError` implements
//! `IntoResponse` and renders `{"error": ..., "code": ...}`.
//!
//! ## Request/Response Flow
//!
//! ```text
//! Client Request
//!     ↓
//! Request stamping (X-Request-ID)
//!     ↓
//! CORS Middleware (tower-http)
//!     ↓
//! Trace span + request logging
//!     ↓
//! Handler → AuthGateway → IdentityProvider
//!     ↓
//! Response (JSON body, Set-Cookie on success)
//! ```

pub mod auth;
