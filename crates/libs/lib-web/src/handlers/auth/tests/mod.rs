//! # Auth Handler Tests
//!
//! Test suite for the login and register handlers.

mod integration;

use super::*;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::routing::post;
use axum::Router;
use lib_auth::{PasswordPolicy, TokenConfig};
use lib_core::{DbPool, MemoryIdentity, SqliteIdentity};
use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePoolOptions;
use std::path::Path;
use tower::ServiceExt;

/// Migrations shipped with the backend binary
pub const MIGRATIONS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../../backend/migrations");

/// Setup test database with the migrated schema
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

/// Create test token config
pub fn test_token_config() -> TokenConfig {
    TokenConfig {
        signing_key: "test-secret-key-must-be-at-least-32-characters-long!".to_string(),
        issuer: "https://auth.test".to_string(),
        audience: "https://app.test".to_string(),
    }
}

/// Gateway over a fresh in-memory backend
pub fn memory_gateway() -> AuthGateway {
    AuthGateway::with_backend(
        Arc::new(MemoryIdentity::new(PasswordPolicy::default())),
        test_token_config(),
    )
}

/// Gateway over a fresh SQLite backend
pub async fn sqlite_gateway() -> AuthGateway {
    let pool = setup_test_db().await;
    AuthGateway::with_backend(
        Arc::new(SqliteIdentity::new(pool, PasswordPolicy::default())),
        test_token_config(),
    )
}

/// Create test app with the auth routes
pub fn test_app(gateway: AuthGateway) -> Router {
    Router::new()
        .route("/api/Auth/Login", post(login))
        .route("/api/Auth/Register", post(register))
        .with_state(Arc::new(gateway))
}

/// POST a raw JSON body
pub async fn post_raw(app: &Router, uri: &str, body: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// POST a JSON value
pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    post_raw(app, uri, &body.to_string()).await
}

/// Collect a response body as JSON
pub async fn body_json(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// The `Set-Cookie` header as a string
pub fn set_cookie(response: &Response) -> String {
    response
        .headers()
        .get(SET_COOKIE)
        .expect("Set-Cookie header should be present")
        .to_str()
        .unwrap()
        .to_string()
}
