//! # Integration Tests
//!
//! Register-then-login flows against both identity backends.

use super::*;
use lib_auth::decode_token;
use serde_json::json;

const LOGIN: &str = "/api/Auth/Login";
const REGISTER: &str = "/api/Auth/Register";

async fn register_then_login(app: Router) {
    let creds = json!({ "email": "a@b.com", "password": "Secret1!" });

    // Register
    let registered = post_json(&app, REGISTER, creds.clone()).await;
    assert_eq!(registered.status(), StatusCode::OK);
    let registered = body_json(registered).await;

    // Register again
    let again = post_json(&app, REGISTER, creds.clone()).await;
    assert_eq!(again.status(), StatusCode::CONFLICT);

    // Login
    let login = post_json(&app, LOGIN, creds).await;
    assert_eq!(login.status(), StatusCode::OK);
    let login = body_json(login).await;

    assert_eq!(login["user"]["id"], registered["user"]["id"]);
    let claims = decode_token(login["token"].as_str().unwrap(), &test_token_config()).unwrap();
    assert_eq!(claims.sub, "a@b.com");

    // Wrong password
    let wrong = post_json(&app, LOGIN, json!({ "email": "a@b.com", "password": "wrong" })).await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_then_login_memory() {
    register_then_login(test_app(memory_gateway())).await;
}

#[tokio::test]
async fn test_register_then_login_sqlite() {
    register_then_login(test_app(sqlite_gateway().await)).await;
}

#[tokio::test]
async fn test_concurrent_registration_single_winner() {
    let app = test_app(sqlite_gateway().await);
    let creds = json!({ "email": "race@example.com", "password": "Secret1!" });

    let (first, second) = tokio::join!(
        post_json(&app, REGISTER, creds.clone()),
        post_json(&app, REGISTER, creds.clone()),
    );

    let mut statuses = [first.status(), second.status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);
}

#[tokio::test]
async fn test_email_uniqueness_is_case_sensitive() {
    let app = test_app(memory_gateway());

    let lower = post_json(&app, REGISTER, json!({ "email": "a@b.com", "password": "Secret1!" })).await;
    let upper = post_json(&app, REGISTER, json!({ "email": "A@b.com", "password": "Secret1!" })).await;

    assert_eq!(lower.status(), StatusCode::OK);
    assert_eq!(upper.status(), StatusCode::OK);
}
