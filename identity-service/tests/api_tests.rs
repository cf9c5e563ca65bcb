//! End-to-end API tests against a spawned server and a real Postgres.
//!
//! Run with `cargo test -- --ignored` and a reachable database
//! (DATABASE_URL, defaults to postgres on localhost:5432).

mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

fn register_body(username: &str, email: &str) -> Value {
    json!({
        "fullName": "Ada Lovelace",
        "username": username,
        "email": email,
        "password": "Secret1",
        "confirmPassword": "Secret1"
    })
}

async fn register(app: &TestApp, username: &str, email: &str) -> Value {
    let response = app
        .post("/api/auth/register")
        .json(&register_body(username, email))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_register_creates_inactive_account() {
    let app = TestApp::spawn().await;

    let body = register(&app, "ada", "ada@example.com").await;

    assert_eq!(body["data"]["username"], "ada");
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert_eq!(body["data"]["isActive"], false);
    assert_eq!(body["data"]["role"], "user");
    assert!(body["data"]["activationCode"].is_string());
    // The stored credential never leaves the service
    assert!(body["data"].get("passwordHash").is_none());
    assert!(body["data"].get("password").is_none());
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_register_reports_every_violation() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "fullName": "",
            "username": "ada",
            "email": "not-an-email",
            "password": "weak",
            "confirmPassword": "other"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json().await.expect("Failed to parse response");
    let message = body["data"]["message"].as_str().unwrap();
    assert!(message.contains("fullName"));
    assert!(message.contains("email"));
    assert!(message.contains("uppercase"));
    assert!(message.contains("Passwords must match"));
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;

    register(&app, "ada", "ada@example.com").await;

    let response = app
        .post("/api/auth/register")
        .json(&register_body("ada", "other@example.com"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    register(&app, "ada", "ada@example.com").await;

    let response = app
        .post("/api/auth/register")
        .json(&register_body("grace", "ada@example.com"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_login_rejected_before_activation() {
    let app = TestApp::spawn().await;

    register(&app, "ada", "ada@example.com").await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "identifier": "ada", "password": "Secret1" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "User not found");
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_login_wrong_password_is_indistinguishable() {
    let app = TestApp::spawn().await;

    let created = register(&app, "ada", "ada@example.com").await;
    let code = created["data"]["activationCode"].as_str().unwrap();

    app.post("/api/auth/activation")
        .json(&json!({ "code": code }))
        .send()
        .await
        .expect("Failed to execute request");

    let wrong_password = app
        .post("/api/auth/login")
        .json(&json!({ "identifier": "ada", "password": "WrongPass1" }))
        .send()
        .await
        .expect("Failed to execute request");

    let unknown_account = app
        .post("/api/auth/login")
        .json(&json!({ "identifier": "ghost", "password": "Secret1" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_account.status(), StatusCode::UNAUTHORIZED);

    let wrong_body: Value = wrong_password.json().await.unwrap();
    let unknown_body: Value = unknown_account.json().await.unwrap();
    assert_eq!(wrong_body["data"]["message"], unknown_body["data"]["message"]);
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_activation_login_me_flow() {
    let app = TestApp::spawn().await;

    let created = register(&app, "ada", "ada@example.com").await;
    let code = created["data"]["activationCode"].as_str().unwrap();

    // Activate
    let response = app
        .post("/api/auth/activation")
        .json(&json!({ "code": code }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["isActive"], true);

    // Activating again with the same code is an idempotent success
    let response = app
        .post("/api/auth/activation")
        .json(&json!({ "code": code }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["isActive"], true);

    // Login by username
    let response = app
        .post("/api/auth/login")
        .json(&json!({ "identifier": "ada", "password": "Secret1" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    let token = body["data"]["token"].as_str().unwrap().to_string();

    // Login by email works the same
    let response = app
        .post("/api/auth/login")
        .json(&json!({ "identifier": "ada@example.com", "password": "Secret1" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    // Current account behind the token
    let response = app
        .get_authenticated("/api/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["username"], "ada");
    assert_eq!(body["data"]["role"], "user");
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_activation_unknown_code() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/activation")
        .json(&json!({ "code": "does-not-exist" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_me_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/auth/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn test_account_listing_requires_admin_role() {
    let app = TestApp::spawn().await;

    // Regular user: authenticated but forbidden
    let created = register(&app, "ada", "ada@example.com").await;
    let code = created["data"]["activationCode"].as_str().unwrap();
    app.post("/api/auth/activation")
        .json(&json!({ "code": code }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "identifier": "ada", "password": "Secret1" }))
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.unwrap();
    let user_token = body["data"]["token"].as_str().unwrap().to_string();

    let response = app
        .get_authenticated("/api/accounts", &user_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Admin: allowed
    app.seed_admin("root", "root@example.com", "Admin1pass").await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "identifier": "root", "password": "Admin1pass" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    let admin_token = body["data"]["token"].as_str().unwrap().to_string();

    let response = app
        .get_authenticated("/api/accounts", &admin_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    // No token at all: rejected before the gate is consulted
    let response = app
        .get("/api/accounts")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
