mod common;

use std::sync::Arc;

use auth::Identity;
use auth::JwtHandler;
use auth::ManualClock;
use auth::SigningSecret;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let body = app.register("Alice", "alice@example.com", "pass_word!").await;

    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["name"], "Alice");
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert_eq!(body["data"]["role"], "user");
    assert!(body["data"]["id"].is_i64());
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_with_role() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/v1/register")
        .json(&json!({
            "name": "Root",
            "email": "root@example.com",
            "password": "pass_word!",
            "role": "admin"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["role"], "admin");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    app.register("Alice", "alice@example.com", "pass_word!").await;

    let response = app
        .post("/v1/register")
        .json(&json!({
            "name": "Other Alice",
            "email": "alice@example.com",
            "password": "pass_word!"
        }))
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
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/v1/register")
        .json(&json!({
            "name": "Alice",
            "email": "not-an-email",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_empty_password_is_accepted() {
    let app = TestApp::spawn().await;

    let login = app.register_and_login("alice@example.com", "").await;

    let response = app
        .patch_authenticated(
            &format!("/v1/users/{}", login["user_id"]),
            login["access_token"].as_str().unwrap(),
        )
        .json(&json!({ "password": "" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .post("/v1/login")
        .json(&json!({ "email": "alice@example.com", "password": "x" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    app.login("alice@example.com", "").await;
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    let registered = app.register("Alice", "alice@example.com", "pass_word!").await;

    let data = app.login("alice@example.com", "pass_word!").await;

    assert_eq!(data["user_id"], registered["data"]["id"]);
    assert_eq!(data["role"], "user");
    assert!(data["expires_in"].as_i64().unwrap() > Utc::now().timestamp());

    let access = app
        .jwt_handler
        .decode_verify(data["access_token"].as_str().unwrap())
        .unwrap();
    assert_eq!(access.email, "alice@example.com");
    assert_eq!(access.exp, data["expires_in"].as_i64().unwrap());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("Alice", "alice@example.com", "pass_word!").await;

    let wrong_password = app
        .post("/v1/login")
        .json(&json!({ "email": "alice@example.com", "password": "wrong" }))
        .send()
        .await
        .expect("Failed to execute request");
    let unknown_user = app
        .post("/v1/login")
        .json(&json!({ "email": "nobody@example.com", "password": "pass_word!" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    let wrong_password: Value = wrong_password.json().await.unwrap();
    let unknown_user: Value = unknown_user.json().await.unwrap();
    assert_eq!(wrong_password, unknown_user);
    assert_eq!(wrong_password["data"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_gate_requires_authorization_header() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/v1/users")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("Missing"));
}

#[tokio::test]
async fn test_gate_rejects_malformed_header() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/v1/users")
        .header("Authorization", "Token abc")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_gate_accepts_access_token() {
    let app = TestApp::spawn().await;
    let login = app
        .register_and_login("alice@example.com", "pass_word!")
        .await;

    let response = app
        .get_authenticated("/v1/users", login["access_token"].as_str().unwrap())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_gate_rejects_refresh_token() {
    let app = TestApp::spawn().await;
    let login = app
        .register_and_login("alice@example.com", "pass_word!")
        .await;

    let response = app
        .get_authenticated("/v1/users", login["refresh_token"].as_str().unwrap())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_gate_rejects_expired_and_foreign_tokens() {
    let app = TestApp::spawn().await;
    let login = app
        .register_and_login("alice@example.com", "pass_word!")
        .await;
    let identity = Identity::new(
        login["user_id"].as_i64().unwrap(),
        "alice@example.com",
        "user",
    );

    let past = Arc::new(ManualClock::new(Utc::now() - Duration::hours(1)));
    let (expired, _) = JwtHandler::new(&common::test_secret())
        .with_clock(past)
        .issue_access(&identity)
        .unwrap();

    let foreign_secret = SigningSecret::new("some-other-secret").unwrap();
    let (foreign, _) = JwtHandler::new(&foreign_secret)
        .issue_access(&identity)
        .unwrap();

    for token in [expired, foreign, "not.a.jwt".to_string()] {
        let response = app
            .get_authenticated("/v1/users", &token)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Invalid or expired token");
    }
}

#[tokio::test]
async fn test_refresh_issues_new_pair() {
    let app = TestApp::spawn().await;
    let login = app
        .register_and_login("alice@example.com", "pass_word!")
        .await;

    let response = app
        .post("/v1/refresh")
        .json(&json!({ "refresh_token": login["refresh_token"] }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    let access_token = body["data"]["access_token"].as_str().unwrap();
    assert!(body["data"]["refresh_token"].is_string());
    assert!(body["data"]["expires_in"].is_i64());

    let response = app
        .get_authenticated("/v1/users", access_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = TestApp::spawn().await;
    let login = app
        .register_and_login("alice@example.com", "pass_word!")
        .await;

    let response = app
        .post("/v1/refresh")
        .json(&json!({ "refresh_token": login["access_token"] }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_after_user_deleted() {
    let app = TestApp::spawn().await;
    let login = app
        .register_and_login("alice@example.com", "pass_word!")
        .await;
    let access_token = login["access_token"].as_str().unwrap();

    let response = app
        .delete_authenticated(&format!("/v1/users/{}", login["user_id"]), access_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .post("/v1/refresh")
        .json(&json!({ "refresh_token": login["refresh_token"] }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_user_by_id_and_email() {
    let app = TestApp::spawn().await;
    let login = app
        .register_and_login("alice@example.com", "pass_word!")
        .await;
    let token = login["access_token"].as_str().unwrap();

    let response = app
        .get_authenticated(&format!("/v1/users/{}", login["user_id"]), token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["email"], "alice@example.com");

    let response = app
        .get_authenticated("/v1/users/email/alice@example.com", token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["id"], login["user_id"]);
}

#[tokio::test]
async fn test_get_user_not_found() {
    let app = TestApp::spawn().await;
    let login = app
        .register_and_login("alice@example.com", "pass_word!")
        .await;
    let token = login["access_token"].as_str().unwrap();

    let response = app
        .get_authenticated("/v1/users/999", token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .get_authenticated("/v1/users/email/nobody@example.com", token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .get_authenticated("/v1/users/abc", token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_password() {
    let app = TestApp::spawn().await;
    let login = app
        .register_and_login("alice@example.com", "pass_word!")
        .await;

    let response = app
        .patch_authenticated(
            &format!("/v1/users/{}", login["user_id"]),
            login["access_token"].as_str().unwrap(),
        )
        .json(&json!({ "password": "new_pass_word!" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .post("/v1/login")
        .json(&json!({ "email": "alice@example.com", "password": "pass_word!" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    app.login("alice@example.com", "new_pass_word!").await;
}

#[tokio::test]
async fn test_delete_user_not_found() {
    let app = TestApp::spawn().await;
    let login = app
        .register_and_login("alice@example.com", "pass_word!")
        .await;

    let response = app
        .delete_authenticated("/v1/users/999", login["access_token"].as_str().unwrap())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
