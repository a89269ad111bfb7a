mod common;

use auth::Claims;
use common::TestApp;
use common::ACCESS_TOKEN_MINUTES;
use reqwest::header::WWW_AUTHENTICATE;
use reqwest::Response;
use reqwest::StatusCode;
use serde_json::json;

/// Every rejected bearer token yields this exact response.
async fn assert_bearer_challenge(response: Response) {
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response
            .headers()
            .get(WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body,
        json!({ "status_code": 401, "data": { "message": "Invalid credentials." } })
    );
}

#[tokio::test]
async fn test_create_user_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "email": "Alice@Example.com",
            "password": "correct-horse"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let app = TestApp::spawn().await;
    app.register("alice@example.com", "correct-horse").await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "email": "ALICE@example.com",
            "password": "another-password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_create_user_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "email": "not-an-email",
            "password": "correct-horse"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("Invalid email"));
}

#[tokio::test]
async fn test_issue_token_success() {
    let app = TestApp::spawn().await;
    app.register("alice@example.com", "correct-horse").await;

    let response = app.request_token("alice@example.com", "correct-horse").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["expires_in"], ACCESS_TOKEN_MINUTES * 60);
    assert_eq!(
        body["access_token"].as_str().unwrap().split('.').count(),
        3
    );
}

#[tokio::test]
async fn test_issue_token_email_is_case_insensitive() {
    let app = TestApp::spawn().await;
    app.register("alice@example.com", "correct-horse").await;

    let response = app.request_token("Alice@Example.COM", "correct-horse").await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_issue_token_rejections_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("alice@example.com", "correct-horse").await;

    let wrong_password = app.request_token("alice@example.com", "wrong").await;
    let unknown_user = app.request_token("bob@example.com", "anything").await;

    for response in [wrong_password, unknown_user] {
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response
                .headers()
                .get(WWW_AUTHENTICATE)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer")
        );

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(
            body,
            json!({ "status_code": 401, "data": { "message": "Incorrect email or password" } })
        );
    }
}

#[tokio::test]
async fn test_get_current_user_success() {
    let app = TestApp::spawn().await;
    app.register("alice@example.com", "correct-horse").await;
    let token = app.login("alice@example.com", "correct-horse").await;

    let response = app
        .get_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["email"], "alice@example.com");
}

#[tokio::test]
async fn test_get_current_user_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/users/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_bearer_challenge(response).await;
}

#[tokio::test]
async fn test_get_current_user_with_wrong_scheme() {
    let app = TestApp::spawn().await;
    app.register("alice@example.com", "correct-horse").await;
    let token = app.login("alice@example.com", "correct-horse").await;

    let response = app
        .get("/api/users/me")
        .header("Authorization", format!("Token {}", token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_bearer_challenge(response).await;
}

#[tokio::test]
async fn test_get_current_user_with_tampered_token() {
    let app = TestApp::spawn().await;
    app.register("alice@example.com", "correct-horse").await;
    app.register("mallory@example.com", "mallory-password").await;
    let alice_token = app.login("alice@example.com", "correct-horse").await;
    let mallory_token = app.login("mallory@example.com", "mallory-password").await;

    // alice's payload under mallory's signature
    let alice_parts: Vec<&str> = alice_token.split('.').collect();
    let mallory_parts: Vec<&str> = mallory_token.split('.').collect();
    let spliced = format!(
        "{}.{}.{}",
        mallory_parts[0], alice_parts[1], mallory_parts[2]
    );

    let response = app
        .get_authenticated("/api/users/me", &spliced)
        .send()
        .await
        .expect("Failed to execute request");

    assert_bearer_challenge(response).await;
}

#[tokio::test]
async fn test_get_current_user_with_expired_token() {
    let app = TestApp::spawn().await;
    app.register("alice@example.com", "correct-horse").await;

    let token = app
        .authenticator
        .issue_token(
            &Claims::new().with_subject("alice@example.com"),
            chrono::Duration::minutes(-1),
        )
        .expect("Failed to issue token");

    let response = app
        .get_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_bearer_challenge(response).await;
}

#[tokio::test]
async fn test_get_current_user_with_token_without_subject() {
    let app = TestApp::spawn().await;

    let token = app
        .authenticator
        .issue_token(&Claims::new(), chrono::Duration::minutes(15))
        .expect("Failed to issue token");

    let response = app
        .get_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_bearer_challenge(response).await;
}

#[tokio::test]
async fn test_get_current_user_with_token_for_unknown_user() {
    let app = TestApp::spawn().await;

    let token = app
        .authenticator
        .issue_token(
            &Claims::new().with_subject("ghost@example.com"),
            chrono::Duration::minutes(15),
        )
        .expect("Failed to issue token");

    let response = app
        .get_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_bearer_challenge(response).await;
}

#[tokio::test]
async fn test_get_current_user_with_garbage_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/api/users/me", "invalid.token.here")
        .send()
        .await
        .expect("Failed to execute request");

    assert_bearer_challenge(response).await;
}
