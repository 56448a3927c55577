use crate::helpers::{assert_failure, spawn_app};
use std::time::Duration;

#[tokio::test]
async fn login_returns_a_token_and_sets_session_cookies() {
    let app = spawn_app().await;

    let response = app.post_login(&app.test_user.login_body()).await;

    assert_eq!(response.status().as_u16(), 200);
    let token_cookie = response
        .cookies()
        .find(|c| c.name() == "token")
        .expect("No token cookie was set");
    assert!(token_cookie.http_only());
    assert_eq!(token_cookie.max_age(), Some(Duration::from_secs(3600)));
    let token_value = token_cookie.value().to_owned();
    let account_cookie = response
        .cookies()
        .find(|c| c.name() == "userId")
        .expect("No userId cookie was set")
        .value()
        .to_owned();

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["token"], token_value.as_str());
    assert_eq!(body["userId"], account_cookie.as_str());
}

#[tokio::test]
async fn login_with_an_unknown_email_is_not_found() {
    let app = spawn_app().await;

    let response = app
        .post_login(&serde_json::json!({
            "email": "nobody@example.com",
            "password": "whatever"
        }))
        .await;

    let message = assert_failure(response, 400, "not_found").await;
    assert_eq!(message, "User not found");
}

#[tokio::test]
async fn login_with_a_wrong_password_is_rejected() {
    let app = spawn_app().await;

    let response = app
        .post_login(&serde_json::json!({
            "email": &app.test_user.email,
            "password": "wrong"
        }))
        .await;

    let message = assert_failure(response, 400, "invalid_credentials").await;
    assert_eq!(message, "Invalid credentials");
}

#[tokio::test]
async fn email_lookup_is_case_sensitive() {
    let app = spawn_app().await;

    let response = app
        .post_login(&serde_json::json!({
            "email": app.test_user.email.to_uppercase(),
            "password": &app.test_user.password
        }))
        .await;

    assert_failure(response, 400, "not_found").await;
}

#[tokio::test]
async fn login_with_a_malformed_body_is_invalid_input() {
    let app = spawn_app().await;

    let response = app
        .post_login(&serde_json::json!({ "email": &app.test_user.email }))
        .await;

    let message = assert_failure(response, 400, "invalid_input").await;
    // No parser output reaches the client.
    assert_eq!(message, "Invalid request body");
    assert!(!message.contains("missing field"));
}
