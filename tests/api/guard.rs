//! The two guard modes for routes that need a session.
//!
//! `presence` only checks that a non-empty `token` cookie was sent;
//! `verified` also checks signature, expiry and account ownership.

use crate::helpers::{assert_failure, spawn_app, spawn_app_with_guard};
use identity_service::authentication::GuardMode;
use uuid::Uuid;

async fn test_user_id(app: &crate::helpers::TestApp) -> String {
    let login = app.login_test_user().await;
    login["userId"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn presence_guard_accepts_any_non_empty_token() {
    let app = spawn_app_with_guard(GuardMode::Presence).await;
    let user_id = test_user_id(&app).await;
    let new_password = Uuid::new_v4().to_string();

    let response = app
        .patch_password_with_token(
            "not-a-real-token",
            &user_id,
            &serde_json::json!({
                "oldPassword": &app.test_user.password,
                "newPassword": &new_password,
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn presence_guard_rejects_an_empty_token() {
    let app = spawn_app_with_guard(GuardMode::Presence).await;
    let user_id = test_user_id(&app).await;

    let response = app.post_logout_with_token("", &user_id).await;

    assert_failure(response, 403, "invalid_credentials").await;
}

#[tokio::test]
async fn presence_guard_does_not_check_ownership() {
    let app = spawn_app_with_guard(GuardMode::Presence).await;

    let response = app
        .post_logout_with_token("anything", &Uuid::new_v4().to_string())
        .await;

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn presence_guard_still_requires_the_old_password() {
    let app = spawn_app_with_guard(GuardMode::Presence).await;
    let user_id = test_user_id(&app).await;

    let response = app
        .patch_password_with_token(
            "forged",
            &user_id,
            &serde_json::json!({
                "oldPassword": "wrong",
                "newPassword": "pw2",
            }),
        )
        .await;

    assert_failure(response, 400, "invalid_credentials").await;
}

#[tokio::test]
async fn presence_guard_reports_unknown_accounts_as_not_found() {
    let app = spawn_app_with_guard(GuardMode::Presence).await;

    let response = app
        .patch_password_with_token(
            "anything",
            "507f1f77bcf86cd799439011",
            &serde_json::json!({
                "oldPassword": "pw1",
                "newPassword": "pw2",
            }),
        )
        .await;

    let message = assert_failure(response, 400, "not_found").await;
    assert_eq!(message, "User not found");
}

#[tokio::test]
async fn verified_guard_rejects_forged_tokens() {
    let app = spawn_app().await;
    let user_id = test_user_id(&app).await;

    let response = app
        .patch_password_with_token(
            "not-a-real-token",
            &user_id,
            &serde_json::json!({
                "oldPassword": &app.test_user.password,
                "newPassword": Uuid::new_v4().to_string(),
            }),
        )
        .await;

    assert_failure(response, 403, "invalid_credentials").await;
    // The password was not changed.
    let again = app.post_login(&app.test_user.login_body()).await;
    assert_eq!(again.status().as_u16(), 200);
}

#[tokio::test]
async fn verified_guard_accepts_a_token_issued_at_login() {
    let app = spawn_app().await;
    let login = app.login_test_user().await;
    let user_id = login["userId"].as_str().unwrap();
    let token = login["token"].as_str().unwrap();

    let response = app.post_logout_with_token(token, user_id).await;

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn unknown_account_routes_are_not_found_rather_than_forbidden() {
    let app = spawn_app().await;

    for path in ["/users/nope", "/users/resetpwd", "/users/logout/a/b"] {
        let response = app
            .api_client
            .get(format!("{}{}", &app.address, path))
            .send()
            .await
            .expect("Failed to execute request.");

        assert_eq!(response.status().as_u16(), 404, "Unexpected status for {}", path);
    }
}
