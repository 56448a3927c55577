use crate::helpers::{assert_failure, spawn_app, TestUser};
use uuid::Uuid;

#[tokio::test]
async fn you_must_be_logged_in_to_change_your_password() {
    let app = spawn_app().await;
    let new_password = Uuid::new_v4().to_string();

    let response = app
        .patch_password(
            &Uuid::new_v4().to_string(),
            &serde_json::json!({
                "oldPassword": &app.test_user.password,
                "newPassword": &new_password,
            }),
        )
        .await;

    let message = assert_failure(response, 403, "invalid_credentials").await;
    assert_eq!(message, "Forbidden resource");
}

#[tokio::test]
async fn changing_password_works() {
    let app = spawn_app().await;
    let login = app.login_test_user().await;
    let user_id = login["userId"].as_str().unwrap();
    let new_password = Uuid::new_v4().to_string();

    let response = app
        .patch_password(
            user_id,
            &serde_json::json!({
                "oldPassword": &app.test_user.password,
                "newPassword": &new_password,
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Password updated successfully");

    let old = app.post_login(&app.test_user.login_body()).await;
    assert_failure(old, 400, "invalid_credentials").await;
    let new = app
        .post_login(&serde_json::json!({
            "email": &app.test_user.email,
            "password": &new_password,
        }))
        .await;
    assert_eq!(new.status().as_u16(), 200);
}

#[tokio::test]
async fn current_password_must_be_valid() {
    let app = spawn_app().await;
    let login = app.login_test_user().await;
    let user_id = login["userId"].as_str().unwrap();

    let response = app
        .patch_password(
            user_id,
            &serde_json::json!({
                "oldPassword": "wrong-password",
                "newPassword": Uuid::new_v4().to_string(),
            }),
        )
        .await;

    let message = assert_failure(response, 400, "invalid_credentials").await;
    assert_eq!(message, "Invalid credentials");

    // The original password still works.
    let again = app.post_login(&app.test_user.login_body()).await;
    assert_eq!(again.status().as_u16(), 200);
}

#[tokio::test]
async fn a_blank_new_password_is_rejected() {
    let app = spawn_app().await;
    let login = app.login_test_user().await;
    let user_id = login["userId"].as_str().unwrap();

    let response = app
        .patch_password(
            user_id,
            &serde_json::json!({
                "oldPassword": &app.test_user.password,
                "newPassword": "",
            }),
        )
        .await;

    assert_failure(response, 400, "invalid_input").await;
}

#[tokio::test]
async fn a_session_cannot_change_another_accounts_password() {
    let app = spawn_app().await;
    let bob = TestUser::generate();
    assert_eq!(app.post_signup(&bob.signup_body()).await.status().as_u16(), 200);
    let bob_login: serde_json::Value = app
        .post_login(&bob.login_body())
        .await
        .json()
        .await
        .unwrap();
    let bob_id = bob_login["userId"].as_str().unwrap().to_owned();

    // The cookie jar now holds the test user's session.
    app.login_test_user().await;
    let response = app
        .patch_password(
            &bob_id,
            &serde_json::json!({
                "oldPassword": &bob.password,
                "newPassword": Uuid::new_v4().to_string(),
            }),
        )
        .await;

    assert_failure(response, 403, "invalid_credentials").await;
    assert_eq!(app.post_login(&bob.login_body()).await.status().as_u16(), 200);
}

#[tokio::test]
async fn a_session_outlives_the_password_change_it_authorised() {
    let app = spawn_app().await;
    let login = app.login_test_user().await;
    let user_id = login["userId"].as_str().unwrap();
    let token = login["token"].as_str().unwrap();
    let second_password = Uuid::new_v4().to_string();

    let first = app
        .patch_password_with_token(
            token,
            user_id,
            &serde_json::json!({
                "oldPassword": &app.test_user.password,
                "newPassword": &second_password,
            }),
        )
        .await;
    assert_eq!(first.status().as_u16(), 200);

    let second = app
        .patch_password_with_token(
            token,
            user_id,
            &serde_json::json!({
                "oldPassword": &second_password,
                "newPassword": Uuid::new_v4().to_string(),
            }),
        )
        .await;
    assert_eq!(second.status().as_u16(), 200);
}

#[tokio::test]
async fn registration_and_password_change_scenario() {
    let app = spawn_app().await;
    let alice = serde_json::json!({"name": "Alice", "email": "a@x.com", "password": "pw1"});
    assert_eq!(app.post_signup(&alice).await.status().as_u16(), 200);

    let login = app
        .post_login(&serde_json::json!({"email": "a@x.com", "password": "pw1"}))
        .await;
    assert_eq!(login.status().as_u16(), 200);
    let login: serde_json::Value = login.json().await.unwrap();
    let alice_id = login["userId"].as_str().unwrap();

    let wrong = app
        .post_login(&serde_json::json!({"email": "a@x.com", "password": "wrong"}))
        .await;
    assert_failure(wrong, 400, "invalid_credentials").await;

    let change = app
        .patch_password(
            alice_id,
            &serde_json::json!({"oldPassword": "pw1", "newPassword": "pw2"}),
        )
        .await;
    assert_eq!(change.status().as_u16(), 200);

    let old = app
        .post_login(&serde_json::json!({"email": "a@x.com", "password": "pw1"}))
        .await;
    assert_failure(old, 400, "invalid_credentials").await;
    let new = app
        .post_login(&serde_json::json!({"email": "a@x.com", "password": "pw2"}))
        .await;
    assert_eq!(new.status().as_u16(), 200);
}
