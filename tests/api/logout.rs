use crate::helpers::{assert_failure, spawn_app};
use reqwest::header::AUTHORIZATION;

#[tokio::test]
async fn you_must_be_logged_in_to_log_out() {
    let app = spawn_app().await;

    let response = app.post_logout(&uuid::Uuid::new_v4().to_string()).await;

    assert_failure(response, 403, "invalid_credentials").await;
}

#[tokio::test]
async fn logout_clears_the_session_cookies() {
    let app = spawn_app().await;
    let login = app.login_test_user().await;
    let user_id = login["userId"].as_str().unwrap();

    let response = app.post_logout(user_id).await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers().get(AUTHORIZATION).map(|v| v.as_bytes()),
        Some(&b""[..])
    );
    for name in ["token", "userId"] {
        let cookie = response
            .cookies()
            .find(|c| c.name() == name)
            .unwrap_or_else(|| panic!("No removal cookie for {}", name));
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(std::time::Duration::ZERO));
    }
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Logout successful");

    // The cookie jar no longer presents a session.
    let after = app.post_logout(user_id).await;
    assert_failure(after, 403, "invalid_credentials").await;
}

#[tokio::test]
async fn a_copied_token_stays_valid_after_logout() {
    let app = spawn_app().await;
    let login = app.login_test_user().await;
    let user_id = login["userId"].as_str().unwrap();
    let token = login["token"].as_str().unwrap();

    assert_eq!(app.post_logout(user_id).await.status().as_u16(), 200);

    // Logout is client-side only; there is no server-side revocation.
    let replayed = app.post_logout_with_token(token, user_id).await;
    assert_eq!(replayed.status().as_u16(), 200);
}

#[tokio::test]
async fn logging_out_does_not_change_credentials() {
    let app = spawn_app().await;
    let login = app.login_test_user().await;
    let user_id = login["userId"].as_str().unwrap();

    assert_eq!(app.post_logout(user_id).await.status().as_u16(), 200);

    let again = app.post_login(&app.test_user.login_body()).await;
    assert_eq!(again.status().as_u16(), 200);
}
