use crate::account_service::{AccountService, Credentials};
use crate::authentication::{ACCOUNT_ID_COOKIE, SESSION_TTL_SECONDS, TOKEN_COOKIE};
use crate::routes::UserRouteError;
use actix_web::cookie::{time::Duration, Cookie};
use actix_web::{post, web, HttpResponse};
use secrecy::{ExposeSecret, Secret};

#[derive(serde::Deserialize)]
pub struct LoginData {
    email: String,
    password: Secret<String>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse<'a> {
    success: bool,
    message: &'static str,
    user_id: String,
    token: &'a str,
}

#[post("/login")]
#[tracing::instrument(
    name = "Logging in a user",
    skip(body, service),
    fields(account_email = %body.email, account_id = tracing::field::Empty)
)]
pub async fn log_in(
    body: web::Json<LoginData>,
    service: web::Data<AccountService>,
) -> Result<HttpResponse, UserRouteError> {
    let credentials = Credentials {
        email: body.0.email,
        password: body.0.password,
    };

    let session = service
        .authenticate(credentials)
        .await
        .map_err(UserRouteError::account("Error logging in"))?;

    tracing::Span::current().record("account_id", &tracing::field::display(&session.account_id));

    let token = session.token.expose_secret();
    let token_cookie = Cookie::build(TOKEN_COOKIE, token.as_str())
        .path("/")
        .http_only(true)
        .max_age(Duration::seconds(SESSION_TTL_SECONDS))
        .finish();
    let account_cookie = Cookie::build(ACCOUNT_ID_COOKIE, session.account_id.to_string())
        .path("/")
        .finish();

    Ok(HttpResponse::Ok()
        .cookie(token_cookie)
        .cookie(account_cookie)
        .json(LoginResponse {
            success: true,
            message: "Login successful",
            user_id: session.account_id.to_string(),
            token,
        }))
}
