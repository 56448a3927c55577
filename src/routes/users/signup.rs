use crate::account_service::AccountService;
use crate::domains::{AccountEmail, AccountName, NewAccount, Password};
use crate::routes::{Confirmation, UserRouteError};
use actix_web::{post, web, HttpResponse};
use secrecy::Secret;

#[derive(serde::Deserialize)]
pub struct SignupData {
    name: String,
    email: String,
    password: Secret<String>,
}

impl TryFrom<SignupData> for NewAccount {
    type Error = String;

    fn try_from(value: SignupData) -> Result<Self, Self::Error> {
        let name = AccountName::parse(value.name)?;
        let email = AccountEmail::parse(value.email)?;
        let password = Password::parse(value.password)?;
        Ok(NewAccount {
            name,
            email,
            password,
        })
    }
}

#[post("/signup")]
#[tracing::instrument(
    name = "Signing up a new user",
    skip(body, service),
    fields(account_email = %body.email, account_name = %body.name)
)]
pub async fn sign_up(
    body: web::Json<SignupData>,
    service: web::Data<AccountService>,
) -> Result<HttpResponse, UserRouteError> {
    let new_account: NewAccount = body.0.try_into().map_err(UserRouteError::invalid_input)?;

    service
        .register(new_account)
        .await
        .map_err(UserRouteError::account("Error creating user"))?;

    Ok(HttpResponse::Ok().json(Confirmation::new("User created successfully")))
}
