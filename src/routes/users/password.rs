use crate::account_service::{AccountError, AccountService};
use crate::authentication::{forbidden, reject_anonymous_users, SessionGrant};
use crate::domains::{AccountId, Password};
use crate::routes::{Confirmation, UserRouteError};
use actix_web::{patch, web, HttpResponse};
use actix_web_lab::middleware::from_fn;
use secrecy::Secret;

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeData {
    old_password: Secret<String>,
    new_password: Secret<String>,
}

#[patch("/resetpwd/{owner_id}", wrap = "from_fn(reject_anonymous_users)")]
#[tracing::instrument(name = "Resetting a user's password", skip(body, service, grant))]
pub async fn change_password(
    owner_id: web::Path<String>,
    body: web::Json<PasswordChangeData>,
    service: web::Data<AccountService>,
    grant: web::ReqData<SessionGrant>,
) -> Result<HttpResponse, actix_web::Error> {
    grant.authorize(&owner_id).map_err(forbidden)?;

    let PasswordChangeData {
        old_password,
        new_password,
    } = body.into_inner();
    let new_password = Password::parse(new_password).map_err(UserRouteError::invalid_input)?;

    // No account can live under an id that does not parse.
    let account_id = AccountId::parse(&owner_id)
        .map_err(|e| AccountError::NotFound(anyhow::anyhow!(e)))
        .map_err(UserRouteError::account("Error updating password"))?;

    service
        .change_password(account_id, old_password, new_password)
        .await
        .map_err(UserRouteError::account("Error updating password"))?;

    Ok(HttpResponse::Ok().json(Confirmation::new("Password updated successfully")))
}
