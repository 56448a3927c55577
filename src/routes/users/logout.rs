use crate::account_service::AccountService;
use crate::authentication::{forbidden, reject_anonymous_users, SessionGrant};
use crate::routes::Confirmation;
use actix_web::cookie::Cookie;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{post, web, HttpResponse};
use actix_web_lab::middleware::from_fn;

#[post("/logout/{owner_id}", wrap = "from_fn(reject_anonymous_users)")]
#[tracing::instrument(name = "Logging out user", skip(service, grant))]
pub async fn log_out(
    owner_id: web::Path<String>,
    service: web::Data<AccountService>,
    grant: web::ReqData<SessionGrant>,
) -> Result<HttpResponse, actix_web::Error> {
    grant.authorize(&owner_id).map_err(forbidden)?;

    let teardown = service.end_session(&owner_id);

    let mut response = HttpResponse::Ok();
    response.insert_header((AUTHORIZATION, ""));
    for name in teardown.cookies {
        let mut cookie = Cookie::build(name, "").path("/").finish();
        cookie.make_removal();
        response.cookie(cookie);
    }
    Ok(response.json(Confirmation::new("Logout successful")))
}
