use crate::account_service::{AccountService, FailureKind};
use crate::authentication::SessionClaims;
use crate::routes::Failure;
use crate::utils::e500;
use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    error::InternalError,
    web, HttpMessage, HttpResponse,
};
use actix_web_lab::middleware::Next;
use secrecy::Secret;

pub const TOKEN_COOKIE: &str = "token";
pub const ACCOUNT_ID_COOKIE: &str = "userId";

/// How strictly guarded routes check the `token` cookie.
#[derive(serde::Deserialize, Copy, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GuardMode {
    /// Any non-empty `token` cookie is accepted, valid or not.
    Presence,
    /// The token must verify and belong to the account named in the path.
    #[default]
    Verified,
}

/// Left in the request extensions by [`reject_anonymous_users`].
#[derive(Clone, Debug)]
pub enum SessionGrant {
    Verified(SessionClaims),
    Unverified,
}

impl SessionGrant {
    /// Check that the session may act on behalf of `owner_id`.
    pub fn authorize(&self, owner_id: &str) -> Result<(), anyhow::Error> {
        match self {
            SessionGrant::Unverified => Ok(()),
            SessionGrant::Verified(claims) if claims.account_id.to_string() == owner_id => Ok(()),
            SessionGrant::Verified(claims) => Err(anyhow::anyhow!(
                "Session of account {} cannot act on account {}",
                claims.account_id,
                owner_id
            )),
        }
    }
}

pub fn forbidden(e: anyhow::Error) -> actix_web::Error {
    let response = HttpResponse::Forbidden().json(Failure::new(
        FailureKind::InvalidCredentials,
        "Forbidden resource",
    ));
    InternalError::from_response(e, response).into()
}

pub async fn reject_anonymous_users(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let token = match req.cookie(TOKEN_COOKIE) {
        Some(cookie) if !cookie.value().is_empty() => Secret::new(cookie.value().to_owned()),
        _ => return Err(forbidden(anyhow::anyhow!("The user has not logged in"))),
    };

    let mode = req
        .app_data::<web::Data<GuardMode>>()
        .map(|mode| *mode.get_ref())
        .unwrap_or_default();

    let grant = match mode {
        GuardMode::Presence => SessionGrant::Unverified,
        GuardMode::Verified => {
            let service = req
                .app_data::<web::Data<AccountService>>()
                .ok_or_else(|| e500("The account service is not registered"))?;
            let claims = service
                .verify_session(&token)
                .map_err(|e| forbidden(anyhow::Error::new(e)))?;
            SessionGrant::Verified(claims)
        }
    };

    req.extensions_mut().insert(grant);
    next.call(req).await
}
