mod health;
mod users;

pub use health::health_check;
pub use users::{change_password, log_in, log_out, sign_up};

use crate::account_service::{AccountError, FailureKind};
use crate::utils::error_chain_fmt;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};

/// Body of every successful operation without a payload.
#[derive(serde::Serialize)]
pub struct Confirmation {
    success: bool,
    message: &'static str,
}

impl Confirmation {
    pub fn new(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

/// Body of every failed operation.
#[derive(serde::Serialize)]
pub struct Failure {
    success: bool,
    kind: FailureKind,
    message: String,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            kind,
            message: message.into(),
        }
    }
}

#[derive(thiserror::Error)]
pub enum UserRouteError {
    #[error("Invalid request body")]
    InvalidInput(#[source] anyhow::Error),
    #[error("{context}")]
    Account {
        context: &'static str,
        #[source]
        source: AccountError,
    },
}

impl UserRouteError {
    pub fn invalid_input(detail: String) -> Self {
        UserRouteError::InvalidInput(anyhow::anyhow!(detail))
    }

    /// Attach the generic message shown when the error is not client-facing.
    pub fn account(context: &'static str) -> impl FnOnce(AccountError) -> Self {
        move |source| UserRouteError::Account { context, source }
    }

    fn failure(&self) -> Failure {
        match self {
            UserRouteError::InvalidInput(_) => {
                Failure::new(FailureKind::InvalidInput, self.to_string())
            }
            UserRouteError::Account { source, .. } if source.is_client_facing() => {
                Failure::new(source.kind(), source.to_string())
            }
            UserRouteError::Account { context, source } => Failure::new(source.kind(), *context),
        }
    }
}

impl std::fmt::Debug for UserRouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for UserRouteError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.failure())
    }
}
