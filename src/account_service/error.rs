use crate::authentication::SessionTokenError;
use crate::credential_store::StoreError;
use crate::utils::error_chain_fmt;

/// Stable, machine-checkable failure classification.
#[derive(serde::Serialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Conflict,
    NotFound,
    InvalidCredentials,
    StoreUnavailable,
    Misconfiguration,
    InvalidInput,
    Internal,
}

#[derive(thiserror::Error)]
pub enum AccountError {
    #[error("User already exists")]
    Conflict(#[source] anyhow::Error),
    #[error("User not found")]
    NotFound(#[source] anyhow::Error),
    #[error("Invalid credentials")]
    InvalidCredentials(#[source] anyhow::Error),
    #[error("The credential store is unavailable")]
    StoreUnavailable(#[source] anyhow::Error),
    #[error("Misconfiguration")]
    Misconfiguration(#[source] anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl AccountError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AccountError::Conflict(_) => FailureKind::Conflict,
            AccountError::NotFound(_) => FailureKind::NotFound,
            AccountError::InvalidCredentials(_) => FailureKind::InvalidCredentials,
            AccountError::StoreUnavailable(_) => FailureKind::StoreUnavailable,
            AccountError::Misconfiguration(_) => FailureKind::Misconfiguration,
            AccountError::UnexpectedError(_) => FailureKind::Internal,
        }
    }

    /// Whether the `Display` text may be shown to the caller as is.
    pub fn is_client_facing(&self) -> bool {
        matches!(
            self,
            AccountError::Conflict(_)
                | AccountError::NotFound(_)
                | AccountError::InvalidCredentials(_)
        )
    }
}

impl std::fmt::Debug for AccountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<StoreError> for AccountError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail => AccountError::Conflict(anyhow::Error::new(e)),
            StoreError::Unavailable(_) => AccountError::StoreUnavailable(anyhow::Error::new(e)),
        }
    }
}

impl From<SessionTokenError> for AccountError {
    fn from(e: SessionTokenError) -> Self {
        AccountError::InvalidCredentials(anyhow::Error::new(e))
    }
}
