//! Durable mapping from account identity to stored credential record.
//!
//! Implementations must enforce email uniqueness atomically: of two
//! concurrent inserts for the same email at most one succeeds and the
//! other reports [`StoreError::DuplicateEmail`].

mod in_memory;
mod postgres;

pub use in_memory::InMemoryCredentialStore;
pub use postgres::PgCredentialStore;

use crate::domains::AccountId;
use crate::utils::error_chain_fmt;
use async_trait::async_trait;
use secrecy::Secret;

/// A stored account and its password digest.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub password_digest: Secret<String>,
}

/// Everything needed to create an account; the store assigns the id.
pub struct AccountRecord<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_digest: &'a Secret<String>,
}

#[derive(thiserror::Error)]
pub enum StoreError {
    #[error("An account with this email already exists")]
    DuplicateEmail,
    #[error("The credential store is unavailable")]
    Unavailable(#[source] anyhow::Error),
}

impl std::fmt::Debug for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Create an account, failing with `DuplicateEmail` if the email is taken.
    async fn insert(&self, record: AccountRecord<'_>) -> Result<Account, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError>;

    /// Replace the password digest. Returns `false` when no account has `id`.
    async fn update_password_digest(
        &self,
        id: AccountId,
        password_digest: &Secret<String>,
    ) -> Result<bool, StoreError>;
}
