//! Registration, authentication, password changes and session teardown.
//!
//! The service holds no per-session state: every guarded request is
//! authenticated by its token alone, and the credential store is the only
//! shared mutable resource.

mod error;

pub use error::{AccountError, FailureKind};

use crate::authentication::{
    IssuedToken, PasswordHasher, SessionClaims, SessionIssuer, ACCOUNT_ID_COOKIE, TOKEN_COOKIE,
};
use crate::credential_store::{AccountRecord, CredentialStore};
use crate::domains::{AccountId, NewAccount, Password};
use crate::telemetry::spawn_blocking_with_tracing;
use anyhow::Context;
use secrecy::Secret;
use std::sync::Arc;

pub struct Credentials {
    pub email: String,
    pub password: Secret<String>,
}

/// Result of a successful authentication.
#[derive(Debug)]
pub struct Session {
    pub account_id: AccountId,
    pub token: Secret<String>,
    pub expires_at: i64,
}

/// Instruction for the transport layer when a session ends: the named
/// client-side values must be discarded. Nothing is revoked server-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTeardown {
    pub cookies: [&'static str; 2],
}

#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    issuer: SessionIssuer,
}

impl AccountService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: PasswordHasher,
        issuer: SessionIssuer,
    ) -> Self {
        Self {
            store,
            hasher,
            issuer,
        }
    }

    /// Create an account. Does not log the caller in.
    ///
    /// Duplicate emails are detected by the store's uniqueness guarantee, so
    /// of two concurrent registrations for one email exactly one succeeds.
    #[tracing::instrument(
        name = "Registering a new account",
        skip(self, new_account),
        fields(account_email = %new_account.email, account_id = tracing::field::Empty)
    )]
    pub async fn register(&self, new_account: NewAccount) -> Result<AccountId, AccountError> {
        let password_digest = self.hash(new_account.password).await?;

        let account = self
            .store
            .insert(AccountRecord {
                name: new_account.name.as_ref(),
                email: new_account.email.as_ref(),
                password_digest: &password_digest,
            })
            .await?;

        tracing::Span::current().record("account_id", &tracing::field::display(&account.id));
        tracing::info!("New account has been saved");
        Ok(account.id)
    }

    /// Exchange an email/password pair for a signed session token.
    #[tracing::instrument(
        name = "Authenticating an account",
        skip(self, credentials),
        fields(account_email = %credentials.email, account_id = tracing::field::Empty)
    )]
    pub async fn authenticate(&self, credentials: Credentials) -> Result<Session, AccountError> {
        let account = self.store.find_by_email(&credentials.email).await?;

        let account = match account {
            Some(account) => account,
            None => {
                let hasher = self.hasher.clone();
                let candidate = credentials.password;
                spawn_blocking_with_tracing(move || hasher.verify_against_dummy(&candidate))
                    .await
                    .context("Failed to spawn blocking task.")?;
                return Err(AccountError::NotFound(anyhow::anyhow!(
                    "No account is registered under this email"
                )));
            }
        };

        self.check_password(credentials.password, account.password_digest.clone())
            .await?;

        tracing::Span::current().record("account_id", &tracing::field::display(&account.id));
        let IssuedToken { token, expires_at } = self
            .issuer
            .issue(account.id, &account.email, &account.name)
            .context("Failed to issue a session token")?;

        Ok(Session {
            account_id: account.id,
            token,
            expires_at,
        })
    }

    /// Replace an account's password after re-verifying the old one.
    ///
    /// Tokens issued before the change stay valid until they expire.
    #[tracing::instrument(
        name = "Changing account password",
        skip(self, old_password, new_password)
    )]
    pub async fn change_password(
        &self,
        account_id: AccountId,
        old_password: Secret<String>,
        new_password: Password,
    ) -> Result<(), AccountError> {
        let account = self
            .store
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AccountError::NotFound(anyhow::anyhow!("Unknown account id")))?;

        self.check_password(old_password, account.password_digest)
            .await?;

        let password_digest = self.hash(new_password).await?;
        let updated = self
            .store
            .update_password_digest(account_id, &password_digest)
            .await?;
        if !updated {
            return Err(AccountError::NotFound(anyhow::anyhow!(
                "Account disappeared while changing its password"
            )));
        }

        tracing::info!("Password has been changed");
        Ok(())
    }

    /// End a session. Stateless: tells the transport what to discard and
    /// touches nothing durable.
    #[tracing::instrument(name = "Ending session", skip(self))]
    pub fn end_session(&self, account_id: &str) -> SessionTeardown {
        SessionTeardown {
            cookies: [TOKEN_COOKIE, ACCOUNT_ID_COOKIE],
        }
    }

    pub fn verify_session(&self, token: &Secret<String>) -> Result<SessionClaims, AccountError> {
        Ok(self.issuer.verify(token)?)
    }

    async fn hash(&self, password: Password) -> Result<Secret<String>, AccountError> {
        let hasher = self.hasher.clone();
        let password = password.into_secret();
        let digest = spawn_blocking_with_tracing(move || hasher.hash(&password))
            .await
            .context("Failed to spawn blocking task.")?
            .context("Failed to hash password")?;
        Ok(digest)
    }

    async fn check_password(
        &self,
        candidate: Secret<String>,
        digest: Secret<String>,
    ) -> Result<(), AccountError> {
        let hasher = self.hasher.clone();
        let matches = spawn_blocking_with_tracing(move || hasher.verify(&candidate, &digest))
            .await
            .context("Failed to spawn blocking task.")?;
        if matches {
            Ok(())
        } else {
            Err(AccountError::InvalidCredentials(anyhow::anyhow!(
                "Password does not match the stored digest"
            )))
        }
    }
}
