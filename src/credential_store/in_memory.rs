use super::{Account, AccountRecord, CredentialStore, StoreError};
use crate::domains::AccountId;
use async_trait::async_trait;
use secrecy::Secret;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Accounts {
    by_id: HashMap<AccountId, Account>,
    id_by_email: HashMap<String, AccountId>,
}

/// Process-local store for development and tests.
///
/// The email check and the insert happen under a single write lock.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    accounts: RwLock<Accounts>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    #[tracing::instrument(
        name = "Saving new account in memory",
        skip(self, record),
        fields(account_email = %record.email)
    )]
    async fn insert(&self, record: AccountRecord<'_>) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.id_by_email.contains_key(record.email) {
            return Err(StoreError::DuplicateEmail);
        }
        let account = Account {
            id: AccountId::generate(),
            name: record.name.to_owned(),
            email: record.email.to_owned(),
            password_digest: record.password_digest.clone(),
        };
        accounts
            .id_by_email
            .insert(account.email.clone(), account.id);
        accounts.by_id.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .id_by_email
            .get(email)
            .and_then(|id| accounts.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.read().await.by_id.get(&id).cloned())
    }

    async fn update_password_digest(
        &self,
        id: AccountId,
        password_digest: &Secret<String>,
    ) -> Result<bool, StoreError> {
        let mut accounts = self.accounts.write().await;
        match accounts.by_id.get_mut(&id) {
            Some(account) => {
                account.password_digest = password_digest.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
