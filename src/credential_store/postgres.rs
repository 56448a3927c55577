use super::{Account, AccountRecord, CredentialStore, StoreError};
use crate::domains::AccountId;
use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use secrecy::{ExposeSecret, Secret};
use sqlx::PgPool;
use uuid::Uuid;

const UNIQUE_VIOLATION: &str = "23505";

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    name: String,
    email: String,
    password_digest: String,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id.into(),
            name: row.name,
            email: row.email,
            password_digest: Secret::new(row.password_digest),
        }
    }
}

/// Accounts kept in the `accounts` table. Email uniqueness is enforced by
/// the table's UNIQUE constraint.
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(name = "Running credential store migrations", skip(self))]
    pub async fn migrate(&self) -> Result<(), anyhow::Error> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to migrate the database")
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => db_error.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    #[tracing::instrument(
        name = "Saving new account in the database",
        skip(self, record),
        fields(account_email = %record.email)
    )]
    async fn insert(&self, record: AccountRecord<'_>) -> Result<Account, StoreError> {
        let id = AccountId::generate();
        sqlx::query(
            r#"INSERT INTO accounts (id, name, email, password_digest, created_at)
            VALUES ($1, $2, $3, $4, $5)"#,
        )
        .bind(*id)
        .bind(record.name)
        .bind(record.email)
        .bind(record.password_digest.expose_secret())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                StoreError::DuplicateEmail
            } else {
                tracing::error!("Error happened while executing query :{:?}", err);
                StoreError::Unavailable(anyhow::Error::new(err).context("Failed to insert account"))
            }
        })?;

        Ok(Account {
            id,
            name: record.name.to_owned(),
            email: record.email.to_owned(),
            password_digest: record.password_digest.clone(),
        })
    }

    #[tracing::instrument(name = "Fetch stored account by email", skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"SELECT id, name, email, password_digest FROM accounts WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to retrieve account")
        .map_err(StoreError::Unavailable)?;
        Ok(row.map(Account::from))
    }

    #[tracing::instrument(name = "Fetch stored account by id", skip(self))]
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"SELECT id, name, email, password_digest FROM accounts WHERE id = $1"#,
        )
        .bind(*id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to retrieve account")
        .map_err(StoreError::Unavailable)?;
        Ok(row.map(Account::from))
    }

    #[tracing::instrument(name = "Update stored password digest", skip(self, password_digest))]
    async fn update_password_digest(
        &self,
        id: AccountId,
        password_digest: &Secret<String>,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"UPDATE accounts
    SET password_digest = $1
    WHERE id = $2"#,
        )
        .bind(password_digest.expose_secret())
        .bind(*id)
        .execute(&self.pool)
        .await
        .context("Failed to change account's password")
        .map_err(StoreError::Unavailable)?;
        Ok(result.rows_affected() == 1)
    }
}
