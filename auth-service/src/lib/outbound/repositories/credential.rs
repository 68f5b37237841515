use async_trait::async_trait;
use auth::PasswordHasher;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::credential::errors::AuthError;
use crate::credential::models::CredentialRecord;
use crate::credential::models::EmailAddress;
use crate::credential::ports::CredentialStore;

pub struct PostgresCredentialStore {
    pool: PgPool,
    password_hasher: PasswordHasher,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            password_hasher: PasswordHasher::new(),
        }
    }
}

#[derive(Debug, FromRow)]
struct CredentialRow {
    email: String,
    first_name: String,
    last_name: String,
    password: String,
}

impl TryFrom<CredentialRow> for CredentialRecord {
    type Error = AuthError;

    fn try_from(row: CredentialRow) -> Result<Self, Self::Error> {
        let email = EmailAddress::new(row.email)
            .map_err(|e| AuthError::Storage(format!("Stored email is invalid: {}", e)))?;

        Ok(CredentialRecord {
            email,
            first_name: row.first_name,
            last_name: row.last_name,
            password_hash: row.password,
        })
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<CredentialRecord>, AuthError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT email, first_name, last_name, password
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Storage(e.to_string()))?;

        row.map(CredentialRecord::try_from).transpose()
    }

    async fn secret_matches(
        &self,
        record: &CredentialRecord,
        plaintext: &str,
    ) -> Result<bool, AuthError> {
        Ok(self
            .password_hasher
            .verify(plaintext, &record.password_hash)?)
    }
}
