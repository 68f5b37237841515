use std::sync::Arc;

use async_trait::async_trait;
use auth::TokenCodec;
use chrono::Utc;

use crate::credential::errors::AuthError;
use crate::credential::models::AuthenticatedUser;
use crate::credential::models::EmailAddress;
use crate::credential::models::LoginCommand;
use crate::credential::ports::AuthServicePort;
use crate::credential::ports::CredentialStore;

/// Domain service implementation for login and token validation.
///
/// Stateless apart from its injected collaborators: issued tokens are not
/// recorded anywhere, validity is signature plus expiry.
pub struct AuthService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    codec: Arc<TokenCodec>,
}

impl<CS> AuthService<CS>
where
    CS: CredentialStore,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential lookup and secret matching
    /// * `codec` - Token signing and verification
    pub fn new(store: Arc<CS>, codec: Arc<TokenCodec>) -> Self {
        Self { store, codec }
    }
}

#[async_trait]
impl<CS> AuthServicePort for AuthService<CS>
where
    CS: CredentialStore,
{
    async fn login(&self, command: LoginCommand) -> Result<AuthenticatedUser, AuthError> {
        let record = self
            .store
            .find_by_email(&command.email)
            .await?
            .ok_or_else(|| {
                tracing::warn!(email = %command.email, "Login for unknown identifier");
                AuthError::InvalidCredentials
            })?;

        let matches = self
            .store
            .secret_matches(&record, &command.password)
            .await
            .map_err(|e| {
                tracing::warn!(email = %command.email, error = %e, "Secret comparison failed");
                AuthError::InvalidCredentials
            })?;

        if !matches {
            tracing::warn!(email = %command.email, "Login with wrong secret");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .codec
            .encode(record.email.as_str(), Utc::now())
            .map_err(|e| {
                tracing::error!(email = %command.email, error = %e, "Token signing failed");
                AuthError::Signing(e.to_string())
            })?;

        tracing::info!(email = %record.email, "User logged in");

        Ok(AuthenticatedUser::new(record, token))
    }

    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.codec.decode(token, Utc::now()).map_err(|e| {
            tracing::warn!(error = %e, "Token rejected");
            AuthError::InvalidToken
        })?;

        let email = EmailAddress::new(claims.sub).map_err(|e| {
            tracing::warn!(error = %e, "Token subject is not an email address");
            AuthError::InvalidToken
        })?;

        let record = self.store.find_by_email(&email).await?.ok_or_else(|| {
            tracing::warn!(email = %email, "Token subject no longer exists");
            AuthError::InvalidCredentials
        })?;

        Ok(AuthenticatedUser::new(record, token.to_string()))
    }
}
