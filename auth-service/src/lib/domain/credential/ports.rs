use async_trait::async_trait;

use crate::credential::errors::AuthError;
use crate::credential::models::AuthenticatedUser;
use crate::credential::models::CredentialRecord;
use crate::credential::models::EmailAddress;
use crate::credential::models::LoginCommand;

/// Port for authentication operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Exchange credentials for a signed, time-limited token.
    ///
    /// # Arguments
    /// * `command` - Identifier and plaintext secret
    ///
    /// # Returns
    /// Display attributes of the subject plus a fresh token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown identifier or wrong secret (indistinguishable)
    /// * `Signing` - Token could not be signed
    /// * `Storage` - Credential store unavailable
    async fn login(&self, command: LoginCommand) -> Result<AuthenticatedUser, AuthError>;

    /// Check a token and resolve its subject.
    ///
    /// # Arguments
    /// * `token` - Token string previously issued by `login`
    ///
    /// # Returns
    /// Current display attributes of the subject with the token echoed back
    ///
    /// # Errors
    /// * `InvalidToken` - Signature, structure, subject shape, or expiry check failed
    /// * `InvalidCredentials` - Subject no longer exists
    /// * `Storage` - Credential store unavailable
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// Read access to stored credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve the credential record for an email address.
    ///
    /// # Returns
    /// Optional record (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Lookup failed
    async fn find_by_email(&self, email: &EmailAddress)
        -> Result<Option<CredentialRecord>, AuthError>;

    /// Check a plaintext secret against the record's stored hash.
    ///
    /// # Returns
    /// `true` on match
    ///
    /// # Errors
    /// * `Storage` - Stored hash is unreadable
    async fn secret_matches(
        &self,
        record: &CredentialRecord,
        plaintext: &str,
    ) -> Result<bool, AuthError>;
}
