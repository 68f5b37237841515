use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for login and token validation.
///
/// Credential-related variants share one display string so callers
/// cannot tell an unknown identifier from a wrong secret.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown identifier, secret mismatch, or a token naming an unknown subject
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Token failed signature, structure, or expiry checks
    #[error("invalid credentials")]
    InvalidToken,

    #[error("Failed to issue token: {0}")]
    Signing(String),

    #[error("Credential store error: {0}")]
    Storage(String),
}

impl From<auth::PasswordError> for AuthError {
    fn from(err: auth::PasswordError) -> Self {
        AuthError::Storage(err.to_string())
    }
}
