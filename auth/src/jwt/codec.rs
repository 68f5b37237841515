use std::collections::HashSet;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Validity window applied when none is configured.
pub const DEFAULT_TOKEN_VALIDITY_MINUTES: i64 = 60;

/// Signs claims into compact tokens and verifies them back.
///
/// Uses HS256 (HMAC with SHA-256) with a single shared secret. Holds no
/// mutable state, so one instance can be shared across request handlers.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validity: Duration,
    has_secret: bool,
}

impl TokenCodec {
    /// Create a new codec.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    /// * `validity` - Lifetime of every issued token
    ///
    /// # Returns
    /// TokenCodec configured with HS256
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - An empty secret is accepted here but every `encode` call fails
    pub fn new(secret: &[u8], validity: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            validity,
            has_secret: !secret.is_empty(),
        }
    }

    /// Create a codec with the default 60 minute validity window.
    pub fn with_default_validity(secret: &[u8]) -> Self {
        Self::new(secret, Duration::minutes(DEFAULT_TOKEN_VALIDITY_MINUTES))
    }

    /// Lifetime of issued tokens.
    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// Issue a signed token for `subject`.
    ///
    /// # Arguments
    /// * `subject` - Identifier the token is issued for
    /// * `now` - Issuance instant; the token expires at `now + validity`
    ///
    /// # Returns
    /// Compact JWT string
    ///
    /// # Errors
    /// * `Signing` - No secret is available or signing failed
    pub fn encode(&self, subject: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        if !self.has_secret {
            return Err(TokenError::Signing("signing secret is not configured".to_string()));
        }

        let claims = Claims::issue(subject, now, self.validity);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key).map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// Expiry is checked against `now` rather than the system clock:
    /// the token is accepted only while `now < exp`.
    ///
    /// # Arguments
    /// * `token` - JWT string to verify
    /// * `now` - Instant to check expiry against
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `Invalid` - Signature does not verify, token or claims are malformed
    /// * `Expired` - `now` is at or past the expiry
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims = HashSet::from(["sub".to_string(), "exp".to_string()]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => {
                        TokenError::Invalid("signature does not verify".to_string())
                    }
                    _ => TokenError::Invalid(e.to_string()),
                }
            })?;

        let claims = token_data.claims;
        if claims.is_expired(now.timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
