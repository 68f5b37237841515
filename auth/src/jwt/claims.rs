use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an access token.
///
/// Every field is required: a token without a subject or an expiry
/// fails to decode into this structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (the authenticated identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Build claims for `subject`, issued at `now` and valid for `validity`.
    ///
    /// # Arguments
    /// * `subject` - Identifier the token is issued for
    /// * `now` - Issuance instant
    /// * `validity` - Length of the validity window
    ///
    /// # Returns
    /// Claims with `exp = iat + validity`
    pub fn issue(subject: impl ToString, now: DateTime<Utc>, validity: Duration) -> Self {
        let iat = now.timestamp();

        Self {
            sub: subject.to_string(),
            iat,
            exp: iat + validity.num_seconds(),
        }
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// A token whose `exp` equals the current instant is already expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
