use async_trait::async_trait;
use envelope::Envelope;
use reqwest::StatusCode;

use crate::submission::errors::BrokerError;
use crate::submission::models::Credentials;
use crate::submission::ports::AuthGateway;

const SERVICE: &str = "auth service";

/// Calls the authentication service's login endpoint over HTTP.
pub struct HttpAuthGateway {
    client: reqwest::Client,
    authenticate_url: String,
}

impl HttpAuthGateway {
    /// # Arguments
    /// * `base_url` - Authentication service root, e.g. `http://auth-service`
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            authenticate_url: format!("{}/authenticate", base_url.trim_end_matches('/')),
        }
    }

    fn upstream(reason: impl ToString) -> BrokerError {
        BrokerError::Upstream {
            service: SERVICE,
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<serde_json::Value, BrokerError> {
        let response = self
            .client
            .post(&self.authenticate_url)
            .json(credentials)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url = %self.authenticate_url, error = %e, "Auth service unreachable");
                Self::upstream(e)
            })?;

        match response.status() {
            StatusCode::ACCEPTED => {}
            // The auth service reports credential failures on login as 400
            StatusCode::UNAUTHORIZED | StatusCode::BAD_REQUEST => {
                tracing::warn!(
                    email = %credentials.email,
                    status = response.status().as_u16(),
                    "Auth service rejected credentials"
                );
                return Err(BrokerError::InvalidCredentials);
            }
            status => {
                tracing::error!(status = status.as_u16(), "Unexpected status from auth service");
                return Err(Self::upstream(format!("unexpected status {}", status)));
            }
        }

        let envelope: Envelope = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Unreadable response from auth service");
            Self::upstream(e)
        })?;

        // A 202 carrying a logical error is still a rejection
        if envelope.error {
            tracing::warn!(message = %envelope.message, "Auth service returned an error envelope");
            return Err(BrokerError::InvalidCredentials);
        }

        Ok(envelope.data.unwrap_or(serde_json::Value::Null))
    }
}
