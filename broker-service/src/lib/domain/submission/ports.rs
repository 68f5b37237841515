use async_trait::async_trait;

use crate::submission::errors::BrokerError;
use crate::submission::models::Credentials;
use crate::submission::models::Dispatched;
use crate::submission::models::Submission;

/// Port for the broker's inbound dispatch.
#[async_trait]
pub trait BrokerServicePort: Send + Sync + 'static {
    /// Route a submission to the backend named by its action.
    ///
    /// # Arguments
    /// * `submission` - Action name plus the payload for that action
    ///
    /// # Returns
    /// Backend payload re-wrapped under the broker's own message
    ///
    /// # Errors
    /// * `UnknownAction` - No backend handles this action; nothing is contacted
    /// * `MissingPayload` - Action is known but its payload is absent
    /// * `InvalidCredentials` - Backend rejected the credentials
    /// * `Upstream` - Backend unreachable or answered unexpectedly
    async fn handle_submission(&self, submission: Submission) -> Result<Dispatched, BrokerError>;
}

/// Port for authentication-service communication (via HTTP).
#[async_trait]
pub trait AuthGateway: Send + Sync + 'static {
    /// Forward credentials to the authentication service's login operation.
    ///
    /// One call, no retry.
    ///
    /// # Returns
    /// The `data` payload of the downstream success envelope
    ///
    /// # Errors
    /// * `InvalidCredentials` - Downstream rejected the credentials
    /// * `Upstream` - Transport failure, unexpected status, or unreadable body
    async fn authenticate(&self, credentials: &Credentials)
        -> Result<serde_json::Value, BrokerError>;
}
