use std::sync::Arc;

use async_trait::async_trait;

use crate::submission::errors::BrokerError;
use crate::submission::models::Action;
use crate::submission::models::Dispatched;
use crate::submission::models::Submission;
use crate::submission::models::AUTHENTICATED_MESSAGE;
use crate::submission::ports::AuthGateway;
use crate::submission::ports::BrokerServicePort;

/// Dispatches submissions to backend services.
pub struct BrokerService<AG>
where
    AG: AuthGateway,
{
    auth_gateway: Arc<AG>,
}

impl<AG> BrokerService<AG>
where
    AG: AuthGateway,
{
    pub fn new(auth_gateway: Arc<AG>) -> Self {
        Self { auth_gateway }
    }
}

#[async_trait]
impl<AG> BrokerServicePort for BrokerService<AG>
where
    AG: AuthGateway,
{
    async fn handle_submission(&self, submission: Submission) -> Result<Dispatched, BrokerError> {
        let action = Action::try_from(submission).map_err(|e| {
            tracing::warn!(error = ?e, "Submission rejected before dispatch");
            e
        })?;

        match action {
            Action::Auth(credentials) => {
                let data = self.auth_gateway.authenticate(&credentials).await?;

                Ok(Dispatched {
                    message: AUTHENTICATED_MESSAGE.to_string(),
                    data,
                })
            }
        }
    }
}
