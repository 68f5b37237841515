use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::submission::errors::BrokerError;

/// Message attached to every successful authentication dispatch.
pub const AUTHENTICATED_MESSAGE: &str = "Authenticated!";

/// Raw submission as posted by an external caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Submission {
    pub action: String,
    #[serde(default)]
    pub auth: Option<Credentials>,
}

/// Login payload forwarded verbatim to the authentication service.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A submission resolved against the dispatch table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Auth(Credentials),
}

impl TryFrom<Submission> for Action {
    type Error = BrokerError;

    fn try_from(submission: Submission) -> Result<Self, Self::Error> {
        match submission.action.as_str() {
            "auth" => submission
                .auth
                .map(Action::Auth)
                .ok_or(BrokerError::MissingPayload("auth")),
            _ => Err(BrokerError::UnknownAction(submission.action)),
        }
    }
}

/// Successful dispatch result, re-wrapped under the broker's own message.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched {
    pub message: String,
    pub data: serde_json::Value,
}
