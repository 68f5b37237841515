use thiserror::Error;

/// Error for dispatching a broker submission.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BrokerError {
    #[error("unknown action")]
    UnknownAction(String),

    #[error("missing {0} payload")]
    MissingPayload(&'static str),

    #[error("invalid credentials")]
    InvalidCredentials,

    /// Transport failure or unexpected status from a backend
    #[error("error calling {service}")]
    Upstream { service: &'static str, reason: String },
}
