use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use envelope::Envelope;
use serde::Serialize;

use crate::submission::errors::BrokerError;

pub mod handle_submission;
pub mod reachability;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<Envelope<T>>);

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, envelope: Envelope<T>) -> Self {
        ApiSuccess(status, Json(envelope))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(Envelope::<()>::failure(message))).into_response()
    }
}

impl From<BrokerError> for ApiError {
    fn from(err: BrokerError) -> Self {
        match err {
            BrokerError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            // Upstream failures keep the generic client-error status
            BrokerError::UnknownAction(_)
            | BrokerError::MissingPayload(_)
            | BrokerError::Upstream { .. } => ApiError::BadRequest(err.to_string()),
        }
    }
}
