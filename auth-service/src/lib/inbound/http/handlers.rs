use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use envelope::Envelope;
use serde::Serialize;

use crate::credential::errors::AuthError;
use crate::credential::models::AuthenticatedUser;

pub mod login;
pub mod validate;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<Envelope<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        ApiSuccess(status, Json(Envelope::success(message, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(Envelope::<()>::failure(message))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::BadRequest(err.to_string()),
            AuthError::InvalidToken => ApiError::Unauthorized(err.to_string()),
            AuthError::Signing(_) => {
                ApiError::InternalServerError("failed to issue token".to_string())
            }
            AuthError::Storage(e) => {
                tracing::error!(error = %e, "Credential store failure");
                ApiError::InternalServerError("internal error".to_string())
            }
        }
    }
}

/// Subject attributes returned by both login and validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUserData {
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    pub token: String,
}

impl From<AuthenticatedUser> for AuthenticatedUserData {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            email: user.email.as_str().to_string(),
            first_name: user.first_name,
            last_name: user.last_name,
            token: user.token,
        }
    }
}

/// Message attached to every successful response.
pub(crate) fn logged_in_message(user: &AuthenticatedUser) -> String {
    format!("Logged in user {}", user.email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_errors_share_one_message() {
        let login = ApiError::from(AuthError::InvalidCredentials);
        let token = ApiError::from(AuthError::InvalidToken);

        assert_eq!(
            login,
            ApiError::BadRequest("invalid credentials".to_string())
        );
        assert_eq!(
            token,
            ApiError::Unauthorized("invalid credentials".to_string())
        );
    }

    #[test]
    fn test_internal_errors_do_not_leak_detail() {
        let err = ApiError::from(AuthError::Storage(
            "password authentication failed for user postgres".to_string(),
        ));
        assert_eq!(
            err,
            ApiError::InternalServerError("internal error".to_string())
        );

        let err = ApiError::from(AuthError::Signing("secret missing".to_string()));
        assert_eq!(
            err,
            ApiError::InternalServerError("failed to issue token".to_string())
        );
    }
}
