use axum::extract::State;
use axum::http::StatusCode;
use envelope::JsonBody;
use serde::Deserialize;

use super::logged_in_message;
use super::ApiError;
use super::ApiSuccess;
use super::AuthenticatedUserData;
use crate::credential::errors::AuthError;
use crate::credential::models::EmailAddress;
use crate::credential::models::LoginCommand;
use crate::credential::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn login<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    JsonBody(body): JsonBody<LoginRequestBody>,
) -> Result<ApiSuccess<AuthenticatedUserData>, ApiError> {
    // A malformed identifier cannot match any record
    let email = EmailAddress::new(body.email).map_err(|_| AuthError::InvalidCredentials)?;

    let user = state
        .auth_service
        .login(LoginCommand::new(email, body.password))
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::ACCEPTED,
        logged_in_message(&user),
        user.into(),
    ))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}
