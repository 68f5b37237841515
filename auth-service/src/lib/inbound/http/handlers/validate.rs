use axum::extract::State;
use axum::http::StatusCode;
use envelope::JsonBody;
use serde::Deserialize;

use super::logged_in_message;
use super::ApiError;
use super::ApiSuccess;
use super::AuthenticatedUserData;
use crate::credential::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn validate<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    JsonBody(body): JsonBody<ValidateRequestBody>,
) -> Result<ApiSuccess<AuthenticatedUserData>, ApiError> {
    let user = state.auth_service.validate(&body.token).await?;

    Ok(ApiSuccess::new(
        StatusCode::ACCEPTED,
        logged_in_message(&user),
        user.into(),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidateRequestBody {
    token: String,
}
