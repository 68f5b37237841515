use axum::extract::State;
use axum::http::StatusCode;
use envelope::Envelope;
use envelope::JsonBody;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::submission::models::Submission;
use crate::submission::ports::BrokerServicePort;

pub async fn handle_submission<S: BrokerServicePort>(
    State(state): State<AppState<S>>,
    JsonBody(submission): JsonBody<Submission>,
) -> Result<ApiSuccess<serde_json::Value>, ApiError> {
    let dispatched = state.broker_service.handle_submission(submission).await?;

    Ok(ApiSuccess::new(
        StatusCode::ACCEPTED,
        Envelope::success(dispatched.message, dispatched.data),
    ))
}
