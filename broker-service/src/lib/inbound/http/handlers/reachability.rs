use axum::http::StatusCode;
use envelope::Envelope;

use super::ApiSuccess;

pub async fn reachability() -> ApiSuccess<serde_json::Value> {
    ApiSuccess::new(StatusCode::OK, Envelope::message("The broker is reachable"))
}
