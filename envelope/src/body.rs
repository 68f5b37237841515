use axum::async_trait;
use axum::body::Bytes;
use axum::extract::FromRequest;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::response::Envelope;

/// Body size cap applied when a service does not configure one (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1_048_576;

/// JSON request body holding exactly one value.
///
/// Reads through axum's `Bytes` extractor so the router's `DefaultBodyLimit`
/// caps the body before any parsing happens. Unlike `axum::Json` the
/// `Content-Type` header is not checked.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

/// Why a request body was refused. Always rendered as a 400 failure envelope.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JsonBodyRejection {
    #[error("request body too large")]
    TooLarge,

    #[error("failed to read request body: {0}")]
    Unreadable(String),

    #[error("{0}")]
    Invalid(String),

    #[error("body must have only a single JSON value")]
    MultipleValues,
}

impl IntoResponse for JsonBodyRejection {
    fn into_response(self) -> Response {
        tracing::warn!(reason = %self, "Malformed request body");

        (
            StatusCode::BAD_REQUEST,
            Json(Envelope::<()>::failure(self.to_string())),
        )
            .into_response()
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonBodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                JsonBodyRejection::TooLarge
            } else {
                JsonBodyRejection::Unreadable(rejection.body_text())
            }
        })?;

        parse_single_value(&bytes).map(JsonBody)
    }
}

/// Decode one JSON value and require nothing but whitespace after it.
pub fn parse_single_value<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, JsonBodyRejection> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);

    let value: T = serde::Deserialize::deserialize(&mut deserializer)
        .map_err(|e| JsonBodyRejection::Invalid(e.to_string()))?;

    deserializer
        .end()
        .map_err(|_| JsonBodyRejection::MultipleValues)?;

    Ok(value)
}
