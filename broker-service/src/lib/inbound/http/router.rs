use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::http::Response;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::handle_submission::handle_submission;
use super::handlers::reachability::reachability;
use crate::submission::ports::BrokerServicePort;

pub struct AppState<S: BrokerServicePort> {
    pub broker_service: Arc<S>,
}

impl<S: BrokerServicePort> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            broker_service: Arc::clone(&self.broker_service),
        }
    }
}

pub fn create_router<S: BrokerServicePort>(broker_service: Arc<S>, max_body_bytes: usize) -> Router {
    let state = AppState { broker_service };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/", post(reachability))
        .route("/handle", post(handle_submission::<S>))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
