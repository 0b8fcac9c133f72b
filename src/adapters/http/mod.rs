//! HTTP adapters - Axum endpoint exposure.

pub mod webhook;

use std::time::Duration;

use axum::Router;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

pub use webhook::{webhook_routes, WebhookAppState};

/// Full application router with request tracing and a per-request timeout.
pub fn app_router(state: WebhookAppState, request_timeout: Duration) -> Router {
    webhook_routes()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}
