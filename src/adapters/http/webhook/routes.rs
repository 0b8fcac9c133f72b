//! Axum router for the webhook endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{handle_telegram_update, health, WebhookAppState};

/// Create the webhook router.
///
/// # Routes
/// - `POST /telegram/webhook` - Telegram updates (secret token checked)
/// - `GET /health` - Liveness with catalog sizes
pub fn webhook_routes() -> Router<WebhookAppState> {
    Router::new()
        .route("/telegram/webhook", post(handle_telegram_update))
        .route("/health", get(health))
}
