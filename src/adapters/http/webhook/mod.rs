//! HTTP adapter for the Telegram webhook.
//!
//! Telegram POSTs each `Update` to `/telegram/webhook`; the handler resolves it
//! to an inbound event, runs it through the triage dispatcher and delivers the
//! reply over the chat transport before answering.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, HealthResponse};
pub use handlers::{handle_telegram_update, health, WebhookAppState};
pub use routes::webhook_routes;
