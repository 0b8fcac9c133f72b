//! Telegram messenger adapter.
//!
//! - `TelegramBotApi` implements the `ChatTransport` port over the Bot API
//! - `Update` parses webhook deliveries and resolves them to inbound events
//! - `WebhookSecret` checks the secret token header on each delivery
//! - `RecordingTransport` stands in for the Bot API in tests
//!
//! # Security
//!
//! - The bot token and webhook secret are held as `secrecy::SecretString`
//! - The secret token header is compared in constant time

mod bot_api;
mod recording_transport;
mod update_types;
mod webhook_secret;

pub use bot_api::TelegramBotApi;
pub use recording_transport::RecordingTransport;
pub use update_types::{CallbackQuery, Chat, InlineKeyboardMarkup, Message, ResolvedUpdate, Update};
pub use webhook_secret::{WebhookSecret, SECRET_TOKEN_HEADER};
