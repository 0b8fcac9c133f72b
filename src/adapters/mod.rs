//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `catalog` - JSON catalog documents loaded at startup
//! - `storage` - Selection session storage
//! - `telegram` - Bot API client and webhook update types
//! - `http` - Axum webhook and health endpoints

pub mod catalog;
pub mod http;
pub mod storage;
pub mod telegram;

pub use catalog::JsonCatalogLoader;
pub use storage::InMemorySelectionStore;
pub use telegram::{RecordingTransport, TelegramBotApi, WebhookSecret};
