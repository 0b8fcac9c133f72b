//! Chat transport port for delivering responses to the messenger.
//!
//! The triage core produces `OutboundResponse` values; a transport turns them
//! into messenger API calls. Inbound parsing happens in the HTTP adapter, so
//! this port is outbound only.

use async_trait::async_trait;

use crate::domain::triage::OutboundResponse;

/// Errors that can occur while talking to the messenger.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Messenger request failed: {0}")]
    Request(String),

    #[error("Messenger rejected {method}: {description}")]
    Rejected { method: String, description: String },

    #[error("Unexpected messenger response: {0}")]
    InvalidResponse(String),
}

/// Port for outbound chat delivery.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Deliver one response (new message or in-place keyboard update).
    async fn deliver(&self, response: &OutboundResponse) -> Result<(), TransportError>;

    /// Acknowledge a button press so the client stops its loading indicator.
    async fn acknowledge(&self, callback_id: &str) -> Result<(), TransportError>;
}
