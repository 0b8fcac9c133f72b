//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SelectionStore` - Per-conversation menu state keyed by conversation id
//! - `ChatTransport` - Outbound delivery to the messenger

mod chat_transport;
mod selection_store;

pub use chat_transport::{ChatTransport, TransportError};
pub use selection_store::{SelectionStore, SelectionStoreError, SessionMutation};
