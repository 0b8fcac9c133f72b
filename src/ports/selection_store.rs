//! Selection Store Port - Interface for per-conversation menu state.
//!
//! Records are created by the start command, mutated by menu events and
//! deleted when a recommendation is delivered. Keys are independent: an
//! implementation must never let one conversation's update affect another.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::foundation::ConversationId;
use crate::domain::triage::SelectionSession;

/// Errors that can occur during selection store operations
#[derive(Debug, thiserror::Error)]
pub enum SelectionStoreError {
    #[error("Selection store unavailable: {0}")]
    Unavailable(String),
}

/// Mutation applied to a stored session under the store's per-key guarantee.
pub type SessionMutation<R> = Box<dyn FnOnce(&mut SelectionSession) -> R + Send>;

/// Port for storing selection sessions keyed by conversation
#[async_trait]
pub trait SelectionStore: Send + Sync {
    /// Load the session for a conversation, if one is active
    async fn get(
        &self,
        conversation_id: ConversationId,
    ) -> Result<Option<SelectionSession>, SelectionStoreError>;

    /// Create or replace the session for a conversation
    async fn set(&self, session: SelectionSession) -> Result<(), SelectionStoreError>;

    /// Delete the session, returning what was stored
    ///
    /// Completing a selection takes the session this way so two concurrent
    /// `done` presses cannot both produce a recommendation.
    async fn delete(
        &self,
        conversation_id: ConversationId,
    ) -> Result<Option<SelectionSession>, SelectionStoreError>;

    /// Atomically read, modify and write back one session
    ///
    /// # Returns
    /// The mutated session and the mutation's result, or `None` when no
    /// session exists (nothing is created).
    async fn update(
        &self,
        conversation_id: ConversationId,
        mutation: SessionMutation<bool>,
    ) -> Result<Option<(SelectionSession, bool)>, SelectionStoreError>;

    /// Delete sessions not updated since `cutoff`, returning how many
    async fn purge_idle(&self, cutoff: DateTime<Utc>) -> Result<usize, SelectionStoreError>;
}
