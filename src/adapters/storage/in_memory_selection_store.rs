//! In-Memory Selection Store Adapter
//!
//! Keeps selection sessions in a process-wide map. Every read-modify-write
//! runs under the write lock, so interleaved events for one conversation
//! cannot lose updates.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::ConversationId;
use crate::domain::triage::SelectionSession;
use crate::ports::{SelectionStore, SelectionStoreError, SessionMutation};

/// In-memory storage for selection sessions
#[derive(Debug, Clone)]
pub struct InMemorySelectionStore {
    sessions: Arc<RwLock<HashMap<ConversationId, SelectionSession>>>,
}

impl InMemorySelectionStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get the number of active sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for InMemorySelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SelectionStore for InMemorySelectionStore {
    async fn get(
        &self,
        conversation_id: ConversationId,
    ) -> Result<Option<SelectionSession>, SelectionStoreError> {
        Ok(self.sessions.read().await.get(&conversation_id).cloned())
    }

    async fn set(&self, session: SelectionSession) -> Result<(), SelectionStoreError> {
        self.sessions
            .write()
            .await
            .insert(session.conversation_id, session);
        Ok(())
    }

    async fn delete(
        &self,
        conversation_id: ConversationId,
    ) -> Result<Option<SelectionSession>, SelectionStoreError> {
        Ok(self.sessions.write().await.remove(&conversation_id))
    }

    async fn update(
        &self,
        conversation_id: ConversationId,
        mutation: SessionMutation<bool>,
    ) -> Result<Option<(SelectionSession, bool)>, SelectionStoreError> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.get_mut(&conversation_id).map(|session| {
            let result = mutation(session);
            (session.clone(), result)
        }))
    }

    async fn purge_idle(&self, cutoff: DateTime<Utc>) -> Result<usize, SelectionStoreError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.updated_at >= cutoff);
        Ok(before - sessions.len())
    }
}
