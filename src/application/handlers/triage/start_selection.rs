//! StartSelectionHandler - Open the symptom menu for a conversation

use std::sync::Arc;

use crate::domain::foundation::ConversationId;
use crate::domain::triage::presenter::{render_page, MENU_PROMPT};
use crate::domain::triage::{
    OutboundResponse, SelectionLimits, SelectionSession, TextFormat, TriageCatalog,
};
use crate::ports::SelectionStore;

use super::error::TriageError;

/// Command issued by `/start`
#[derive(Debug, Clone)]
pub struct StartSelectionCommand {
    pub conversation_id: ConversationId,
}

/// Handler for opening (or reopening) the symptom menu
pub struct StartSelectionHandler {
    store: Arc<dyn SelectionStore>,
    catalog: Arc<TriageCatalog>,
    limits: SelectionLimits,
}

impl StartSelectionHandler {
    pub fn new(
        store: Arc<dyn SelectionStore>,
        catalog: Arc<TriageCatalog>,
        limits: SelectionLimits,
    ) -> Self {
        Self {
            store,
            catalog,
            limits,
        }
    }

    pub async fn handle(
        &self,
        cmd: StartSelectionCommand,
    ) -> Result<OutboundResponse, TriageError> {
        // 1. A restart discards whatever was selected before
        let existing = self.store.get(cmd.conversation_id).await?;

        // 2. Fresh session on the first page
        let session = SelectionSession::start(cmd.conversation_id);
        let page = session.current_page(self.catalog.symptoms(), &self.limits);
        self.store.set(session).await?;

        tracing::debug!(
            conversation_id = %cmd.conversation_id,
            restarted = existing.is_some(),
            "Selection started"
        );

        Ok(OutboundResponse::TextMessage {
            conversation_id: cmd.conversation_id,
            body: MENU_PROMPT.to_string(),
            formatting: TextFormat::Plain,
            keyboard: Some(render_page(&page)),
        })
    }
}
