//! ChangePageHandler - Move the symptom menu one page forward or back

use std::sync::Arc;

use crate::domain::foundation::{ConversationId, MessageRef};
use crate::domain::triage::presenter::{render_page, NO_ACTIVE_SESSION_REPLY};
use crate::domain::triage::{OutboundResponse, SelectionLimits, SelectionSession, TriageCatalog};
use crate::ports::SelectionStore;

use super::error::TriageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Next,
    Prev,
}

#[derive(Debug, Clone)]
pub struct ChangePageCommand {
    pub conversation_id: ConversationId,
    pub message_ref: MessageRef,
    pub direction: PageDirection,
}

/// Handler for menu paging
///
/// Paging past either end leaves the session untouched and sends nothing.
pub struct ChangePageHandler {
    store: Arc<dyn SelectionStore>,
    catalog: Arc<TriageCatalog>,
    limits: SelectionLimits,
}

impl ChangePageHandler {
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
        cmd: ChangePageCommand,
    ) -> Result<Option<OutboundResponse>, TriageError> {
        let limits = self.limits;
        let total = self.catalog.symptoms().len();
        let direction = cmd.direction;
        let updated = self
            .store
            .update(
                cmd.conversation_id,
                Box::new(move |session: &mut SelectionSession| match direction {
                    PageDirection::Next => session.next_page(total, &limits),
                    PageDirection::Prev => session.prev_page(),
                }),
            )
            .await?;

        match updated {
            None => Ok(Some(OutboundResponse::text(
                cmd.conversation_id,
                NO_ACTIVE_SESSION_REPLY,
            ))),
            Some((_, false)) => Ok(None),
            Some((session, true)) => {
                let page = session.current_page(self.catalog.symptoms(), &self.limits);
                tracing::debug!(
                    conversation_id = %cmd.conversation_id,
                    page = page.page,
                    "Menu page changed"
                );
                Ok(Some(OutboundResponse::KeyboardUpdate {
                    conversation_id: cmd.conversation_id,
                    message_ref: cmd.message_ref,
                    keyboard: render_page(&page),
                }))
            }
        }
    }
}
