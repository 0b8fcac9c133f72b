//! ToggleSymptomHandler - Select or deselect one menu symptom

use std::sync::Arc;

use crate::domain::foundation::{ConversationId, MessageRef};
use crate::domain::triage::presenter::{render_page, NO_ACTIVE_SESSION_REPLY};
use crate::domain::triage::{OutboundResponse, SelectionLimits, SelectionSession, TriageCatalog};
use crate::ports::SelectionStore;

use super::error::TriageError;

/// Command issued by a symptom button
#[derive(Debug, Clone)]
pub struct ToggleSymptomCommand {
    pub conversation_id: ConversationId,
    pub message_ref: MessageRef,
    pub symptom: String,
}

/// Handler for symptom toggles
///
/// Toggling past the selection cap is silently ignored: no error and no
/// keyboard update.
pub struct ToggleSymptomHandler {
    store: Arc<dyn SelectionStore>,
    catalog: Arc<TriageCatalog>,
    limits: SelectionLimits,
}

impl ToggleSymptomHandler {
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
        cmd: ToggleSymptomCommand,
    ) -> Result<Option<OutboundResponse>, TriageError> {
        if !self.catalog.symptoms().contains(&cmd.symptom) {
            tracing::warn!(
                conversation_id = %cmd.conversation_id,
                symptom = %cmd.symptom,
                "Toggle for a symptom outside the catalog ignored"
            );
            return Ok(None);
        }

        let limits = self.limits;
        let symptom = cmd.symptom.clone();
        let updated = self
            .store
            .update(
                cmd.conversation_id,
                Box::new(move |session: &mut SelectionSession| {
                    session.toggle(&symptom, &limits).changed()
                }),
            )
            .await?;

        match updated {
            None => Ok(Some(OutboundResponse::text(
                cmd.conversation_id,
                NO_ACTIVE_SESSION_REPLY,
            ))),
            Some((_, false)) => {
                tracing::debug!(
                    conversation_id = %cmd.conversation_id,
                    max_selected = self.limits.max_selected,
                    "Selection cap reached, toggle ignored"
                );
                Ok(None)
            }
            Some((session, true)) => {
                let page = session.current_page(self.catalog.symptoms(), &self.limits);
                Ok(Some(OutboundResponse::KeyboardUpdate {
                    conversation_id: cmd.conversation_id,
                    message_ref: cmd.message_ref,
                    keyboard: render_page(&page),
                }))
            }
        }
    }
}
