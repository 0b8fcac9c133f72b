//! CompleteSelectionHandler - Turn the menu selection into a recommendation

use std::sync::Arc;

use crate::domain::foundation::ConversationId;
use crate::domain::triage::presenter::{render_recommendation, NO_ACTIVE_SESSION_REPLY};
use crate::domain::triage::{match_selection, OutboundResponse, TextFormat, TriageCatalog};
use crate::ports::SelectionStore;

use super::error::TriageError;

#[derive(Debug, Clone)]
pub struct CompleteSelectionCommand {
    pub conversation_id: ConversationId,
}

/// Handler for the done button
///
/// The session is taken out of the store before aggregation, so a second
/// press finds nothing and cannot produce a duplicate recommendation.
pub struct CompleteSelectionHandler {
    store: Arc<dyn SelectionStore>,
    catalog: Arc<TriageCatalog>,
}

impl CompleteSelectionHandler {
    pub fn new(store: Arc<dyn SelectionStore>, catalog: Arc<TriageCatalog>) -> Self {
        Self { store, catalog }
    }

    pub async fn handle(
        &self,
        cmd: CompleteSelectionCommand,
    ) -> Result<Option<OutboundResponse>, TriageError> {
        let Some(session) = self.store.delete(cmd.conversation_id).await? else {
            return Ok(Some(OutboundResponse::text(
                cmd.conversation_id,
                NO_ACTIVE_SESSION_REPLY,
            )));
        };

        if !session.can_complete() {
            // Done is never rendered for an empty selection; put it back
            self.store.set(session).await?;
            tracing::debug!(
                conversation_id = %cmd.conversation_id,
                "Done pressed with nothing selected, ignored"
            );
            return Ok(None);
        }

        let matched = match_selection(session.selected());
        let recommendation = self.catalog.recommend(&matched);

        tracing::info!(
            conversation_id = %cmd.conversation_id,
            symptoms = recommendation.symptoms.len(),
            referrals = recommendation.referrals.len(),
            "Selection completed"
        );

        Ok(Some(OutboundResponse::TextMessage {
            conversation_id: cmd.conversation_id,
            body: render_recommendation(&recommendation),
            formatting: TextFormat::Markdown,
            keyboard: None,
        }))
    }
}
