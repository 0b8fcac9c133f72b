//! AnalyzeSymptomsHandler - Free-text symptom analysis

use std::sync::Arc;

use crate::domain::foundation::ConversationId;
use crate::domain::triage::presenter::{render_recommendation, UNRECOGNIZED_REPLY};
use crate::domain::triage::{OutboundResponse, TextFormat, TriageCatalog, TriageOutcome};

#[derive(Debug, Clone)]
pub struct AnalyzeSymptomsCommand {
    pub conversation_id: ConversationId,
    pub text: String,
}

/// Handler for free-text messages
///
/// Stateless: an open menu session for the same conversation is neither
/// read nor changed.
pub struct AnalyzeSymptomsHandler {
    catalog: Arc<TriageCatalog>,
}

impl AnalyzeSymptomsHandler {
    pub fn new(catalog: Arc<TriageCatalog>) -> Self {
        Self { catalog }
    }

    pub fn handle(&self, cmd: AnalyzeSymptomsCommand) -> OutboundResponse {
        match self.catalog.analyze_text(&cmd.text) {
            TriageOutcome::Recommended(recommendation) => {
                tracing::info!(
                    conversation_id = %cmd.conversation_id,
                    symptoms = recommendation.symptoms.len(),
                    "Free text recognized"
                );
                OutboundResponse::TextMessage {
                    conversation_id: cmd.conversation_id,
                    body: render_recommendation(&recommendation),
                    formatting: TextFormat::Markdown,
                    keyboard: None,
                }
            }
            TriageOutcome::Unrecognized => {
                tracing::debug!(conversation_id = %cmd.conversation_id, "Free text not recognized");
                OutboundResponse::text(cmd.conversation_id, UNRECOGNIZED_REPLY)
            }
        }
    }
}
