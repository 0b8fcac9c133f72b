//! TriageDispatcher - Routes inbound chat events to the triage handlers
//!
//! Every event yields zero or one outbound response. Events for different
//! conversations share nothing but the read-only catalog.

use std::sync::Arc;

use crate::domain::foundation::{ConversationId, MessageRef};
use crate::domain::triage::{
    BotCommand, ButtonAction, InboundEvent, OutboundResponse, SelectionLimits, TriageCatalog,
};
use crate::ports::SelectionStore;

use super::analyze_symptoms::{AnalyzeSymptomsCommand, AnalyzeSymptomsHandler};
use super::change_page::{ChangePageCommand, ChangePageHandler, PageDirection};
use super::complete_selection::{CompleteSelectionCommand, CompleteSelectionHandler};
use super::error::TriageError;
use super::start_selection::{StartSelectionCommand, StartSelectionHandler};
use super::toggle_symptom::{ToggleSymptomCommand, ToggleSymptomHandler};

pub struct TriageDispatcher {
    start: StartSelectionHandler,
    toggle: ToggleSymptomHandler,
    paging: ChangePageHandler,
    complete: CompleteSelectionHandler,
    analyze: AnalyzeSymptomsHandler,
}

impl TriageDispatcher {
    pub fn new(
        store: Arc<dyn SelectionStore>,
        catalog: Arc<TriageCatalog>,
        limits: SelectionLimits,
    ) -> Self {
        Self {
            start: StartSelectionHandler::new(store.clone(), catalog.clone(), limits),
            toggle: ToggleSymptomHandler::new(store.clone(), catalog.clone(), limits),
            paging: ChangePageHandler::new(store.clone(), catalog.clone(), limits),
            complete: CompleteSelectionHandler::new(store, catalog.clone()),
            analyze: AnalyzeSymptomsHandler::new(catalog),
        }
    }

    #[tracing::instrument(
        skip(self, event),
        fields(conversation_id = %event.conversation_id(), kind = event.kind())
    )]
    pub async fn handle(
        &self,
        event: InboundEvent,
    ) -> Result<Option<OutboundResponse>, TriageError> {
        match event {
            InboundEvent::Command {
                conversation_id,
                command: BotCommand::Start,
            } => self
                .start
                .handle(StartSelectionCommand { conversation_id })
                .await
                .map(Some),

            InboundEvent::FreeText {
                conversation_id,
                text,
            } => Ok(Some(self.analyze.handle(AnalyzeSymptomsCommand {
                conversation_id,
                text,
            }))),

            InboundEvent::ButtonPress {
                conversation_id,
                action,
                message_ref,
            } => match action {
                ButtonAction::Toggle(symptom) => {
                    self.toggle
                        .handle(ToggleSymptomCommand {
                            conversation_id,
                            message_ref,
                            symptom,
                        })
                        .await
                }
                ButtonAction::NextPage => {
                    self.page(conversation_id, message_ref, PageDirection::Next)
                        .await
                }
                ButtonAction::PrevPage => {
                    self.page(conversation_id, message_ref, PageDirection::Prev)
                        .await
                }
                ButtonAction::Done => {
                    self.complete
                        .handle(CompleteSelectionCommand { conversation_id })
                        .await
                }
            },
        }
    }

    async fn page(
        &self,
        conversation_id: ConversationId,
        message_ref: MessageRef,
        direction: PageDirection,
    ) -> Result<Option<OutboundResponse>, TriageError> {
        self.paging
            .handle(ChangePageCommand {
                conversation_id,
                message_ref,
                direction,
            })
            .await
    }
}
