//! Triage command handlers.
//!
//! One handler per chat operation, with `TriageDispatcher` routing inbound
//! events to them.

mod analyze_symptoms;
mod change_page;
mod complete_selection;
mod dispatch_event;
mod error;
mod start_selection;
mod toggle_symptom;

#[cfg(test)]
pub(crate) mod test_support;

pub use analyze_symptoms::{AnalyzeSymptomsCommand, AnalyzeSymptomsHandler};
pub use change_page::{ChangePageCommand, ChangePageHandler, PageDirection};
pub use complete_selection::{CompleteSelectionCommand, CompleteSelectionHandler};
pub use dispatch_event::TriageDispatcher;
pub use error::TriageError;
pub use start_selection::{StartSelectionCommand, StartSelectionHandler};
pub use toggle_symptom::{ToggleSymptomCommand, ToggleSymptomHandler};
