//! Application handlers.
//!
//! Command handlers that orchestrate domain operations over the ports.

pub mod triage;

pub use triage::{
    AnalyzeSymptomsCommand, AnalyzeSymptomsHandler, ChangePageCommand, ChangePageHandler,
    CompleteSelectionCommand, CompleteSelectionHandler, PageDirection, StartSelectionCommand,
    StartSelectionHandler, ToggleSymptomCommand, ToggleSymptomHandler, TriageDispatcher,
    TriageError,
};
