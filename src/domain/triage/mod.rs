//! Triage Domain Module
//!
//! The symptom-matching and recommendation engine.
//!
//! # Pipeline
//!
//! - **Normalizer**: rewrites colloquial phrasings into canonical symptoms
//! - **Matcher**: finds catalog symptoms in normalized text, or passes menu
//!   selections through
//! - **Aggregator**: collapses symptoms into categories, diagnoses and facilities
//! - **Selection**: per-conversation menu state with paging and a selection cap
//! - **Presenter**: renders pages and recommendations for the chat
//!
//! # Example
//!
//! ```ignore
//! match catalog.analyze_text("у меня болит живот") {
//!     TriageOutcome::Recommended(rec) => render_recommendation(&rec),
//!     TriageOutcome::Unrecognized => UNRECOGNIZED_REPLY.to_string(),
//! };
//! ```

pub mod catalog;
pub mod events;
pub mod matcher;
pub mod normalizer;
pub mod presenter;
pub mod recommendation;
pub mod response;
pub mod selection;

pub use catalog::{CatalogError, DiagnosisIndex, FacilityDirectory, SymptomIndex, TriageCatalog};
pub use events::{BotCommand, ButtonAction, InboundEvent, MAX_ACTION_BYTES};
pub use matcher::{match_selection, match_text, MatchedSymptoms};
pub use normalizer::{NormalizationRule, NormalizationRules};
pub use recommendation::{aggregate, Recommendation, Referral, TriageOutcome, FACILITY_NOT_FOUND};
pub use response::{Button, Keyboard, OutboundResponse, TextFormat};
pub use selection::{
    PageItem, SelectionLimits, SelectionSession, SymptomPage, ToggleOutcome, DEFAULT_MAX_SELECTED,
    DEFAULT_PAGE_SIZE,
};
