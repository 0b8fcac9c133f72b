//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, lifecycle enums, errors)
//! - `triage` - Symptom matching, recommendation and menu selection

pub mod foundation;
pub mod triage;
