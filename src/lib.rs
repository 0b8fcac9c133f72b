//! Triage Bot - Conversational symptom triage for Telegram
//!
//! Maps a patient's symptoms, typed freely or picked from a paginated menu,
//! to medical specialty categories, possible diagnoses and the facility that
//! handles each category.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
