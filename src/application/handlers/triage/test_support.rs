//! Fixtures shared by the handler tests.

use indexmap::IndexMap;
use std::sync::Arc;

use crate::adapters::storage::InMemorySelectionStore;
use crate::domain::foundation::{ConversationId, MessageRef};
use crate::domain::triage::{
    DiagnosisIndex, FacilityDirectory, Keyboard, NormalizationRules, OutboundResponse,
    SymptomIndex, TriageCatalog,
};

/// Seven symptoms: two menu pages at the default page size.
pub fn catalog() -> Arc<TriageCatalog> {
    let symptoms: IndexMap<String, String> = [
        ("боль в животе", "Гастроэнтерология"),
        ("кашель", "Терапия"),
        ("высокая температура", "Терапия"),
        ("головная боль", "Неврология"),
        ("боль в груди", "Кардиология"),
        ("сыпь", "Дерматология"),
        ("насморк", "Терапия"),
    ]
    .into_iter()
    .map(|(a, b)| (a.to_string(), b.to_string()))
    .collect();

    let diagnoses: IndexMap<String, Vec<String>> = [
        ("боль в животе", vec!["Гастрит"]),
        ("кашель", vec!["ОРВИ", "Бронхит"]),
        ("насморк", vec!["ОРВИ"]),
    ]
    .into_iter()
    .map(|(s, ds)| (s.to_string(), ds.into_iter().map(String::from).collect()))
    .collect();

    let facilities: IndexMap<String, String> = [
        ("Гастроэнтерология", "Гастроцентр"),
        ("Терапия", "Поликлиника №3"),
        ("Неврология", "Неврологический центр"),
    ]
    .into_iter()
    .map(|(a, b)| (a.to_string(), b.to_string()))
    .collect();

    Arc::new(
        TriageCatalog::new(
            SymptomIndex::new(symptoms).unwrap(),
            Some(DiagnosisIndex::new(diagnoses)),
            FacilityDirectory::new(facilities),
            NormalizationRules::shipped(),
            true,
        )
        .unwrap(),
    )
}

pub fn store() -> Arc<InMemorySelectionStore> {
    Arc::new(InMemorySelectionStore::new())
}

pub fn conversation() -> ConversationId {
    ConversationId::new(1001)
}

pub fn message_ref() -> MessageRef {
    MessageRef::new(55)
}

/// Keyboard carried by a response, whichever kind it is.
pub fn keyboard_of(response: &OutboundResponse) -> &Keyboard {
    match response {
        OutboundResponse::TextMessage {
            keyboard: Some(keyboard),
            ..
        } => keyboard,
        OutboundResponse::KeyboardUpdate { keyboard, .. } => keyboard,
        other => panic!("response has no keyboard: {other:?}"),
    }
}

/// Body of a text response.
pub fn body_of(response: &OutboundResponse) -> &str {
    match response {
        OutboundResponse::TextMessage { body, .. } => body,
        other => panic!("not a text message: {other:?}"),
    }
}
