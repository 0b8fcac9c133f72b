//! Triage catalog: the static indices the engine matches against.
//!
//! All indices are built once at startup and are read-only afterwards.
//! Enumeration order is the order entries were supplied in, which is the
//! document order of the source files.

use indexmap::IndexMap;
use thiserror::Error;

use super::events::{ButtonAction, MAX_ACTION_BYTES};
use super::normalizer::NormalizationRules;
use crate::domain::foundation::ValidationError;

/// Errors that make the catalog unusable. These are fatal at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog document {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog document {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Symptom index is empty")]
    EmptySymptomIndex,

    #[error("Symptom phrase cannot be empty")]
    EmptySymptom,

    #[error("Symptom '{0}' appears more than once after case-folding")]
    DuplicateSymptom(String),

    #[error("Symptom '{symptom}' is too long for a button action ({bytes} bytes, max {max})")]
    SymptomTooLong {
        symptom: String,
        bytes: usize,
        max: usize,
    },

    #[error("Diagnosis index has symptoms missing from the symptom index: {0:?}")]
    UnalignedDiagnoses(Vec<String>),

    #[error("Invalid normalization rules: {0}")]
    InvalidRules(#[from] ValidationError),
}

/// Canonical symptom phrase -> category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomIndex {
    entries: IndexMap<String, String>,
}

impl SymptomIndex {
    /// Builds the index, case-folding every symptom phrase.
    pub fn new(raw: IndexMap<String, String>) -> Result<Self, CatalogError> {
        if raw.is_empty() {
            return Err(CatalogError::EmptySymptomIndex);
        }

        let mut entries = IndexMap::with_capacity(raw.len());
        for (symptom, category) in raw {
            let symptom = fold(&symptom);
            if symptom.is_empty() {
                return Err(CatalogError::EmptySymptom);
            }

            let bytes = ButtonAction::Toggle(symptom.clone()).encode().len();
            if bytes > MAX_ACTION_BYTES {
                return Err(CatalogError::SymptomTooLong {
                    symptom,
                    bytes,
                    max: MAX_ACTION_BYTES,
                });
            }

            if entries.contains_key(&symptom) {
                return Err(CatalogError::DuplicateSymptom(symptom));
            }
            entries.insert(symptom, category);
        }

        Ok(Self { entries })
    }

    /// Category of a canonical symptom phrase.
    pub fn category_of(&self, symptom: &str) -> Option<&str> {
        self.entries.get(symptom).map(String::as_str)
    }

    pub fn contains(&self, symptom: &str) -> bool {
        self.entries.contains_key(symptom)
    }

    /// Symptom phrases in enumeration order.
    pub fn symptoms(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Symptom phrase at a position in enumeration order.
    pub fn symptom_at(&self, position: usize) -> Option<&str> {
        self.entries.get_index(position).map(|(s, _)| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Canonical symptom phrase -> ordered candidate diagnoses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiagnosisIndex {
    entries: IndexMap<String, Vec<String>>,
}

impl DiagnosisIndex {
    pub fn new(raw: IndexMap<String, Vec<String>>) -> Self {
        Self {
            entries: raw
                .into_iter()
                .map(|(symptom, diagnoses)| (fold(&symptom), diagnoses))
                .collect(),
        }
    }

    /// Diagnoses for a symptom; a symptom without an entry has none.
    pub fn diagnoses_for(&self, symptom: &str) -> &[String] {
        self.entries.get(symptom).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn symptoms(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Category -> facility description.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FacilityDirectory {
    entries: IndexMap<String, String>,
}

impl FacilityDirectory {
    pub fn new(raw: IndexMap<String, String>) -> Self {
        Self { entries: raw }
    }

    /// Facility for a category, if the directory has one.
    pub fn resolve(&self, category: &str) -> Option<&str> {
        self.entries.get(category).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Every static index the triage engine needs.
#[derive(Debug, Clone)]
pub struct TriageCatalog {
    symptoms: SymptomIndex,
    diagnoses: Option<DiagnosisIndex>,
    facilities: FacilityDirectory,
    rules: NormalizationRules,
}

impl TriageCatalog {
    /// Assembles a catalog.
    ///
    /// With `strict_diagnoses`, every diagnosis key must be a known symptom.
    /// Otherwise unaligned keys are kept and logged; they can never match.
    pub fn new(
        symptoms: SymptomIndex,
        diagnoses: Option<DiagnosisIndex>,
        facilities: FacilityDirectory,
        rules: NormalizationRules,
        strict_diagnoses: bool,
    ) -> Result<Self, CatalogError> {
        if let Some(diagnoses) = &diagnoses {
            let unaligned: Vec<String> = diagnoses
                .symptoms()
                .filter(|s| !symptoms.contains(s))
                .map(str::to_string)
                .collect();

            if !unaligned.is_empty() {
                if strict_diagnoses {
                    return Err(CatalogError::UnalignedDiagnoses(unaligned));
                }
                tracing::warn!(
                    unaligned = ?unaligned,
                    "Diagnosis index references symptoms missing from the symptom index"
                );
            }
        }

        Ok(Self {
            symptoms,
            diagnoses,
            facilities,
            rules,
        })
    }

    pub fn symptoms(&self) -> &SymptomIndex {
        &self.symptoms
    }

    /// `None` when the bot runs without a diagnosis subsystem.
    pub fn diagnoses(&self) -> Option<&DiagnosisIndex> {
        self.diagnoses.as_ref()
    }

    pub fn facilities(&self) -> &FacilityDirectory {
        &self.facilities
    }

    pub fn rules(&self) -> &NormalizationRules {
        &self.rules
    }
}

fn fold(phrase: &str) -> String {
    phrase.trim().to_lowercase()
}
