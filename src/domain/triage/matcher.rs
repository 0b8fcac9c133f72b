//! Symptom matcher.
//!
//! Matching is plain substring containment against the symptom index; no
//! tokenization or stemming.

use indexmap::IndexSet;

use super::catalog::SymptomIndex;

/// Symptoms recognized in one request, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchedSymptoms {
    symptoms: IndexSet<String>,
}

impl MatchedSymptoms {
    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn contains(&self, symptom: &str) -> bool {
        self.symptoms.contains(symptom)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symptoms.iter().map(String::as_str)
    }
}

impl FromIterator<String> for MatchedSymptoms {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            symptoms: iter.into_iter().collect(),
        }
    }
}

/// Every index symptom that occurs in the normalized text, in index order.
pub fn match_text(normalized: &str, index: &SymptomIndex) -> MatchedSymptoms {
    index
        .symptoms()
        .filter(|symptom| normalized.contains(symptom))
        .map(str::to_string)
        .collect()
}

/// Menu selections are already canonical symptoms; they pass through in
/// selection order.
pub fn match_selection<'a, I>(selected: I) -> MatchedSymptoms
where
    I: IntoIterator<Item = &'a String>,
{
    selected.into_iter().cloned().collect()
}
