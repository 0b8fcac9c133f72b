//! Recommendation aggregator.
//!
//! Collapses matched symptoms into unique categories and diagnoses and
//! resolves each category to a facility.

use indexmap::IndexSet;
use serde::Serialize;

use super::catalog::{DiagnosisIndex, FacilityDirectory, SymptomIndex, TriageCatalog};
use super::matcher::MatchedSymptoms;

/// Shown in place of a facility when the directory has none for a category.
pub const FACILITY_NOT_FOUND: &str = "учреждение не найдено";

/// A category paired with where to seek care for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Referral {
    pub category: String,
    /// `None` when the facility directory has no entry for the category.
    pub facility: Option<String>,
}

impl Referral {
    /// Facility description, or the placeholder for a lookup miss.
    pub fn facility_or_placeholder(&self) -> &str {
        self.facility.as_deref().unwrap_or(FACILITY_NOT_FOUND)
    }
}

/// Aggregated result for a set of matched symptoms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub symptoms: Vec<String>,
    pub diagnoses: Vec<String>,
    pub referrals: Vec<Referral>,
    /// False when the catalog carries no diagnosis index.
    pub includes_diagnoses: bool,
}

/// Result of analyzing user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriageOutcome {
    Recommended(Recommendation),
    /// No symptom was recognized; the user should rephrase.
    Unrecognized,
}

/// Aggregates matched symptoms against the given indices.
///
/// Categories and diagnoses keep first-seen order. Lookup misses never abort
/// aggregation: a symptom without a category or diagnoses contributes
/// nothing, and a category without a facility keeps its place with no
/// facility attached. Without a diagnosis index the diagnosis step is skipped.
pub fn aggregate(
    matched: &MatchedSymptoms,
    symptoms: &SymptomIndex,
    diagnoses: Option<&DiagnosisIndex>,
    facilities: &FacilityDirectory,
) -> Recommendation {
    let categories: IndexSet<&str> = matched
        .iter()
        .filter_map(|symptom| symptoms.category_of(symptom))
        .collect();

    let diagnosis_set: IndexSet<&str> = match diagnoses {
        Some(index) => matched
            .iter()
            .flat_map(|symptom| index.diagnoses_for(symptom))
            .map(String::as_str)
            .collect(),
        None => IndexSet::new(),
    };

    let referrals = categories
        .into_iter()
        .map(|category| Referral {
            category: category.to_string(),
            facility: facilities.resolve(category).map(str::to_string),
        })
        .collect();

    Recommendation {
        symptoms: matched.iter().map(str::to_string).collect(),
        diagnoses: diagnosis_set.into_iter().map(str::to_string).collect(),
        referrals,
        includes_diagnoses: diagnoses.is_some(),
    }
}

impl TriageCatalog {
    /// Aggregates against this catalog's indices.
    pub fn recommend(&self, matched: &MatchedSymptoms) -> Recommendation {
        aggregate(matched, self.symptoms(), self.diagnoses(), self.facilities())
    }

    /// Full free-text path: normalize, match, aggregate.
    pub fn analyze_text(&self, input: &str) -> TriageOutcome {
        let normalized = self.rules().normalize(input);
        let matched = super::matcher::match_text(&normalized, self.symptoms());
        if matched.is_empty() {
            return TriageOutcome::Unrecognized;
        }
        TriageOutcome::Recommended(self.recommend(&matched))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::triage::matcher::match_selection;
    use crate::domain::triage::normalizer::NormalizationRules;
    use indexmap::IndexMap;

    fn catalog(with_diagnoses: bool) -> TriageCatalog {
        let symptoms: IndexMap<String, String> = [
            ("боль в животе", "Гастроэнтерология"),
            ("кашель", "Терапия"),
            ("высокая температура", "Терапия"),
            ("сыпь", "Дерматология"),
        ]
        .into_iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect();

        let diagnoses: IndexMap<String, Vec<String>> = [
            ("боль в животе", vec!["Гастрит", "Аппендицит"]),
            ("кашель", vec!["ОРВИ", "Бронхит"]),
            ("высокая температура", vec!["ОРВИ", "Грипп"]),
        ]
        .into_iter()
        .map(|(s, ds)| (s.to_string(), ds.into_iter().map(String::from).collect()))
        .collect();

        let facilities: IndexMap<String, String> = [
            ("Гастроэнтерология", "Гастроцентр на Ленина, 5"),
            ("Терапия", "Городская поликлиника №3"),
        ]
        .into_iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect();

        TriageCatalog::new(
            SymptomIndex::new(symptoms).unwrap(),
            with_diagnoses.then(|| DiagnosisIndex::new(diagnoses)),
            FacilityDirectory::new(facilities),
            NormalizationRules::shipped(),
            true,
        )
        .unwrap()
    }

    fn selected(items: &[&str]) -> MatchedSymptoms {
        let set: IndexSet<String> = items.iter().map(|s| s.to_string()).collect();
        match_selection(&set)
    }

    #[test]
    fn free_text_scenario_resolves_categories_facilities_and_diagnoses() {
        let outcome = catalog(true).analyze_text("у меня болит живот и кашляю");
        let TriageOutcome::Recommended(rec) = outcome else {
            panic!("expected a recommendation");
        };

        assert_eq!(rec.symptoms, vec!["боль в животе", "кашель"]);
        assert_eq!(rec.diagnoses, vec!["Гастрит", "Аппендицит", "ОРВИ", "Бронхит"]);
        assert_eq!(
            rec.referrals,
            vec![
                Referral {
                    category: "Гастроэнтерология".to_string(),
                    facility: Some("Гастроцентр на Ленина, 5".to_string()),
                },
                Referral {
                    category: "Терапия".to_string(),
                    facility: Some("Городская поликлиника №3".to_string()),
                },
            ]
        );
    }

    #[test]
    fn unrecognized_text_is_not_an_empty_recommendation() {
        assert_eq!(catalog(true).analyze_text("привет"), TriageOutcome::Unrecognized);
        assert_eq!(catalog(true).analyze_text(""), TriageOutcome::Unrecognized);
    }

    #[test]
    fn categories_and_diagnoses_are_deduplicated() {
        let rec = catalog(true).recommend(&selected(&["кашель", "высокая температура"]));
        assert_eq!(rec.referrals.len(), 1);
        assert_eq!(rec.referrals[0].category, "Терапия");
        assert_eq!(rec.diagnoses, vec!["ОРВИ", "Бронхит", "Грипп"]);
    }

    #[test]
    fn missing_facility_keeps_category_with_placeholder() {
        let rec = catalog(true).recommend(&selected(&["сыпь"]));
        assert_eq!(rec.referrals.len(), 1);
        assert_eq!(rec.referrals[0].category, "Дерматология");
        assert_eq!(rec.referrals[0].facility, None);
        assert_eq!(rec.referrals[0].facility_or_placeholder(), FACILITY_NOT_FOUND);
    }

    #[test]
    fn symptom_without_diagnoses_contributes_none() {
        let rec = catalog(true).recommend(&selected(&["сыпь"]));
        assert!(rec.diagnoses.is_empty());
        assert!(rec.includes_diagnoses);
    }

    #[test]
    fn unknown_selected_symptom_contributes_nothing() {
        let rec = catalog(true).recommend(&selected(&["икота", "кашель"]));
        assert_eq!(rec.referrals.len(), 1);
        assert_eq!(rec.diagnoses, vec!["ОРВИ", "Бронхит"]);
    }

    #[test]
    fn text_only_catalog_skips_diagnoses() {
        let rec = catalog(false).recommend(&selected(&["кашель"]));
        assert!(rec.diagnoses.is_empty());
        assert!(!rec.includes_diagnoses);
        assert_eq!(rec.referrals.len(), 1);
    }

    #[test]
    fn aggregation_is_deterministic() {
        let catalog = catalog(true);
        let matched = selected(&["сыпь", "кашель", "боль в животе"]);
        assert_eq!(catalog.recommend(&matched), catalog.recommend(&matched));
    }

    #[test]
    fn every_category_appears_exactly_once() {
        let catalog = catalog(true);
        let matched = selected(&["сыпь", "кашель", "высокая температура", "боль в животе"]);
        let rec = catalog.recommend(&matched);

        let mut categories: Vec<_> = rec.referrals.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(categories, vec!["Дерматология", "Терапия", "Гастроэнтерология"]);
        categories.dedup();
        assert_eq!(categories.len(), 3);
    }
}
