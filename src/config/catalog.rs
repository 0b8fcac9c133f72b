//! Catalog document locations

use serde::Deserialize;
use std::path::PathBuf;

/// Where the triage catalog documents live
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Symptom -> category map
    #[serde(default = "default_symptoms_path")]
    pub symptoms_path: PathBuf,

    /// Category -> facility map
    #[serde(default = "default_facilities_path")]
    pub facilities_path: PathBuf,

    /// Symptom -> diagnoses map; omit for text-only recommendations
    pub diagnoses_path: Option<PathBuf>,

    /// Colloquial -> canonical phrase map; omit to use the shipped rules
    pub normalization_path: Option<PathBuf>,

    /// Reject diagnosis keys that are not catalog symptoms
    #[serde(default = "default_strict_diagnoses")]
    pub strict_diagnoses: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            symptoms_path: default_symptoms_path(),
            facilities_path: default_facilities_path(),
            diagnoses_path: None,
            normalization_path: None,
            strict_diagnoses: default_strict_diagnoses(),
        }
    }
}

fn default_symptoms_path() -> PathBuf {
    PathBuf::from("data/symptoms.json")
}

fn default_facilities_path() -> PathBuf {
    PathBuf::from("data/facilities.json")
}

fn default_strict_diagnoses() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_defaults() {
        let config = CatalogConfig::default();
        assert_eq!(config.symptoms_path, PathBuf::from("data/symptoms.json"));
        assert!(config.diagnoses_path.is_none());
        assert!(config.strict_diagnoses);
    }

    #[test]
    fn test_catalog_deserialization() {
        let json = r#"{
            "symptoms_path": "/srv/bot/symptoms.json",
            "diagnoses_path": "/srv/bot/symptom_diagnosis.json",
            "strict_diagnoses": false
        }"#;

        let config: CatalogConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.symptoms_path, PathBuf::from("/srv/bot/symptoms.json"));
        assert_eq!(config.facilities_path, PathBuf::from("data/facilities.json"));
        assert!(config.diagnoses_path.is_some());
        assert!(!config.strict_diagnoses);
    }
}
