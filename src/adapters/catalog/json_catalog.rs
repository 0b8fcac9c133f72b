//! JSON Catalog Adapter
//!
//! Loads the triage catalog from JSON documents on disk. Object key order in
//! each document becomes the enumeration order of the index built from it.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::config::CatalogConfig;
use crate::domain::triage::{
    CatalogError, DiagnosisIndex, FacilityDirectory, NormalizationRules, SymptomIndex,
    TriageCatalog,
};

/// Loads a `TriageCatalog` from the configured documents
#[derive(Debug, Clone)]
pub struct JsonCatalogLoader {
    symptoms_path: PathBuf,
    facilities_path: PathBuf,
    diagnoses_path: Option<PathBuf>,
    normalization_path: Option<PathBuf>,
    strict_diagnoses: bool,
}

impl JsonCatalogLoader {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            symptoms_path: config.symptoms_path.clone(),
            facilities_path: config.facilities_path.clone(),
            diagnoses_path: config.diagnoses_path.clone(),
            normalization_path: config.normalization_path.clone(),
            strict_diagnoses: config.strict_diagnoses,
        }
    }

    /// Read, parse and validate every configured document
    ///
    /// # Errors
    /// Any missing or malformed document, or a catalog that fails validation.
    pub async fn load(&self) -> Result<TriageCatalog, CatalogError> {
        let symptoms = SymptomIndex::new(read_document(&self.symptoms_path).await?)?;
        let facilities = FacilityDirectory::new(read_document(&self.facilities_path).await?);

        let diagnoses = match &self.diagnoses_path {
            Some(path) => Some(DiagnosisIndex::new(read_document(path).await?)),
            None => None,
        };

        let rules = match &self.normalization_path {
            Some(path) => {
                let map: IndexMap<String, String> = read_document(path).await?;
                NormalizationRules::from_map(map)?
            }
            None => NormalizationRules::shipped(),
        };

        let catalog =
            TriageCatalog::new(symptoms, diagnoses, facilities, rules, self.strict_diagnoses)?;

        tracing::info!(
            symptoms = catalog.symptoms().len(),
            facilities = catalog.facilities().len(),
            diagnoses = catalog.diagnoses().map(DiagnosisIndex::len),
            rules = catalog.rules().len(),
            "Triage catalog loaded"
        );

        Ok(catalog)
    }
}

async fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let raw = fs::read_to_string(path).await.map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| CatalogError::Malformed {
        path: path.display().to_string(),
        source,
    })
}
