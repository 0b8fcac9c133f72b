//! Catalog Adapters
//!
//! Loading of the static triage indices at startup.

mod json_catalog;

pub use json_catalog::JsonCatalogLoader;
