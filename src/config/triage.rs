//! Menu and session configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::triage::{SelectionLimits, DEFAULT_MAX_SELECTED, DEFAULT_PAGE_SIZE};

/// Selection menu configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TriageConfig {
    /// Symptoms per menu page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Maximum symptoms selectable at once
    #[serde(default = "default_max_selected")]
    pub max_selected: usize,

    /// Evict sessions idle for this long; unset keeps them until done
    pub session_ttl_secs: Option<u64>,
}

impl TriageConfig {
    /// Menu limits for the selection handlers
    pub fn limits(&self) -> Result<SelectionLimits, ValidationError> {
        SelectionLimits::new(self.page_size, self.max_selected).map_err(|_| {
            if self.page_size == 0 {
                ValidationError::MustBePositive("triage.page_size")
            } else {
                ValidationError::MustBePositive("triage.max_selected")
            }
        })
    }

    /// Get session TTL as Duration
    pub fn session_ttl(&self) -> Option<Duration> {
        self.session_ttl_secs.map(Duration::from_secs)
    }

    /// Validate triage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.limits()?;
        if self.session_ttl_secs == Some(0) {
            return Err(ValidationError::MustBePositive("triage.session_ttl_secs"));
        }
        Ok(())
    }
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_selected: default_max_selected(),
            session_ttl_secs: None,
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_max_selected() -> usize {
    DEFAULT_MAX_SELECTED
}
