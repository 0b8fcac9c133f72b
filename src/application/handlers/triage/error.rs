//! Error type shared by the triage command handlers.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::SelectionStoreError;

#[derive(Debug, Error)]
pub enum TriageError {
    #[error("Selection store error: {0}")]
    Store(#[from] SelectionStoreError),
}

impl From<TriageError> for DomainError {
    fn from(err: TriageError) -> Self {
        match err {
            TriageError::Store(e) => DomainError::new(ErrorCode::SessionStoreError, e.to_string()),
        }
    }
}
