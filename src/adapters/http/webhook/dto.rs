//! Response bodies for the webhook endpoints.

use serde::Serialize;

/// Liveness and catalog sizes.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: &'static str,
    pub symptoms: usize,
    pub facilities: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnoses: Option<usize>,
    pub normalization_rules: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            code: "UNAUTHORIZED".to_string(),
            message: message.into(),
        }
    }
}
