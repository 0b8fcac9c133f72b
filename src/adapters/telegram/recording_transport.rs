//! Recording chat transport for testing.
//!
//! Captures every delivered response and acknowledged callback instead of
//! calling the messenger. Failures can be injected to exercise error paths.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::triage::OutboundResponse;
use crate::ports::{ChatTransport, TransportError};

/// Transport double that records calls.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    inner: Arc<Mutex<RecordedCalls>>,
}

#[derive(Default)]
struct RecordedCalls {
    delivered: Vec<OutboundResponse>,
    acknowledged: Vec<String>,
    fail_deliveries: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent delivery fail.
    pub fn fail_deliveries(&self) {
        self.lock().fail_deliveries = true;
    }

    pub fn delivered(&self) -> Vec<OutboundResponse> {
        self.lock().delivered.clone()
    }

    pub fn acknowledged(&self) -> Vec<String> {
        self.lock().acknowledged.clone()
    }

    pub fn clear(&self) {
        let mut calls = self.lock();
        calls.delivered.clear();
        calls.acknowledged.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RecordedCalls> {
        // A panicking test thread must not hide what was recorded
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn deliver(&self, response: &OutboundResponse) -> Result<(), TransportError> {
        let mut calls = self.lock();
        if calls.fail_deliveries {
            return Err(TransportError::Request("injected failure".to_string()));
        }
        calls.delivered.push(response.clone());
        Ok(())
    }

    async fn acknowledge(&self, callback_id: &str) -> Result<(), TransportError> {
        self.lock().acknowledged.push(callback_id.to_string());
        Ok(())
    }
}
