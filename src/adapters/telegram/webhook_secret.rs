//! Webhook secret token check.
//!
//! Telegram echoes the secret given to `setWebhook` in the
//! `X-Telegram-Bot-Api-Secret-Token` header of every delivery.

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Expected webhook secret; `None` accepts every delivery.
#[derive(Clone, Default)]
pub struct WebhookSecret(Option<SecretString>);

impl WebhookSecret {
    pub fn new(secret: Option<SecretString>) -> Self {
        Self(secret)
    }

    pub fn is_configured(&self) -> bool {
        self.0.is_some()
    }

    /// Constant-time comparison against the header value.
    pub fn verify(&self, provided: Option<&str>) -> bool {
        let Some(expected) = &self.0 else {
            return true;
        };
        let Some(provided) = provided else {
            return false;
        };
        expected
            .expose_secret()
            .as_bytes()
            .ct_eq(provided.as_bytes())
            .into()
    }
}

impl std::fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("WebhookSecret")
            .field(&self.0.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
