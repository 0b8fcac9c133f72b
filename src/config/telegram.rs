//! Telegram Bot API configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Telegram configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather (`123456:ABC...`)
    pub bot_token: SecretString,

    /// Bot API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Public base URL of this service; when set, the webhook is registered
    /// at startup
    pub webhook_url: Option<String>,

    /// Value Telegram echoes in `X-Telegram-Bot-Api-Secret-Token`
    pub webhook_secret: Option<SecretString>,

    /// Outbound request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl TelegramConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full webhook endpoint, if a public URL is configured
    pub fn webhook_endpoint(&self) -> Option<String> {
        self.webhook_url
            .as_ref()
            .map(|base| format!("{}/telegram/webhook", base.trim_end_matches('/')))
    }

    /// Validate Telegram configuration
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        let token = self.bot_token.expose_secret();
        if token.is_empty() {
            return Err(ValidationError::MissingRequired("TELEGRAM__BOT_TOKEN"));
        }
        let well_formed = token.split_once(':').is_some_and(|(id, key)| {
            !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) && !key.is_empty()
        });
        if !well_formed {
            return Err(ValidationError::InvalidBotToken);
        }

        if production && !self.api_base_url.starts_with("https://") {
            return Err(ValidationError::UrlMustBeHttps("api_base_url"));
        }
        if let Some(url) = &self.webhook_url {
            if !url.starts_with("https://") {
                return Err(ValidationError::UrlMustBeHttps("webhook_url"));
            }
        }

        match &self.webhook_secret {
            Some(secret) if !is_valid_secret(secret.expose_secret()) => {
                return Err(ValidationError::InvalidWebhookSecret);
            }
            None if production => return Err(ValidationError::WebhookSecretRequired),
            _ => {}
        }

        if self.timeout_secs == 0 {
            return Err(ValidationError::MustBePositive("telegram.timeout_secs"));
        }

        Ok(())
    }
}

/// Telegram accepts 1-256 characters from `[A-Za-z0-9_-]`.
fn is_valid_secret(secret: &str) -> bool {
    (1..=256).contains(&secret.len())
        && secret
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn default_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_timeout() -> u64 {
    10
}
