//! Telegram Bot API client.
//!
//! Implements `ChatTransport` over the HTTPS Bot API. The bot token is part of
//! every request URL, so it is kept in a `SecretString` and stripped from
//! reqwest errors before they are logged.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::config::TelegramConfig;
use crate::domain::triage::OutboundResponse;
use crate::ports::{ChatTransport, TransportError};

use super::update_types::{
    AnswerCallbackQueryRequest, ApiResponse, EditMessageReplyMarkupRequest, InlineKeyboardMarkup,
    SendMessageRequest, SetWebhookRequest,
};

/// Editing a keyboard into the state it already has is not a failure.
const NOT_MODIFIED: &str = "message is not modified";

const ALLOWED_UPDATES: &[&str] = &["message", "callback_query"];

pub struct TelegramBotApi {
    token: SecretString,
    api_base_url: String,
    http_client: reqwest::Client,
}

impl TelegramBotApi {
    /// Create a client from configuration.
    ///
    /// # Errors
    /// The HTTP client could not be built (TLS backend initialisation).
    pub fn new(config: &TelegramConfig) -> Result<Self, TransportError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| TransportError::Request(e.without_url().to_string()))?;

        Ok(Self {
            token: config.bot_token.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// Register the webhook endpoint with Telegram.
    pub async fn set_webhook(
        &self,
        url: &str,
        secret: Option<&SecretString>,
    ) -> Result<(), TransportError> {
        self.call(
            "setWebhook",
            &SetWebhookRequest {
                url,
                secret_token: secret.map(|s| s.expose_secret().as_str()),
                allowed_updates: ALLOWED_UPDATES,
            },
        )
        .await?;

        tracing::info!(url, "Telegram webhook registered");
        Ok(())
    }

    async fn call<P: Serialize + ?Sized>(
        &self,
        method: &'static str,
        payload: &P,
    ) -> Result<(), TransportError> {
        let url = format!(
            "{}/bot{}/{}",
            self.api_base_url,
            self.token.expose_secret(),
            method
        );

        let response = self
            .http_client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.without_url().to_string()))?;

        let status = response.status();
        let body: ApiResponse = response.json().await.map_err(|e| {
            TransportError::InvalidResponse(format!(
                "{} returned {} with unreadable body: {}",
                method,
                status,
                e.without_url()
            ))
        })?;

        if body.ok {
            return Ok(());
        }

        let description = body.description.unwrap_or_else(|| status.to_string());
        if description.contains(NOT_MODIFIED) {
            tracing::debug!(method, "Telegram reports message not modified");
            return Ok(());
        }

        tracing::error!(
            method,
            error_code = body.error_code,
            error = %description,
            "Telegram API call failed"
        );
        Err(TransportError::Rejected {
            method: method.to_string(),
            description,
        })
    }
}

#[async_trait]
impl ChatTransport for TelegramBotApi {
    async fn deliver(&self, response: &OutboundResponse) -> Result<(), TransportError> {
        match response {
            OutboundResponse::TextMessage {
                conversation_id,
                body,
                formatting,
                keyboard,
            } => {
                let mut request =
                    SendMessageRequest::new(conversation_id.as_i64(), body, *formatting);
                request.reply_markup = keyboard.as_ref().map(InlineKeyboardMarkup::from);
                self.call("sendMessage", &request).await
            }
            OutboundResponse::KeyboardUpdate {
                conversation_id,
                message_ref,
                keyboard,
            } => {
                self.call(
                    "editMessageReplyMarkup",
                    &EditMessageReplyMarkupRequest {
                        chat_id: conversation_id.as_i64(),
                        message_id: message_ref.as_i64(),
                        reply_markup: InlineKeyboardMarkup::from(keyboard),
                    },
                )
                .await
            }
        }
    }

    async fn acknowledge(&self, callback_id: &str) -> Result<(), TransportError> {
        self.call(
            "answerCallbackQuery",
            &AnswerCallbackQueryRequest {
                callback_query_id: callback_id,
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ConversationId, MessageRef};
    use crate::domain::triage::{Button, ButtonAction, Keyboard, TextFormat};
    use axum::extract::{Path, State};
    use axum::routing::post;
    use axum::{Json, Router};
    use std::sync::{Arc, Mutex};

    type Recorded = Arc<Mutex<Vec<(String, serde_json::Value)>>>;

    /// Local stand-in for api.telegram.org answering every call with `reply`.
    async fn fake_bot_api(reply: serde_json::Value) -> (String, Recorded) {
        let recorded: Recorded = Arc::default();
        let app = Router::new()
            .route(
                "/:token/:method",
                post(
                    |State((recorded, reply)): State<(Recorded, serde_json::Value)>,
                     Path((token, method)): Path<(String, String)>,
                     Json(body): Json<serde_json::Value>| async move {
                        recorded
                            .lock()
                            .unwrap()
                            .push((format!("{}/{}", token, method), body));
                        Json(reply)
                    },
                ),
            )
            .with_state((recorded.clone(), reply));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}", addr), recorded)
    }

    fn client(base_url: String) -> TelegramBotApi {
        TelegramBotApi::new(&TelegramConfig {
            bot_token: SecretString::new("123:abc".to_string()),
            api_base_url: base_url,
            webhook_url: None,
            webhook_secret: None,
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn send_message_posts_markdown_with_keyboard() {
        let (base, recorded) = fake_bot_api(serde_json::json!({"ok": true, "result": {}})).await;
        let api = client(base);

        api.deliver(&OutboundResponse::TextMessage {
            conversation_id: ConversationId::new(42),
            body: "*Терапия*".to_string(),
            formatting: TextFormat::Markdown,
            keyboard: Some(Keyboard {
                rows: vec![vec![Button::new("✅ Готово", ButtonAction::Done)]],
            }),
        })
        .await
        .unwrap();

        let calls = recorded.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "bot123:abc/sendMessage");
        assert_eq!(calls[0].1["chat_id"], 42);
        assert_eq!(calls[0].1["parse_mode"], "Markdown");
        assert_eq!(
            calls[0].1["reply_markup"]["inline_keyboard"][0][0]["callback_data"],
            "done"
        );
    }

    #[tokio::test]
    async fn keyboard_update_edits_reply_markup() {
        let (base, recorded) = fake_bot_api(serde_json::json!({"ok": true, "result": true})).await;
        let api = client(base);

        api.deliver(&OutboundResponse::KeyboardUpdate {
            conversation_id: ConversationId::new(42),
            message_ref: MessageRef::new(9),
            keyboard: Keyboard::default(),
        })
        .await
        .unwrap();

        let calls = recorded.lock().unwrap();
        assert_eq!(calls[0].0, "bot123:abc/editMessageReplyMarkup");
        assert_eq!(calls[0].1["message_id"], 9);
    }

    #[tokio::test]
    async fn not_modified_is_success() {
        let (base, _) = fake_bot_api(serde_json::json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: message is not modified: specified new message content and reply markup are exactly the same"
        }))
        .await;

        assert!(client(base).acknowledge("cb-1").await.is_ok());
    }

    #[tokio::test]
    async fn rejection_carries_description() {
        let (base, _) = fake_bot_api(serde_json::json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found"
        }))
        .await;

        let err = client(base)
            .deliver(&OutboundResponse::text(ConversationId::new(1), "hi"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TransportError::Rejected { ref method, ref description }
                if method == "sendMessage" && description == "Bad Request: chat not found"
        ));
    }

    #[tokio::test]
    async fn unreachable_api_is_request_error_without_token() {
        let api = client("http://127.0.0.1:1".to_string());
        let err = api.acknowledge("cb-1").await.unwrap_err();
        assert!(matches!(err, TransportError::Request(_)));
        assert!(!err.to_string().contains("123:abc"));
    }

    #[tokio::test]
    async fn set_webhook_sends_secret_and_allowed_updates() {
        let (base, recorded) = fake_bot_api(serde_json::json!({"ok": true, "result": true})).await;
        let secret = SecretString::new("hook_secret".to_string());

        client(base)
            .set_webhook("https://bot.example.com/telegram/webhook", Some(&secret))
            .await
            .unwrap();

        let calls = recorded.lock().unwrap();
        assert_eq!(calls[0].0, "bot123:abc/setWebhook");
        assert_eq!(calls[0].1["secret_token"], "hook_secret");
        assert_eq!(
            calls[0].1["allowed_updates"],
            serde_json::json!(["message", "callback_query"])
        );
    }
}
