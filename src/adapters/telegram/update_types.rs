//! Telegram Bot API wire types.
//!
//! Inbound `Update` payloads are parsed only as far as the bot needs and then
//! resolved into an `InboundEvent`. Outbound request bodies mirror the Bot API
//! method parameters.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ConversationId, MessageRef};
use crate::domain::triage::{ButtonAction, InboundEvent, Keyboard, TextFormat};

// ════════════════════════════════════════════════════════════════════════════════
// Inbound Updates
// ════════════════════════════════════════════════════════════════════════════════

/// One webhook delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    /// Absent when the originating message is too old for Telegram to attach.
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub data: Option<String>,
}

/// What an update means to the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUpdate {
    /// Button presses must be acknowledged even when ignored.
    pub callback_id: Option<String>,
    /// `None` for update kinds the bot does not handle.
    pub event: Option<InboundEvent>,
}

impl Update {
    pub fn resolve(self) -> ResolvedUpdate {
        if let Some(query) = self.callback_query {
            let event = resolve_callback(self.update_id, &query);
            return ResolvedUpdate {
                callback_id: Some(query.id),
                event,
            };
        }

        let event = self.message.and_then(|message| {
            let conversation_id = ConversationId::new(message.chat.id);
            message
                .text
                .map(|text| InboundEvent::from_text(conversation_id, text))
        });

        ResolvedUpdate {
            callback_id: None,
            event,
        }
    }
}

fn resolve_callback(update_id: i64, query: &CallbackQuery) -> Option<InboundEvent> {
    let message = query.message.as_ref()?;
    let data = query.data.as_deref()?;

    match data.parse::<ButtonAction>() {
        Ok(action) => Some(InboundEvent::ButtonPress {
            conversation_id: ConversationId::new(message.chat.id),
            action,
            message_ref: MessageRef::new(message.message_id),
        }),
        Err(e) => {
            tracing::warn!(update_id, data, error = %e, "Unrecognized callback data");
            None
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Outbound Requests
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl From<&Keyboard> for InlineKeyboardMarkup {
    fn from(keyboard: &Keyboard) -> Self {
        Self {
            inline_keyboard: keyboard
                .rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|button| InlineKeyboardButton {
                            text: button.label.clone(),
                            callback_data: button.action.encode(),
                        })
                        .collect()
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl<'a> SendMessageRequest<'a> {
    pub fn new(chat_id: i64, text: &'a str, format: TextFormat) -> Self {
        Self {
            chat_id,
            text,
            parse_mode: match format {
                TextFormat::Plain => None,
                TextFormat::Markdown => Some("Markdown"),
            },
            reply_markup: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EditMessageReplyMarkupRequest {
    pub chat_id: i64,
    pub message_id: i64,
    pub reply_markup: InlineKeyboardMarkup,
}

#[derive(Debug, Serialize)]
pub struct AnswerCallbackQueryRequest<'a> {
    pub callback_query_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SetWebhookRequest<'a> {
    pub url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_token: Option<&'a str>,
    pub allowed_updates: &'static [&'static str],
}

/// Envelope every Bot API method answers with.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
}
