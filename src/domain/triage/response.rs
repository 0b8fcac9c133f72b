//! Outbound responses produced by the triage core.

use super::events::ButtonAction;
use crate::domain::foundation::{ConversationId, MessageRef};

/// Markup applied to a text body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFormat {
    #[default]
    Plain,
    /// Telegram legacy Markdown (`*bold*`).
    Markdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: ButtonAction,
}

impl Button {
    pub fn new(label: impl Into<String>, action: ButtonAction) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// Inline keyboard, row by row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    /// All buttons in display order.
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }

    pub fn find(&self, action: &ButtonAction) -> Option<&Button> {
        self.buttons().find(|b| &b.action == action)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundResponse {
    TextMessage {
        conversation_id: ConversationId,
        body: String,
        formatting: TextFormat,
        keyboard: Option<Keyboard>,
    },
    /// Replaces the keyboard of an already delivered message.
    KeyboardUpdate {
        conversation_id: ConversationId,
        message_ref: MessageRef,
        keyboard: Keyboard,
    },
}

impl OutboundResponse {
    pub fn text(conversation_id: ConversationId, body: impl Into<String>) -> Self {
        OutboundResponse::TextMessage {
            conversation_id,
            body: body.into(),
            formatting: TextFormat::Plain,
            keyboard: None,
        }
    }

    pub fn conversation_id(&self) -> ConversationId {
        match self {
            OutboundResponse::TextMessage {
                conversation_id, ..
            }
            | OutboundResponse::KeyboardUpdate {
                conversation_id, ..
            } => *conversation_id,
        }
    }
}
