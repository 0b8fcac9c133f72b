//! Inbound events the triage core reacts to.
//!
//! The transport resolves raw updates into these closed variants once, at
//! the boundary. Nothing past the boundary parses strings.

use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{ConversationId, MessageRef, ValidationError};

/// Longest encoded button action a chat transport will carry.
pub const MAX_ACTION_BYTES: usize = 64;

const TOGGLE_PREFIX: &str = "toggle:";

/// Slash commands understood by the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    /// Opens (or reopens) the symptom menu.
    Start,
}

impl BotCommand {
    /// Recognizes a command message such as `/start` or `/start@triage_bot`.
    pub fn parse(text: &str) -> Option<Self> {
        let first = text.split_whitespace().next()?;
        let name = first.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name);
        match name {
            "start" => Some(BotCommand::Start),
            _ => None,
        }
    }
}

/// Action attached to a menu button.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ButtonAction {
    Toggle(String),
    NextPage,
    PrevPage,
    Done,
}

impl ButtonAction {
    /// Wire encoding carried by the button.
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ButtonAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonAction::Toggle(symptom) => write!(f, "{}{}", TOGGLE_PREFIX, symptom),
            ButtonAction::NextPage => write!(f, "next"),
            ButtonAction::PrevPage => write!(f, "prev"),
            ButtonAction::Done => write!(f, "done"),
        }
    }
}

impl FromStr for ButtonAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "next" => Ok(ButtonAction::NextPage),
            "prev" => Ok(ButtonAction::PrevPage),
            "done" => Ok(ButtonAction::Done),
            other => match other.strip_prefix(TOGGLE_PREFIX) {
                Some(symptom) if !symptom.is_empty() => {
                    Ok(ButtonAction::Toggle(symptom.to_string()))
                }
                Some(_) => Err(ValidationError::empty_field("toggle.symptom")),
                None => Err(ValidationError::invalid_format(
                    "callback_data",
                    format!("unknown button action '{}'", other),
                )),
            },
        }
    }
}

/// An event delivered to the triage core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Command {
        conversation_id: ConversationId,
        command: BotCommand,
    },
    FreeText {
        conversation_id: ConversationId,
        text: String,
    },
    ButtonPress {
        conversation_id: ConversationId,
        action: ButtonAction,
        message_ref: MessageRef,
    },
}

impl InboundEvent {
    /// Classifies a text message as a command or free text.
    pub fn from_text(conversation_id: ConversationId, text: impl Into<String>) -> Self {
        let text = text.into();
        match BotCommand::parse(&text) {
            Some(command) => InboundEvent::Command {
                conversation_id,
                command,
            },
            None => InboundEvent::FreeText {
                conversation_id,
                text,
            },
        }
    }

    pub fn conversation_id(&self) -> ConversationId {
        match self {
            InboundEvent::Command {
                conversation_id, ..
            }
            | InboundEvent::FreeText {
                conversation_id, ..
            }
            | InboundEvent::ButtonPress {
                conversation_id, ..
            } => *conversation_id,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            InboundEvent::Command { .. } => "command",
            InboundEvent::FreeText { .. } => "free_text",
            InboundEvent::ButtonPress { .. } => "button_press",
        }
    }
}
