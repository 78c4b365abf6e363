//! Conversation types for leadchat.
//!
//! A conversation is an ordered list of role-tagged turns. The flow state
//! tells the boundary layer whether it may accept chat input or must show
//! the lead-capture form.

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export MessageRole from llm module (shared by turns and LLM requests).
pub use crate::llm::MessageRole;
use crate::llm::Message;

/// One role-tagged message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: MessageRole,
    pub content: String,
}

impl Turn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

impl From<&Turn> for Message {
    fn from(turn: &Turn) -> Self {
        Message {
            role: turn.role,
            content: turn.content.clone(),
        }
    }
}

/// Controller-level state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    /// Chat input is accepted.
    Normal,
    /// A reply is pending until the lead form is submitted.
    AwaitingLead,
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowState::Normal => write!(f, "normal"),
            FlowState::AwaitingLead => write!(f, "awaiting_lead"),
        }
    }
}
