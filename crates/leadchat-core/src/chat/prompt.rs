//! Prompt context assembly.
//!
//! Every completion call sees the same layout: the system context, the seed
//! assistant greeting, then the whole conversation so far (which itself opens
//! with the displayed initial response).

use leadchat_types::llm::{Message, MessageRole};

use super::conversation::Conversation;

/// Fixed texts framing every conversation. Immutable for a session.
#[derive(Debug, Clone)]
pub struct PromptSettings {
    /// System prompt sent first in every request.
    pub system_context: String,
    /// Assistant message following the system prompt; never displayed.
    pub seed_greeting: String,
    /// First displayed assistant turn of each session.
    pub initial_response: String,
}

impl PromptSettings {
    /// Build the full request context for `conversation`.
    pub fn build_context(&self, conversation: &Conversation) -> Vec<Message> {
        let mut messages = Vec::with_capacity(conversation.len() + 2);
        messages.push(Message {
            role: MessageRole::System,
            content: self.system_context.clone(),
        });
        messages.push(Message {
            role: MessageRole::Assistant,
            content: self.seed_greeting.clone(),
        });
        messages.extend(conversation.turns().iter().map(Message::from));
        messages
    }

    /// Confirmation shown after a lead is captured.
    pub fn lead_confirmation(&self, name: &str) -> String {
        format!("Thanks {name} for sharing your details! Let's continue with your inquiry.")
    }
}
