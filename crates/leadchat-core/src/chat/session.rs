//! Per-session conversation state.
//!
//! A `SessionState` is created by the controller with one seeded assistant
//! turn and is mutated only through the controller's transitions. Readers
//! get accessors; the mutators are crate-private.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use leadchat_types::chat::{FlowState, Turn};

use super::conversation::Conversation;

/// Conversation plus lead-capture flags for one session.
///
/// Invariants:
/// - `user_message_count` equals the number of user turns.
/// - `pending_reply` is `Some` only while `awaiting_lead_info` is true.
/// - once `lead_captured` is true it never becomes false.
#[derive(Debug, Clone)]
pub struct SessionState {
    id: Uuid,
    started_at: DateTime<Utc>,
    conversation: Conversation,
    user_message_count: u32,
    awaiting_lead_info: bool,
    lead_captured: bool,
    pending_reply: Option<String>,
}

impl SessionState {
    /// Start a session whose conversation opens with `initial_response`.
    pub(crate) fn seeded(initial_response: impl Into<String>) -> Self {
        let mut conversation = Conversation::new();
        conversation.push(Turn::assistant(initial_response));
        Self {
            id: Uuid::now_v7(),
            started_at: Utc::now(),
            conversation,
            user_message_count: 0,
            awaiting_lead_info: false,
            lead_captured: false,
            pending_reply: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn turns(&self) -> &[Turn] {
        self.conversation.turns()
    }

    pub fn user_message_count(&self) -> u32 {
        self.user_message_count
    }

    pub fn awaiting_lead_info(&self) -> bool {
        self.awaiting_lead_info
    }

    pub fn lead_captured(&self) -> bool {
        self.lead_captured
    }

    pub fn pending_reply(&self) -> Option<&str> {
        self.pending_reply.as_deref()
    }

    pub fn flow(&self) -> FlowState {
        if self.awaiting_lead_info {
            FlowState::AwaitingLead
        } else {
            FlowState::Normal
        }
    }

    /// Append a user turn and bump the user message counter.
    pub(crate) fn record_user_turn(&mut self, text: String) {
        self.conversation.push(Turn::user(text));
        self.user_message_count += 1;
    }

    /// Append an assistant turn and return a copy of it.
    pub(crate) fn append_assistant(&mut self, text: String) -> Turn {
        let turn = Turn::assistant(text);
        self.conversation.push(turn.clone());
        turn
    }

    /// Hold `reply` back until the lead form is submitted.
    pub(crate) fn defer_reply(&mut self, reply: String) {
        self.pending_reply = Some(reply);
        self.awaiting_lead_info = true;
    }

    /// Leave the lead gate for good, handing back the held reply.
    pub(crate) fn complete_lead_capture(&mut self) -> Option<String> {
        self.lead_captured = true;
        self.awaiting_lead_info = false;
        self.pending_reply.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadchat_types::chat::MessageRole;

    #[test]
    fn test_seeded_session() {
        let state = SessionState::seeded("Hello! How can I help?");
        assert_eq!(state.turns().len(), 1);
        assert_eq!(state.turns()[0].role, MessageRole::Assistant);
        assert_eq!(state.turns()[0].content, "Hello! How can I help?");
        assert_eq!(state.user_message_count(), 0);
        assert_eq!(state.flow(), FlowState::Normal);
        assert!(!state.lead_captured());
        assert!(state.pending_reply().is_none());
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        let a = SessionState::seeded("hi");
        let b = SessionState::seeded("hi");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_record_user_turn_keeps_count_in_sync() {
        let mut state = SessionState::seeded("hi");
        state.record_user_turn("one".to_string());
        state.record_user_turn("two".to_string());
        assert_eq!(state.user_message_count(), 2);
        assert_eq!(state.conversation().user_turn_count(), 2);
    }

    #[test]
    fn test_defer_and_complete_lead_capture() {
        let mut state = SessionState::seeded("hi");
        state.defer_reply("answer".to_string());
        assert_eq!(state.flow(), FlowState::AwaitingLead);
        assert_eq!(state.pending_reply(), Some("answer"));

        let pending = state.complete_lead_capture();
        assert_eq!(pending.as_deref(), Some("answer"));
        assert_eq!(state.flow(), FlowState::Normal);
        assert!(state.lead_captured());
        assert!(state.pending_reply().is_none());
    }
}
