//! Conversation state machine for leadchat.
//!
//! - `Conversation`: append-only list of turns
//! - `SessionState`: one session's conversation plus lead-capture flags
//! - `ConversationController`: the transitions between `Normal` and
//!   `AwaitingLead`
//! - `SessionStore`: isolates many sessions for the HTTP boundary

pub mod controller;
pub mod conversation;
pub mod prompt;
pub mod session;
pub mod store;
