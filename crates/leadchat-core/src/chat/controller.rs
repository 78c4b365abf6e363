//! Conversation controller: the lead-capture state machine.
//!
//! States are `Normal` and `AwaitingLead`:
//!
//! - `Normal --(2nd user turn, lead not captured)--> AwaitingLead`: the reply
//!   is computed but held back as the pending reply.
//! - `AwaitingLead --(lead notified)--> Normal`: confirmation, then the
//!   pending reply, are appended.
//! - `AwaitingLead --(notifier failure)--> AwaitingLead`: nothing changes.
//! - `Normal --(any other turn)--> Normal`: one assistant turn per user turn.
//!
//! The controller owns no session state; every operation receives the
//! session it acts on.

use tracing::{info, warn};

use leadchat_types::chat::Turn;
use leadchat_types::error::ConversationError;
use leadchat_types::lead::LeadInfo;
use leadchat_types::llm::{Message, MessageRole};

use crate::llm::completion::CompletionClient;
use crate::notify::notifier::LeadNotifier;

use super::prompt::PromptSettings;
use super::session::SessionState;

/// The user turn at which the lead form interrupts the conversation.
pub const LEAD_CAPTURE_TURN: u32 = 2;

/// Result of handling one user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    /// The assistant reply was appended.
    Replied(Turn),
    /// The reply is pending; the boundary must show the lead form.
    LeadRequired,
}

impl MessageOutcome {
    pub fn show_lead_form(&self) -> bool {
        matches!(self, MessageOutcome::LeadRequired)
    }
}

/// Turns appended by a successful lead submission, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadCaptured {
    pub confirmation: Turn,
    pub pending_reply: Option<Turn>,
}

impl LeadCaptured {
    pub fn into_turns(self) -> Vec<Turn> {
        std::iter::once(self.confirmation)
            .chain(self.pending_reply)
            .collect()
    }
}

/// Drives sessions through the lead-capture state machine.
///
/// Generic over the notifier so tests and alternative transports plug in
/// without touching the controller.
pub struct ConversationController<N: LeadNotifier> {
    completion: CompletionClient,
    notifier: N,
    prompt: PromptSettings,
}

impl<N: LeadNotifier> ConversationController<N> {
    pub fn new(completion: CompletionClient, notifier: N, prompt: PromptSettings) -> Self {
        Self {
            completion,
            notifier,
            prompt,
        }
    }

    pub fn completion(&self) -> &CompletionClient {
        &self.completion
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn prompt(&self) -> &PromptSettings {
        &self.prompt
    }

    /// Create a fresh session seeded with the initial assistant response.
    pub fn start_session(&self) -> SessionState {
        let state = SessionState::seeded(self.prompt.initial_response.clone());
        info!(session_id = %state.id(), "Session started");
        state
    }

    /// Handle one user message.
    ///
    /// Fails with `InvalidState` (and changes nothing) while the session is
    /// waiting for lead details. The session is only touched once the reply
    /// is in hand, so dropping the future mid-call leaves it as it was.
    pub async fn handle_user_message(
        &self,
        state: &mut SessionState,
        text: impl Into<String>,
    ) -> Result<MessageOutcome, ConversationError> {
        if state.awaiting_lead_info() {
            return Err(ConversationError::InvalidState {
                operation: "handle a user message",
                state: state.flow(),
            });
        }

        let text = text.into();
        let mut context = self.prompt.build_context(state.conversation());
        context.push(Message {
            role: MessageRole::User,
            content: text.clone(),
        });
        let reply = self.completion.reply(context).await;

        state.record_user_turn(text);
        if state.user_message_count() == LEAD_CAPTURE_TURN && !state.lead_captured() {
            info!(
                session_id = %state.id(),
                user_messages = state.user_message_count(),
                "Lead capture required, holding reply"
            );
            state.defer_reply(reply);
            return Ok(MessageOutcome::LeadRequired);
        }

        let turn = state.append_assistant(reply);
        Ok(MessageOutcome::Replied(turn))
    }

    /// Submit the lead form.
    ///
    /// On notifier failure the error is returned and the session stays in
    /// `AwaitingLead` with its pending reply intact, so the form can be
    /// resubmitted.
    pub async fn submit_lead_info(
        &self,
        state: &mut SessionState,
        lead: LeadInfo,
    ) -> Result<LeadCaptured, ConversationError> {
        if !state.awaiting_lead_info() {
            return Err(ConversationError::InvalidState {
                operation: "submit lead info",
                state: state.flow(),
            });
        }

        if let Err(e) = self.notifier.notify(&lead).await {
            warn!(session_id = %state.id(), error = %e, "Lead notification failed");
            return Err(e.into());
        }

        let pending = state.complete_lead_capture();
        let confirmation = state.append_assistant(self.prompt.lead_confirmation(&lead.name));
        let pending_reply = pending
            .filter(|reply| !reply.is_empty())
            .map(|reply| state.append_assistant(reply));

        info!(session_id = %state.id(), "Lead captured");
        Ok(LeadCaptured {
            confirmation,
            pending_reply,
        })
    }
}
