//! In-process doubles for exercising the HTTP layer without network access.

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Mutex;
use std::time::Duration;

use futures_util::Stream;

use leadchat_core::chat::controller::ConversationController;
use leadchat_core::chat::prompt::PromptSettings;
use leadchat_core::llm::box_provider::BoxLlmProvider;
use leadchat_core::llm::completion::{CompletionClient, CompletionSettings};
use leadchat_core::llm::provider::LlmProvider;
use leadchat_core::notify::notifier::LeadNotifier;
use leadchat_types::config::AppConfig;
use leadchat_types::error::NotifyError;
use leadchat_types::lead::LeadInfo;
use leadchat_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, StopReason, StreamEvent, Usage,
};

use crate::state::AppState;

/// Provider that streams canned replies in order.
pub(crate) struct CannedProvider {
    replies: Mutex<VecDeque<String>>,
}

impl CannedProvider {
    pub(crate) fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
        }
    }

    fn next_reply(&self) -> String {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "no more canned replies".to_string())
    }
}

impl LlmProvider for CannedProvider {
    fn name(&self) -> &str {
        "canned"
    }

    fn default_model(&self) -> &str {
        "test-model"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        Ok(CompletionResponse {
            id: "canned-1".to_string(),
            content: self.next_reply(),
            model: request.model.clone(),
            stop_reason: StopReason::EndTurn,
            usage: Usage::default(),
        })
    }

    fn stream(
        &self,
        _request: CompletionRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>> {
        let events = vec![
            Ok(StreamEvent::Connected),
            Ok(StreamEvent::TextDelta {
                text: self.next_reply(),
            }),
            Ok(StreamEvent::Done),
        ];
        Box::pin(futures_util::stream::iter(events))
    }
}

/// Notifier that records every lead and fails the first `failures` calls.
pub(crate) struct RecordingNotifier {
    failures_left: Mutex<usize>,
    leads: Mutex<Vec<LeadInfo>>,
}

impl RecordingNotifier {
    pub(crate) fn new() -> Self {
        Self::failing(0)
    }

    pub(crate) fn failing(failures: usize) -> Self {
        Self {
            failures_left: Mutex::new(failures),
            leads: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn leads(&self) -> Vec<LeadInfo> {
        self.leads.lock().unwrap().clone()
    }
}

impl LeadNotifier for RecordingNotifier {
    async fn notify(&self, lead: &LeadInfo) -> Result<(), NotifyError> {
        self.leads.lock().unwrap().push(lead.clone());
        let mut failures_left = self.failures_left.lock().unwrap();
        if *failures_left > 0 {
            *failures_left -= 1;
            return Err(NotifyError::Transport("connection refused".to_string()));
        }
        Ok(())
    }
}

/// App state backed by canned replies and the given notifier, with no delay.
pub(crate) fn test_state<N: LeadNotifier + 'static>(replies: &[&str], notifier: N) -> AppState<N> {
    let completion = CompletionClient::new(
        BoxLlmProvider::new(CannedProvider::new(replies)),
        CompletionSettings {
            model: "test-model".to_string(),
            max_tokens: 256,
            temperature: None,
            thinking_delay: Duration::ZERO,
        },
    );
    let prompt = PromptSettings {
        system_context: "You represent Acme.".to_string(),
        seed_greeting: "Welcome to Acme!".to_string(),
        initial_response: "Hello! How can I help?".to_string(),
    };
    AppState::new(
        ConversationController::new(completion, notifier, prompt),
        AppConfig::default(),
    )
}
