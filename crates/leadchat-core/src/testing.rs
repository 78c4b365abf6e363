//! Test doubles shared by the unit tests in this crate.

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::Stream;

use leadchat_types::error::NotifyError;
use leadchat_types::lead::LeadInfo;
use leadchat_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, StopReason, StreamEvent, Usage,
};

use crate::llm::completion::CompletionSettings;
use crate::llm::provider::LlmProvider;
use crate::notify::notifier::LeadNotifier;

type Script = Vec<Result<StreamEvent, LlmError>>;

pub(crate) fn instant_settings() -> CompletionSettings {
    CompletionSettings {
        model: "test-model".to_string(),
        max_tokens: 256,
        temperature: None,
        thinking_delay: Duration::ZERO,
    }
}

fn text_script(text: &str) -> Script {
    vec![
        Ok(StreamEvent::Connected),
        Ok(StreamEvent::TextDelta {
            text: text.to_string(),
        }),
        Ok(StreamEvent::MessageDelta {
            stop_reason: StopReason::EndTurn,
        }),
        Ok(StreamEvent::Done),
    ]
}

/// Provider that replays queued scripts, then a fallback script forever.
pub(crate) struct ScriptedProvider {
    queue: Mutex<VecDeque<Script>>,
    fallback: Script,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedProvider {
    pub(crate) fn replying(text: &str) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback: text_script(text),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn with_replies(texts: &[&str]) -> Self {
        let provider = Self::replying("unexpected extra call");
        provider
            .queue
            .lock()
            .unwrap()
            .extend(texts.iter().map(|t| text_script(t)));
        provider
    }

    pub(crate) fn failing(err: LlmError) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback: vec![Err(err)],
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn requests(&self) -> Arc<Mutex<Vec<CompletionRequest>>> {
        self.requests.clone()
    }

    fn next_script(&self, request: CompletionRequest) -> Script {
        self.requests.lock().unwrap().push(request);
        self.queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn default_model(&self) -> &str {
        "test-model"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let mut content = String::new();
        for event in self.next_script(request.clone()) {
            if let StreamEvent::TextDelta { text } = event? {
                content.push_str(&text);
            }
        }
        Ok(CompletionResponse {
            id: "scripted-1".to_string(),
            content,
            model: request.model.clone(),
            stop_reason: StopReason::EndTurn,
            usage: Usage::default(),
        })
    }

    fn stream(
        &self,
        request: CompletionRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>> {
        Box::pin(futures_util::stream::iter(self.next_script(request)))
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
            return Err(NotifyError::Transport("535 authentication rejected".to_string()));
        }
        Ok(())
    }
}
