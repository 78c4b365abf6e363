//! Completion client: turns a prompt context into one reply text.
//!
//! The provider streams text fragments; the client concatenates them. A
//! provider failure never escapes: it is rendered as `"Error: {detail}"` and
//! becomes the reply so the conversation can continue.

use std::time::Duration;

use futures_util::{Stream, StreamExt};
use tracing::{Instrument, debug, info_span, warn};

use leadchat_types::llm::{
    CompletionRequest, LlmError, Message, StopReason, StreamEvent, Usage,
};

use super::box_provider::BoxLlmProvider;

/// Request parameters applied to every completion call.
#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: Option<f64>,
    /// Cosmetic pause before each call.
    pub thinking_delay: Duration,
}

/// Reply text assembled from a provider stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembledReply {
    pub text: String,
    pub usage: Option<Usage>,
    pub stop_reason: Option<StopReason>,
}

/// Concatenate the text deltas of a provider stream.
///
/// An empty stream yields an empty reply. A stream that ends without a
/// `Done` event keeps whatever text arrived. The first error aborts
/// collection and is returned.
pub async fn collect_reply<S>(stream: S) -> Result<AssembledReply, LlmError>
where
    S: Stream<Item = Result<StreamEvent, LlmError>>,
{
    let mut stream = std::pin::pin!(stream);
    let mut reply = AssembledReply::default();

    while let Some(event) = stream.next().await {
        match event? {
            StreamEvent::TextDelta { text } => reply.text.push_str(&text),
            StreamEvent::Usage(usage) => reply.usage = Some(usage),
            StreamEvent::MessageDelta { stop_reason } => reply.stop_reason = Some(stop_reason),
            StreamEvent::Done => break,
            StreamEvent::Connected => {}
        }
    }

    Ok(reply)
}

/// Issues chat-completion requests on behalf of the conversation controller.
pub struct CompletionClient {
    provider: BoxLlmProvider,
    settings: CompletionSettings,
}

impl CompletionClient {
    pub fn new(provider: BoxLlmProvider, settings: CompletionSettings) -> Self {
        Self { provider, settings }
    }

    pub fn provider(&self) -> &BoxLlmProvider {
        &self.provider
    }

    pub fn settings(&self) -> &CompletionSettings {
        &self.settings
    }

    /// Request a reply for the given context and return its text.
    ///
    /// Always returns a string: failures come back as `"Error: {detail}"`.
    pub async fn reply(&self, context: Vec<Message>) -> String {
        if !self.settings.thinking_delay.is_zero() {
            tokio::time::sleep(self.settings.thinking_delay).await;
        }

        let request = self.build_request(context);
        let span = info_span!(
            "gen_ai.chat",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
            gen_ai.request.messages = request.messages.len(),
            gen_ai.usage.input_tokens = tracing::field::Empty,
            gen_ai.usage.output_tokens = tracing::field::Empty,
        );

        let stream = self.provider.stream(request);
        match collect_reply(stream).instrument(span.clone()).await {
            Ok(reply) => {
                if let Some(usage) = &reply.usage {
                    span.record("gen_ai.usage.input_tokens", usage.input_tokens);
                    span.record("gen_ai.usage.output_tokens", usage.output_tokens);
                }
                debug!(
                    parent: &span,
                    chars = reply.text.len(),
                    stop_reason = ?reply.stop_reason,
                    "Completion assembled"
                );
                reply.text
            }
            Err(e) => {
                warn!(parent: &span, error = %e, "Completion failed, replying with error text");
                format!("Error: {e}")
            }
        }
    }

    fn build_request(&self, messages: Vec<Message>) -> CompletionRequest {
        CompletionRequest {
            model: self.settings.model.clone(),
            messages,
            system: None,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            stream: true,
        }
    }
}
