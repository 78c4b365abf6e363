//! LLM provider implementations.
//!
//! Provides a provider factory ([`create_provider`]) that constructs the
//! OpenAI-compatible provider from [`LlmSettings`], and a connection test
//! function ([`test_provider_connection`]) for verifying connectivity.

pub mod openai_compat;

use secrecy::SecretString;

use leadchat_core::llm::box_provider::BoxLlmProvider;
use leadchat_types::config::LlmSettings;
use leadchat_types::llm::{CompletionRequest, LlmError, Message, MessageRole};

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::{OpenAiCompatConfig, known_base_url};

/// Create a [`BoxLlmProvider`] from [`LlmSettings`].
///
/// An explicit `base_url` wins; otherwise the provider name must be one
/// with a well-known endpoint.
///
/// # Errors
///
/// Returns [`LlmError::AuthenticationFailed`] when no API key is set and
/// [`LlmError::InvalidRequest`] when no base URL can be determined.
pub fn create_provider(settings: &LlmSettings) -> Result<BoxLlmProvider, LlmError> {
    let key = settings
        .api_key
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .ok_or(LlmError::AuthenticationFailed)?;

    let base_url = match settings.base_url.as_deref() {
        Some(url) => url.to_string(),
        None => known_base_url(&settings.provider_name)
            .ok_or_else(|| {
                LlmError::InvalidRequest(format!(
                    "provider '{}' needs an explicit base_url",
                    settings.provider_name
                ))
            })?
            .to_string(),
    };

    let provider = OpenAiCompatibleProvider::new(OpenAiCompatConfig {
        provider_name: settings.provider_name.clone(),
        base_url,
        api_key: SecretString::from(key.to_string()),
        model: settings.model.clone(),
    });
    Ok(BoxLlmProvider::new(provider))
}

/// Test provider connectivity by sending a minimal completion request.
///
/// Sends a tiny "Hello" message with a minimal token budget.
///
/// # Errors
///
/// Returns the LLM error if the provider fails to respond.
pub async fn test_provider_connection(provider: &BoxLlmProvider) -> Result<(), LlmError> {
    let request = CompletionRequest {
        model: String::new(), // Provider uses its configured default
        messages: vec![Message {
            role: MessageRole::User,
            content: "Hello".to_string(),
        }],
        system: None,
        max_tokens: 10,
        temperature: Some(0.0),
        stream: false,
    };
    provider.complete(&request).await?;
    Ok(())
}
