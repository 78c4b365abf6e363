//! Application state wiring the controller, session store and configuration.
//!
//! The controller is generic over its notifier; `AppState` defaults it to the
//! SMTP notifier used in production.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use leadchat_core::chat::controller::ConversationController;
use leadchat_core::chat::prompt::PromptSettings;
use leadchat_core::chat::store::SessionStore;
use leadchat_core::llm::completion::{CompletionClient, CompletionSettings};
use leadchat_core::notify::notifier::LeadNotifier;
use leadchat_infra::llm::create_provider;
use leadchat_infra::notify::smtp::{SmtpLeadNotifier, SmtpNotifierConfig};
use leadchat_types::config::AppConfig;
use leadchat_types::error::ConfigError;

/// Shared state for HTTP handlers.
pub struct AppState<N: LeadNotifier = SmtpLeadNotifier> {
    pub controller: Arc<ConversationController<N>>,
    pub sessions: Arc<SessionStore>,
    pub config: Arc<AppConfig>,
}

// Manual impl: cloning only bumps the Arcs, so `N` need not be `Clone`.
impl<N: LeadNotifier> Clone for AppState<N> {
    fn clone(&self) -> Self {
        Self {
            controller: Arc::clone(&self.controller),
            sessions: Arc::clone(&self.sessions),
            config: Arc::clone(&self.config),
        }
    }
}

impl<N: LeadNotifier> AppState<N> {
    pub fn new(controller: ConversationController<N>, config: AppConfig) -> Self {
        Self {
            controller: Arc::new(controller),
            sessions: Arc::new(SessionStore::new()),
            config: Arc::new(config),
        }
    }
}

impl AppState {
    /// Build the production state: Groq-compatible provider plus SMTP notifier.
    pub fn init(config: AppConfig) -> anyhow::Result<Self> {
        let controller = build_controller(&config)?;
        Ok(Self::new(controller, config))
    }
}

/// Wire a controller from configuration.
///
/// Fails listing every missing credential when any is unset.
pub fn build_controller(
    config: &AppConfig,
) -> anyhow::Result<ConversationController<SmtpLeadNotifier>> {
    let missing = config.missing_credentials();
    if !missing.is_empty() {
        return Err(ConfigError::MissingSettings(missing).into());
    }

    let provider = create_provider(&config.llm).context("failed to create LLM provider")?;
    let completion = CompletionClient::new(provider, completion_settings(config));

    let smtp = SmtpNotifierConfig::from_settings(&config.smtp, &config.chat.product_name)?;
    let notifier = SmtpLeadNotifier::new(smtp).context("failed to create SMTP notifier")?;

    Ok(ConversationController::new(
        completion,
        notifier,
        prompt_settings(config),
    ))
}

pub fn completion_settings(config: &AppConfig) -> CompletionSettings {
    CompletionSettings {
        model: config.llm.model.clone(),
        max_tokens: config.llm.max_tokens,
        temperature: config.llm.temperature,
        thinking_delay: Duration::from_millis(config.chat.thinking_delay_ms),
    }
}

pub fn prompt_settings(config: &AppConfig) -> PromptSettings {
    PromptSettings {
        system_context: config.chat.system_context.clone(),
        seed_greeting: config.chat.seed_greeting.clone(),
        initial_response: config.chat.initial_response.clone(),
    }
}
