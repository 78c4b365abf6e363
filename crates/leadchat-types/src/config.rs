//! Configuration types for leadchat.
//!
//! `AppConfig` represents the top-level `config.toml`. Every section has
//! defaults so an empty file is valid; credentials have no defaults and are
//! usually supplied through environment variables.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Environment variable overriding `llm.api_key`.
pub const ENV_API_KEY: &str = "GROQ_API_KEY";
/// Environment variable overriding `smtp.username` (also the sender address).
pub const ENV_EMAIL_ADDRESS: &str = "EMAIL_ADDRESS";
/// Environment variable overriding `smtp.password`.
pub const ENV_EMAIL_PASSWORD: &str = "EMAIL_PASSWORD";
/// Environment variable overriding `smtp.recipient`.
pub const ENV_RECIPIENT_EMAIL: &str = "RECIPIENT_EMAIL";
/// Environment variable overriding `chat.system_context`.
pub const ENV_CHAT_CONTEXT: &str = "CHAT_CONTEXT";
/// Environment variable overriding `chat.seed_greeting`.
pub const ENV_INITIAL_MSG: &str = "INITIAL_MSG";
/// Environment variable overriding `chat.initial_response`.
pub const ENV_INITIAL_RESPONSE: &str = "INITIAL_RESPONSE";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub chat: ChatSettings,
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub smtp: SmtpSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

impl AppConfig {
    /// Overlay values from an environment lookup onto the file values.
    ///
    /// Takes a lookup function instead of reading `std::env` directly so
    /// callers (and tests) decide where the values come from.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = non_empty(ENV_API_KEY) {
            self.llm.api_key = Some(v);
        }
        if let Some(v) = non_empty(ENV_EMAIL_ADDRESS) {
            self.smtp.username = Some(v);
        }
        if let Some(v) = non_empty(ENV_EMAIL_PASSWORD) {
            self.smtp.password = Some(v);
        }
        if let Some(v) = non_empty(ENV_RECIPIENT_EMAIL) {
            self.smtp.recipient = Some(v);
        }
        if let Some(v) = non_empty(ENV_CHAT_CONTEXT) {
            self.chat.system_context = v;
        }
        if let Some(v) = non_empty(ENV_INITIAL_MSG) {
            self.chat.seed_greeting = v;
        }
        if let Some(v) = non_empty(ENV_INITIAL_RESPONSE) {
            self.chat.initial_response = v;
        }
    }

    /// Names of the credentials that are still unset.
    ///
    /// Reported by environment variable name since that is where operators
    /// usually provide them.
    pub fn missing_credentials(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if is_blank(&self.llm.api_key) {
            missing.push(ENV_API_KEY.to_string());
        }
        if is_blank(&self.smtp.username) {
            missing.push(ENV_EMAIL_ADDRESS.to_string());
        }
        if is_blank(&self.smtp.password) {
            missing.push(ENV_EMAIL_PASSWORD.to_string());
        }
        if is_blank(&self.smtp.recipient) {
            missing.push(ENV_RECIPIENT_EMAIL.to_string());
        }
        missing
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

/// Conversation texts and pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSettings {
    /// Product name used in notification emails and the terminal banner.
    #[serde(default = "default_product_name")]
    pub product_name: String,
    /// Banner shown above the conversation.
    #[serde(default = "default_welcome_banner")]
    pub welcome_banner: String,
    /// System prompt sent first in every completion request.
    #[serde(default = "default_system_context")]
    pub system_context: String,
    /// Assistant message placed after the system prompt in every request.
    #[serde(default = "default_seed_greeting")]
    pub seed_greeting: String,
    /// First assistant turn displayed in every new session.
    #[serde(default = "default_initial_response")]
    pub initial_response: String,
    /// Cosmetic pause before each completion call.
    #[serde(default = "default_thinking_delay_ms")]
    pub thinking_delay_ms: u64,
}

fn default_product_name() -> String {
    "Sales Assistant".to_string()
}

fn default_welcome_banner() -> String {
    "Welcome to our assistant".to_string()
}

fn default_system_context() -> String {
    "You are a professional, concise assistant. Provide short, crisp, and directly \
     relevant answers. Use bullet points where appropriate. Do not provide pricing or \
     quotes; direct pricing questions to the sales team."
        .to_string()
}

fn default_seed_greeting() -> String {
    "Welcome!".to_string()
}

fn default_initial_response() -> String {
    "Hello! How can I assist you today?".to_string()
}

fn default_thinking_delay_ms() -> u64 {
    2000
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            product_name: default_product_name(),
            welcome_banner: default_welcome_banner(),
            system_context: default_system_context(),
            seed_greeting: default_seed_greeting(),
            initial_response: default_initial_response(),
            thinking_delay_ms: default_thinking_delay_ms(),
        }
    }
}

/// Chat-completion provider settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Provider name; well-known names ("groq", "openai") imply a base URL.
    #[serde(default = "default_provider_name")]
    pub provider_name: String,
    /// Explicit base URL for any other OpenAI-compatible endpoint.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub temperature: Option<f64>,
}

fn default_provider_name() -> String {
    "groq".to_string()
}

fn default_model() -> String {
    "llama3-70b-8192".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider_name: default_provider_name(),
            base_url: None,
            model: default_model(),
            api_key: None,
            max_tokens: default_max_tokens(),
            temperature: None,
        }
    }
}

// Manual Debug so the API key never reaches logs.
impl fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmSettings")
            .field("provider_name", &self.provider_name)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &redacted(&self.api_key))
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// SMTP relay settings for lead notifications.
#[derive(Clone, Serialize, Deserialize)]
pub struct SmtpSettings {
    #[serde(default = "default_smtp_host")]
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// Login name, also used as the sender address.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    /// Sales inbox receiving lead notifications.
    #[serde(default)]
    pub recipient: Option<String>,
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: None,
            password: None,
            recipient: None,
        }
    }
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &redacted(&self.password))
            .field("recipient", &self.recipient)
            .finish()
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Directory holding the built chat widget, served when present.
    #[serde(default)]
    pub web_dir: Option<String>,
    /// Sessions untouched for this many seconds are dropped. 0 keeps them forever.
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_session_idle_secs() -> u64 {
    1800
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            web_dir: None,
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

fn redacted(value: &Option<String>) -> Option<&'static str> {
    value.as_ref().map(|_| "[REDACTED]")
}
