//! Connection settings for OpenAI-compatible providers, plus the endpoints of
//! the providers known by name.

use secrecy::SecretString;

/// Groq's OpenAI-compatible endpoint.
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// OpenAI's endpoint.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`]. Does not derive
/// Debug: the API key must never be printed.
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "groq", "openai").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.groq.com/openai/v1").
    pub base_url: String,
    /// API key for authentication.
    pub api_key: SecretString,
    /// Model identifier (e.g., "llama3-70b-8192").
    pub model: String,
}

/// Base URL implied by a well-known provider name.
pub fn known_base_url(provider_name: &str) -> Option<&'static str> {
    match provider_name {
        "groq" => Some(GROQ_BASE_URL),
        "openai" => Some(OPENAI_BASE_URL),
        _ => None,
    }
}
