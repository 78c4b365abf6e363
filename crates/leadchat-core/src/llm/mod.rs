//! LLM provider abstractions for leadchat.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `BoxLlmProvider`: Object-safe wrapper for dynamic dispatch
//! - `CompletionClient`: assembles a streamed reply into one text

pub mod box_provider;
pub mod completion;
pub mod provider;
