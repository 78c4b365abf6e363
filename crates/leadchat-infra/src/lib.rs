//! Infrastructure layer for leadchat.
//!
//! Contains implementations of the ports defined in `leadchat-core`:
//! the OpenAI-compatible chat-completion provider, the SMTP lead notifier,
//! and configuration loading from disk and environment.

pub mod config;
pub mod llm;
pub mod notify;
