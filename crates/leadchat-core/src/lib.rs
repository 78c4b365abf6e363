//! Business logic and provider trait definitions for leadchat.
//!
//! This crate defines the "ports" (LLM provider and lead notifier traits)
//! that the infrastructure layer implements, plus the conversation state
//! machine that drives them. It depends only on `leadchat-types` -- never on
//! `leadchat-infra` or any network crate.

pub mod chat;
pub mod llm;
pub mod notify;

#[cfg(test)]
mod testing;
