//! Shared domain types for leadchat.
//!
//! This crate contains the types used across the workspace: conversation
//! turns, lead information, LLM request/stream shapes, configuration, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod lead;
pub mod llm;
