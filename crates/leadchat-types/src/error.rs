use thiserror::Error;

use crate::chat::FlowState;

/// Errors raised by the conversation controller.
#[derive(Debug, Error)]
pub enum ConversationError {
    /// An operation was invoked in a flow state that does not accept it.
    #[error("cannot {operation} while session is {state}")]
    InvalidState {
        operation: &'static str,
        state: FlowState,
    },

    /// The lead notifier failed; the lead form stays open for retry.
    #[error("lead notification failed: {0}")]
    Notify(#[from] NotifyError),
}

/// Errors from lead notification delivery.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid mail address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("failed to build notification: {0}")]
    Build(String),

    #[error("mail transport error: {0}")]
    Transport(String),
}

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("missing required settings: {}", .0.join(", "))]
    MissingSettings(Vec<String>),
}
