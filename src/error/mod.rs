//! Error types.
//!
//! Violations are data ([`Messages`]); the types here are only raised by the
//! throwing entry point and by misuse of process-wide configuration.

use crate::message::Messages;

/// The error returned by [`validate`](crate::validate) when at least one
/// violation was recorded. It carries every message in recording order.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{messages}")]
pub struct ValidationError {
    messages: Messages,
}

impl ValidationError {
    /// Wraps the messages of a failed run.
    pub fn new(messages: Messages) -> Self {
        Self { messages }
    }

    /// Returns the recorded messages.
    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Consumes the error, returning the recorded messages.
    pub fn into_messages(self) -> Messages {
        self.messages
    }
}

impl From<Messages> for ValidationError {
    fn from(messages: Messages) -> Self {
        Self::new(messages)
    }
}

/// Errors raised while installing process-wide configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The global configuration was already read or installed.
    #[error("global configuration is already initialized")]
    AlreadyInitialized,
}
