//! Spelunker error types.

use spelunk_reflect::ReflectError;
use thiserror::Error;

/// Errors that can occur while configuring or running a traversal.
#[derive(Debug, Error)]
pub enum SpelunkError {
    /// A value could not be inspected or mutated.
    #[error(transparent)]
    Reflect(#[from] ReflectError),

    /// A directive's argument is missing or malformed.
    #[error("Invalid argument in directive '{directive}': {reason}")]
    InvalidArgument { directive: String, reason: String },

    /// Handler-defined error.
    #[error("Handler error: {0}")]
    Handler(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SpelunkError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a handler error.
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler(message.into())
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(directive: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            directive: directive.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if a handler tried to mutate a read-only value.
    pub fn is_not_settable(&self) -> bool {
        matches!(self, Self::Reflect(err) if err.is_not_settable())
    }
}
