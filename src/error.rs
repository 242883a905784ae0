//! Error types for the record store.

use thiserror::Error;

/// Main error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Listener failed on {channel} channel: {source}")]
    ListenerFailed {
        channel: String,
        #[source]
        source: ListenerError,
    },
}

/// Failure reported by a fallible listener.
///
/// Returning one of these from a listener aborts the rest of the broadcast.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ListenerError {
    message: String,
}

impl ListenerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Wrap any error, keeping its display text.
    pub fn from_error<E: std::error::Error>(error: E) -> Self {
        ListenerError::new(error.to_string())
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for ListenerError {
    fn from(message: String) -> Self {
        ListenerError::new(message)
    }
}

impl From<&str> for ListenerError {
    fn from(message: &str) -> Self {
        ListenerError::new(message)
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Result type returned by fallible listeners.
pub type ListenerResult = std::result::Result<(), ListenerError>;
