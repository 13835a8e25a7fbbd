//! Streaming errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced through a streaming session's error callback.
///
/// Causes are preserved verbatim from the transport; the session never
/// retries. Retry policy, including `max_retries = 0` disabling retries
/// entirely, belongs to the external transport layer, which can consult
/// [`is_retryable`] when deciding.
///
/// [`is_retryable`]: StreamError::is_retryable
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "error_kind", rename_all = "snake_case")]
pub enum StreamError {
    /// Network or transport failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Authentication failure (bad API key, expired credential).
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// A fragment could not be interpreted.
    #[error("Malformed fragment: {0}")]
    MalformedFragment(String),

    /// The session was cancelled by the caller.
    #[error("Session cancelled")]
    Cancelled,

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl StreamError {
    /// Create a transport error from any displayable cause.
    pub fn transport<E: std::fmt::Display>(cause: E) -> Self {
        Self::Transport(cause.to_string())
    }

    /// Check whether an external retry layer may reasonably retry.
    ///
    /// Authentication failures and malformed data will not improve on
    /// retry; transport failures might.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if this is an authentication error.
    #[must_use]
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }
}

/// Result type for streaming operations.
pub type StreamResult<T> = Result<T, StreamError>;
