//! Finish reasons.

use serde::{Deserialize, Serialize};

/// Server-reported reason why generation stopped.
///
/// This is passthrough data: the streaming layer attaches the reason the
/// provider reported and never reinterprets it. Notably, whether a single
/// forced tool call surfaces as `Stop` or `ToolCalls` varies by provider
/// and is preserved as observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural end of response.
    Stop,
    /// Maximum token budget reached.
    Length,
    /// Model wants tools executed.
    ToolCalls,
    /// Content was filtered.
    ContentFilter,
    /// Provider-specific or unknown reason.
    Other,
}

impl FinishReason {
    /// Check if the response ended naturally.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Stop)
    }

    /// Check if the response was truncated.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Length)
    }

    /// Check if the response requests tool execution.
    #[must_use]
    pub fn is_tool_calls(&self) -> bool {
        matches!(self, Self::ToolCalls)
    }
}

impl std::fmt::Display for FinishReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stop => write!(f, "stop"),
            Self::Length => write!(f, "length"),
            Self::ToolCalls => write!(f, "tool_calls"),
            Self::ContentFilter => write!(f, "content_filter"),
            Self::Other => write!(f, "other"),
        }
    }
}
