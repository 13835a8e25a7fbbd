//! Streamed response fragments.
//!
//! The transport decodes its wire format (SSE chunks, websocket frames)
//! into these fragments and feeds them to a session in arrival order. Each
//! fragment is consumed exactly once; the session signals terminal state
//! after a `Finish` or `Error` fragment.

use chatloom_core::{FinishReason, TokenUsage};
use serde::{Deserialize, Serialize};

use crate::error::StreamError;

/// One incremental unit of a streamed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "fragment_kind", rename_all = "snake_case")]
pub enum StreamFragment {
    /// A piece of assistant text.
    TextDelta {
        /// The text delta.
        content: String,
    },
    /// A piece of a tool call. Fragments for different calls may
    /// interleave; `index` keys them apart.
    ToolCallDelta {
        /// Wire index of the tool call this delta belongs to.
        index: u32,
        /// Call id; arrives once, usually on the first delta.
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        /// Tool name; arrives once, usually on the first delta.
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Argument payload fragment, concatenated in arrival order.
        #[serde(skip_serializing_if = "Option::is_none")]
        arguments: Option<String>,
    },
    /// Token usage, reported at completion.
    Usage(TokenUsage),
    /// Generation finished.
    Finish(FinishReason),
    /// The stream failed.
    Error(StreamError),
}

impl StreamFragment {
    /// Create a text delta fragment.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::TextDelta {
            content: content.into(),
        }
    }

    /// Create a tool-call delta carrying only an argument fragment.
    #[must_use]
    pub fn tool_arguments(index: u32, arguments: impl Into<String>) -> Self {
        Self::ToolCallDelta {
            index,
            id: None,
            name: None,
            arguments: Some(arguments.into()),
        }
    }

    /// Create an opening tool-call delta with id and name.
    #[must_use]
    pub fn tool_start(index: u32, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::ToolCallDelta {
            index,
            id: Some(id.into()),
            name: Some(name.into()),
            arguments: None,
        }
    }

    /// Create a finish fragment.
    #[must_use]
    pub fn finish(reason: FinishReason) -> Self {
        Self::Finish(reason)
    }

    /// Create a usage fragment.
    #[must_use]
    pub fn usage(usage: TokenUsage) -> Self {
        Self::Usage(usage)
    }

    /// Create an error fragment.
    #[must_use]
    pub fn error(error: StreamError) -> Self {
        Self::Error(error)
    }

    /// Check if this fragment terminates the session.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finish(_) | Self::Error(_))
    }
}
