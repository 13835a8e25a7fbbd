//! Final chat responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::finish::FinishReason;
use crate::messages::{AssistantMessage, ToolCallRequest};
use crate::usage::TokenUsage;

/// A completed chat response.
///
/// Built by the streaming finalizer once the provider signals completion,
/// or assembled directly for non-streaming exchanges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Provider-assigned response id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Name of the model that generated the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// The assistant message.
    pub message: AssistantMessage,
    /// Token usage, when the provider reported it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    /// Why generation stopped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
    /// When this response was received.
    pub timestamp: DateTime<Utc>,
}

impl ChatResponse {
    /// Create a response wrapping the given message.
    #[must_use]
    pub fn new(message: AssistantMessage) -> Self {
        Self {
            id: None,
            model: None,
            message,
            usage: None,
            finish_reason: None,
            timestamp: Utc::now(),
        }
    }

    /// Set the response id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the usage.
    #[must_use]
    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Set the finish reason.
    #[must_use]
    pub fn with_finish_reason(mut self, reason: FinishReason) -> Self {
        self.finish_reason = Some(reason);
        self
    }

    /// Get the message text, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.message.text()
    }

    /// Get the tool-call requests.
    #[must_use]
    pub fn tool_calls(&self) -> &[ToolCallRequest] {
        &self.message.tool_calls
    }
}
