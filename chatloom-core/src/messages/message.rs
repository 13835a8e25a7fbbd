//! Chat message types.
//!
//! Messages form the conversation history sent to the model. The four roles
//! mirror the chat-completion wire protocol: system instructions, user
//! input, assistant output, and tool results fed back after execution.

use serde::{Deserialize, Serialize};

use super::content::Content;
use super::tool_call::ToolCallRequest;

/// A single message in a chat conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "kebab-case")]
pub enum ChatMessage {
    /// System instructions.
    System(SystemMessage),
    /// User input.
    User(UserMessage),
    /// Assistant output (text or tool-call requests).
    Assistant(AssistantMessage),
    /// Result of executing a tool the assistant requested.
    ToolResult(ToolResultMessage),
}

impl ChatMessage {
    /// Create a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(SystemMessage::new(content))
    }

    /// Create a user message with a single text part.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::User(UserMessage::text(content))
    }

    /// Create an assistant text message.
    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::Assistant(AssistantMessage::from_text(text))
    }

    /// Create a tool-result message for the given tool call.
    #[must_use]
    pub fn tool_result(call: &ToolCallRequest, result: impl Into<String>) -> Self {
        Self::ToolResult(ToolResultMessage::from_call(call, result))
    }

    /// Get the role name of this message.
    #[must_use]
    pub fn role(&self) -> &'static str {
        match self {
            Self::System(_) => "system",
            Self::User(_) => "user",
            Self::Assistant(_) => "assistant",
            Self::ToolResult(_) => "tool-result",
        }
    }

    /// Check if this is an assistant message.
    #[must_use]
    pub fn is_assistant(&self) -> bool {
        matches!(self, Self::Assistant(_))
    }
}

/// System instructions for the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemMessage {
    /// The instruction text.
    pub content: String,
}

impl SystemMessage {
    /// Create a new system message.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// User input, an ordered sequence of content parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMessage {
    /// The content parts, in order.
    pub contents: Vec<Content>,
}

impl UserMessage {
    /// Create a user message from content parts.
    #[must_use]
    pub fn new(contents: Vec<Content>) -> Self {
        Self { contents }
    }

    /// Create a user message with a single text part.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::text(content)],
        }
    }

    /// Add a content part.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<Content>) -> Self {
        self.contents.push(content.into());
        self
    }

    /// Get the concatenated text of all text parts.
    #[must_use]
    pub fn text_content(&self) -> String {
        self.contents
            .iter()
            .filter_map(|c| match c {
                Content::Text(t) => Some(t.text.as_str()),
                Content::Image(_) => None,
            })
            .collect()
    }
}

/// Assistant output.
///
/// A completed assistant message carries either non-empty text or a
/// non-empty list of tool-call requests, never both: `text` is `None`
/// whenever `tool_calls` is populated. The streaming finalizer upholds
/// this; constructors here make it hard to get wrong by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantMessage {
    /// Text content; `None` when tool calls are present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Tool-call requests, in the order the model emitted them.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tool_calls: Vec<ToolCallRequest>,
}

impl AssistantMessage {
    /// Create an assistant message carrying text.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            tool_calls: Vec::new(),
        }
    }

    /// Create an assistant message carrying tool-call requests.
    #[must_use]
    pub fn from_tool_calls(tool_calls: Vec<ToolCallRequest>) -> Self {
        Self {
            text: None,
            tool_calls,
        }
    }

    /// Check if this message requests tool execution.
    #[must_use]
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }

    /// Get the text content, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// Result of executing a tool, fed back to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResultMessage {
    /// Id of the tool call this result answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    /// Name of the executed tool.
    pub tool_name: String,
    /// Result text.
    pub content: String,
}

impl ToolResultMessage {
    /// Create a new tool-result message.
    #[must_use]
    pub fn new(tool_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_call_id: None,
            tool_name: tool_name.into(),
            content: content.into(),
        }
    }

    /// Create a result for the given call, carrying over its id and name.
    #[must_use]
    pub fn from_call(call: &ToolCallRequest, content: impl Into<String>) -> Self {
        Self {
            tool_call_id: call.id.clone(),
            tool_name: call.name.clone(),
            content: content.into(),
        }
    }
}
