//! Message types for chat conversations.
//!
//! The conversation history sent to the model is a `Vec<ChatMessage>`;
//! the model answers with an [`AssistantMessage`], possibly built up
//! incrementally by the streaming layer.

mod content;
mod message;
mod tool_call;

pub use content::{Content, ImageContent, TextContent};
pub use message::{
    AssistantMessage, ChatMessage, SystemMessage, ToolResultMessage, UserMessage,
};
pub use tool_call::ToolCallRequest;
