//! # chatloom-core
//!
//! Core types for the chatloom chat-completion client:
//!
//! - **Messages**: conversation history (system/user/assistant/tool-result)
//! - **Responses**: completed assistant output with usage and finish reason
//! - **Tools**: tool specifications and tool-call requests
//! - **Usage**: token accounting with the `total == input + output` invariant
//! - **Tokenizer**: pluggable, deterministic token estimation
//!
//! ## Example
//!
//! ```rust
//! use chatloom_core::{
//!     messages::ChatMessage,
//!     settings::ChatSettings,
//!     tokenizer::{HeuristicTokenizer, Tokenizer},
//! };
//!
//! let messages = vec![
//!     ChatMessage::system("You are a helpful assistant."),
//!     ChatMessage::user("What is the capital of Germany?"),
//! ];
//!
//! let settings = ChatSettings::new().temperature(0.0).max_tokens(100);
//! assert!(!settings.is_empty());
//!
//! let estimate = HeuristicTokenizer::new().estimate_tokens_in_messages(&messages);
//! assert!(estimate > 0);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod finish;
pub mod messages;
pub mod response;
pub mod settings;
pub mod tokenizer;
pub mod tools;
pub mod usage;

// Re-exports for convenience
pub use finish::FinishReason;
pub use messages::{
    AssistantMessage, ChatMessage, Content, ImageContent, SystemMessage, TextContent,
    ToolCallRequest, ToolResultMessage, UserMessage,
};
pub use response::ChatResponse;
pub use settings::ChatSettings;
pub use tokenizer::{HeuristicTokenizer, Tokenizer};
pub use tools::{ParameterSchema, ToolParameters, ToolSpecification};
pub use usage::TokenUsage;

/// Prelude module for common imports.
pub mod prelude {
    pub use crate::finish::FinishReason;
    pub use crate::messages::{
        AssistantMessage, ChatMessage, Content, ImageContent, SystemMessage, TextContent,
        ToolCallRequest, ToolResultMessage, UserMessage,
    };
    pub use crate::response::ChatResponse;
    pub use crate::settings::ChatSettings;
    pub use crate::tokenizer::{HeuristicTokenizer, Tokenizer};
    pub use crate::tools::{ParameterSchema, ToolParameters, ToolSpecification};
    pub use crate::usage::TokenUsage;
}
