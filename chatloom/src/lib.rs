//! # chatloom
//!
//! A streaming chat-completion client toolkit. The transport layer decodes
//! provider wire formats into fragments; chatloom turns those fragments
//! into live token callbacks and a finalized, coherent response, including
//! incrementally assembled tool calls.
//!
//! ## Quick start
//!
//! ```rust
//! use chatloom::prelude::*;
//!
//! let config = ClientConfig::new("gpt-4o-mini")
//!     .settings(ChatSettings::new().temperature(0.0));
//!
//! let handler = CollectingHandler::new();
//! let mut session = config.open_session(
//!     vec![ChatMessage::user("What is the capital of Germany?")],
//!     Vec::new(),
//!     Box::new(handler.clone()),
//! );
//!
//! // The transport feeds decoded fragments as they arrive.
//! session.feed(StreamFragment::text("Ber"));
//! session.feed(StreamFragment::text("lin"));
//! session.feed(StreamFragment::usage(TokenUsage::with_tokens(14, 2)));
//! session.feed(StreamFragment::finish(FinishReason::Stop));
//!
//! let response = handler.response().unwrap();
//! assert_eq!(response.text(), Some("Berlin"));
//! assert_eq!(response.usage.unwrap().total(), 16);
//! ```
//!
//! ## Crates
//!
//! - [`chatloom_core`] holds the data model: messages, responses, tool
//!   specifications, usage accounting, and token estimation.
//! - [`chatloom_stream`] holds the streaming engine: fragments, the
//!   accumulator, sessions, handlers, and listeners.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub use chatloom_core as core;
pub use chatloom_stream as stream;

pub use chatloom_core::{
    AssistantMessage, ChatMessage, ChatResponse, ChatSettings, Content, FinishReason,
    HeuristicTokenizer, ImageContent, ParameterSchema, SystemMessage, TextContent, TokenUsage,
    Tokenizer, ToolCallRequest, ToolParameters, ToolResultMessage, ToolSpecification, UserMessage,
};
pub use chatloom_stream::{
    Attributes, ChatModelListener, ClientConfig, CollectingHandler, ErrorContext, RequestContext,
    RequestSnapshot, ResponseAccumulator, ResponseContext, SessionState, StreamError,
    StreamFragment, StreamResult, StreamingResponseHandler, StreamingSession,
};

/// Prelude module for common imports.
pub mod prelude {
    pub use chatloom_core::prelude::*;
    pub use chatloom_stream::prelude::*;
}
