//! # chatloom-stream
//!
//! Streaming session engine for chatloom: folds provider fragments into a
//! coherent response while surfacing text tokens as they arrive.
//!
//! - **Fragments**: the decoded units a transport feeds in ([`StreamFragment`])
//! - **Accumulation**: text buffering and per-index tool-call assembly
//!   ([`ResponseAccumulator`])
//! - **Sessions**: the lifecycle state machine with exactly-once terminal
//!   callbacks ([`StreamingSession`])
//! - **Handlers**: the caller's token/completion/error callbacks
//!   ([`StreamingResponseHandler`])
//! - **Listeners**: cross-cutting observation with a shared per-exchange
//!   attribute bag ([`ChatModelListener`])
//!
//! ## Example
//!
//! ```rust
//! use chatloom_core::FinishReason;
//! use chatloom_stream::{CollectingHandler, ClientConfig, StreamFragment};
//!
//! let config = ClientConfig::new("gpt-4o-mini");
//! let handler = CollectingHandler::new();
//! let mut session = config.open_session(
//!     vec![chatloom_core::ChatMessage::user("What is the capital of Germany?")],
//!     Vec::new(),
//!     Box::new(handler.clone()),
//! );
//!
//! session.feed(StreamFragment::text("Ber"));
//! session.feed(StreamFragment::text("lin"));
//! session.feed(StreamFragment::finish(FinishReason::Stop));
//!
//! assert_eq!(handler.response().unwrap().text(), Some("Berlin"));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod accumulator;
pub mod config;
pub mod error;
pub mod fragment;
pub mod handler;
pub mod listener;
pub mod session;

// Re-exports for convenience
pub use accumulator::{ResponseAccumulator, ToolCallBuilder};
pub use config::ClientConfig;
pub use error::{StreamError, StreamResult};
pub use fragment::StreamFragment;
pub use handler::{CollectingHandler, StreamingResponseHandler};
pub use listener::{
    Attributes, ChatModelListener, ErrorContext, RequestContext, RequestSnapshot, ResponseContext,
};
pub use session::{SessionState, StreamingSession};

/// Prelude module for common imports.
pub mod prelude {
    pub use crate::accumulator::ResponseAccumulator;
    pub use crate::config::ClientConfig;
    pub use crate::error::{StreamError, StreamResult};
    pub use crate::fragment::StreamFragment;
    pub use crate::handler::{CollectingHandler, StreamingResponseHandler};
    pub use crate::listener::{
        Attributes, ChatModelListener, ErrorContext, RequestContext, RequestSnapshot,
        ResponseContext,
    };
    pub use crate::session::{SessionState, StreamingSession};
}
