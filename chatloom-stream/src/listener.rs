//! Observation hooks for chat exchanges.
//!
//! Listeners observe a session from the outside without influencing it.
//! All listeners registered on a session share one attribute bag per
//! exchange, so state written during the request hook is readable in the
//! terminal hook.

use std::collections::HashMap;

use chatloom_core::{ChatMessage, ChatResponse, ToolSpecification};
use serde_json::Value as JsonValue;

use crate::error::StreamError;

/// Per-exchange attribute bag shared across listener hooks.
///
/// The same map instance flows from the request context into the matching
/// response or error context.
pub type Attributes = HashMap<String, JsonValue>;

/// Immutable view of the request that opened a session.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSnapshot {
    /// Model the request targets.
    pub model: String,
    /// Sampling temperature, if set.
    pub temperature: Option<f64>,
    /// Nucleus sampling parameter, if set.
    pub top_p: Option<f64>,
    /// Output token cap, if set.
    pub max_tokens: Option<u64>,
    /// Conversation history being sent.
    pub messages: Vec<ChatMessage>,
    /// Tools offered to the model.
    pub tool_specifications: Vec<ToolSpecification>,
}

/// Context passed to [`ChatModelListener::on_request`].
pub struct RequestContext<'a> {
    /// The outgoing request.
    pub request: &'a RequestSnapshot,
    /// Shared attribute bag for this exchange.
    pub attributes: &'a mut Attributes,
}

/// Context passed to [`ChatModelListener::on_response`].
pub struct ResponseContext<'a> {
    /// The completed response.
    pub response: &'a ChatResponse,
    /// The request that produced it.
    pub request: &'a RequestSnapshot,
    /// Shared attribute bag for this exchange.
    pub attributes: &'a mut Attributes,
}

/// Context passed to [`ChatModelListener::on_error`].
pub struct ErrorContext<'a> {
    /// The error that terminated the exchange.
    pub error: &'a StreamError,
    /// The request that failed.
    pub request: &'a RequestSnapshot,
    /// Whatever had accumulated before the failure, for diagnostics.
    pub partial_response: Option<&'a ChatResponse>,
    /// Shared attribute bag for this exchange.
    pub attributes: &'a mut Attributes,
}

/// Observer of chat exchanges.
///
/// Hooks are invoked synchronously on the session's thread; implementations
/// should be quick. Default implementations do nothing, so a listener only
/// overrides the hooks it cares about.
pub trait ChatModelListener: Send + Sync {
    /// Called once when a session opens, before any fragment is processed.
    fn on_request(&self, _context: &mut RequestContext<'_>) {}

    /// Called once when an exchange completes successfully.
    fn on_response(&self, _context: &mut ResponseContext<'_>) {}

    /// Called once when an exchange fails.
    fn on_error(&self, _context: &mut ErrorContext<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SilentListener;
    impl ChatModelListener for SilentListener {}

    #[test]
    fn test_default_hooks_are_noops() {
        let listener = SilentListener;
        let request = RequestSnapshot {
            model: "gpt-4o-mini".into(),
            temperature: Some(0.0),
            top_p: None,
            max_tokens: None,
            messages: vec![ChatMessage::user("hi")],
            tool_specifications: Vec::new(),
        };
        let mut attributes = Attributes::new();
        listener.on_request(&mut RequestContext {
            request: &request,
            attributes: &mut attributes,
        });
        assert!(attributes.is_empty());
    }
}
