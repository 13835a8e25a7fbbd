//! Streaming session lifecycle.
//!
//! A session owns one in-flight streamed exchange: it folds fragments into
//! the accumulator, surfaces text tokens to the handler as they arrive,
//! and fires exactly one terminal callback when the stream ends.

use std::sync::Arc;

use chatloom_core::ChatResponse;
use futures::{Stream, StreamExt};
use uuid::Uuid;

use crate::accumulator::ResponseAccumulator;
use crate::error::StreamError;
use crate::fragment::StreamFragment;
use crate::handler::StreamingResponseHandler;
use crate::listener::{
    Attributes, ChatModelListener, ErrorContext, RequestContext, RequestSnapshot, ResponseContext,
};

/// Lifecycle state of a streaming session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Session opened, no fragment processed yet.
    Open,
    /// At least one fragment processed.
    Streaming,
    /// Completed successfully; the completion callback has fired.
    Completed,
    /// Failed; the error callback has fired.
    Errored,
    /// Cancelled by the caller; no terminal callback fired.
    Cancelled,
}

impl SessionState {
    /// Check if this is a terminal state.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Errored | Self::Cancelled)
    }
}

/// One in-flight streamed chat exchange.
///
/// All callbacks for a session run strictly sequentially on the thread
/// that feeds it. Once a terminal state is reached, further fragments are
/// logged and ignored; no callback ever fires twice.
pub struct StreamingSession {
    id: Uuid,
    state: SessionState,
    accumulator: ResponseAccumulator,
    handler: Box<dyn StreamingResponseHandler>,
    listeners: Vec<Arc<dyn ChatModelListener>>,
    request: RequestSnapshot,
    attributes: Attributes,
}

impl StreamingSession {
    /// Open a session, notifying listeners of the outgoing request.
    pub fn new(
        request: RequestSnapshot,
        handler: Box<dyn StreamingResponseHandler>,
        listeners: Vec<Arc<dyn ChatModelListener>>,
    ) -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            state: SessionState::Open,
            accumulator: ResponseAccumulator::new(),
            handler,
            listeners,
            request,
            attributes: Attributes::new(),
        };
        session.notify_request();
        session
    }

    /// Get the session id.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Get the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Get the request that opened this session.
    #[must_use]
    pub fn request(&self) -> &RequestSnapshot {
        &self.request
    }

    /// Process one fragment.
    ///
    /// Fragments arriving after a terminal state are ignored with a
    /// warning. A `Finish` fragment completes the session; an `Error`
    /// fragment fails it. Everything else accumulates.
    pub fn feed(&mut self, fragment: StreamFragment) {
        if self.state.is_terminal() {
            tracing::warn!(
                session_id = %self.id,
                state = ?self.state,
                "ignoring fragment received after terminal state"
            );
            return;
        }
        self.state = SessionState::Streaming;

        match fragment {
            StreamFragment::TextDelta { content } => {
                self.accumulator.apply_text_delta(&content);
                self.handler.on_next(&content);
            }
            StreamFragment::ToolCallDelta { .. } | StreamFragment::Usage(_) => {
                self.accumulator.apply(&fragment);
            }
            StreamFragment::Finish(reason) => {
                self.accumulator.set_finish_reason(reason);
                self.complete();
            }
            StreamFragment::Error(error) => {
                self.fail(error);
            }
        }
    }

    /// Complete the session, finalizing the accumulated response.
    ///
    /// Listeners observe the response before the handler's completion
    /// callback fires. No-op if already terminal.
    pub fn complete(&mut self) {
        if self.state.is_terminal() {
            tracing::warn!(session_id = %self.id, "complete() after terminal state ignored");
            return;
        }
        self.state = SessionState::Completed;

        let accumulator = std::mem::take(&mut self.accumulator);
        let response = accumulator.finalize();

        for listener in &self.listeners {
            listener.on_response(&mut ResponseContext {
                response: &response,
                request: &self.request,
                attributes: &mut self.attributes,
            });
        }
        self.handler.on_complete(response);
    }

    /// Fail the session with the given error.
    ///
    /// Listeners receive a snapshot of whatever accumulated before the
    /// failure; the handler receives only the error. No-op if already
    /// terminal.
    pub fn fail(&mut self, error: StreamError) {
        if self.state.is_terminal() {
            tracing::warn!(session_id = %self.id, "fail() after terminal state ignored");
            return;
        }
        self.state = SessionState::Errored;

        let partial = if self.accumulator.is_empty() {
            None
        } else {
            Some(self.accumulator.snapshot())
        };
        for listener in &self.listeners {
            listener.on_error(&mut ErrorContext {
                error: &error,
                request: &self.request,
                partial_response: partial.as_ref(),
                attributes: &mut self.attributes,
            });
        }
        self.handler.on_error(error);
    }

    /// Cancel the session.
    ///
    /// Transitions to a terminal state without firing any callback; the
    /// partially accumulated response is discarded.
    pub fn cancel(&mut self) {
        if self.state.is_terminal() {
            tracing::warn!(session_id = %self.id, "cancel() after terminal state ignored");
            return;
        }
        tracing::debug!(session_id = %self.id, "session cancelled");
        self.state = SessionState::Cancelled;
    }

    /// Drive the session from a fragment stream until it terminates.
    ///
    /// Stops at the first terminal fragment. A stream that ends without
    /// one is treated as a transport failure.
    pub async fn drive<S>(&mut self, mut stream: S) -> SessionState
    where
        S: Stream<Item = StreamFragment> + Unpin,
    {
        while let Some(fragment) = stream.next().await {
            self.feed(fragment);
            if self.state.is_terminal() {
                return self.state;
            }
        }
        if !self.state.is_terminal() {
            self.fail(StreamError::Transport(
                "stream ended without a terminal fragment".to_string(),
            ));
        }
        self.state
    }

    fn notify_request(&mut self) {
        for listener in &self.listeners {
            listener.on_request(&mut RequestContext {
                request: &self.request,
                attributes: &mut self.attributes,
            });
        }
    }

    /// Snapshot the response accumulated so far, for diagnostics.
    #[must_use]
    pub fn partial_response(&self) -> Option<ChatResponse> {
        if self.accumulator.is_empty() {
            None
        } else {
            Some(self.accumulator.snapshot())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatloom_core::{ChatMessage, FinishReason, TokenUsage};
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;

    use crate::handler::CollectingHandler;

    fn request() -> RequestSnapshot {
        RequestSnapshot {
            model: "gpt-4o-mini".into(),
            temperature: Some(0.0),
            top_p: None,
            max_tokens: None,
            messages: vec![ChatMessage::user("What is the capital of Germany?")],
            tool_specifications: Vec::new(),
        }
    }

    fn session_with(handler: CollectingHandler) -> StreamingSession {
        StreamingSession::new(request(), Box::new(handler), Vec::new())
    }

    #[test]
    fn test_text_stream_completes() {
        let handler = CollectingHandler::new();
        let mut session = session_with(handler.clone());
        assert_eq!(session.state(), SessionState::Open);

        session.feed(StreamFragment::text("Ber"));
        assert_eq!(session.state(), SessionState::Streaming);
        session.feed(StreamFragment::text("lin"));
        session.feed(StreamFragment::usage(TokenUsage::with_tokens(5, 2)));
        session.feed(StreamFragment::finish(FinishReason::Stop));

        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(handler.tokens(), vec!["Ber", "lin"]);

        let response = handler.response().unwrap();
        assert_eq!(response.text(), Some("Berlin"));
        assert_eq!(response.finish_reason, Some(FinishReason::Stop));
        let usage = response.usage.unwrap();
        assert_eq!(usage.input_tokens, Some(5));
        assert_eq!(usage.output_tokens, Some(2));
        assert_eq!(usage.total_tokens, Some(7));
        // The completed text equals the concatenation of streamed tokens.
        assert_eq!(handler.concatenated_text(), response.text().unwrap());
    }

    #[test]
    fn test_tool_call_stream_yields_no_tokens() {
        let handler = CollectingHandler::new();
        let mut session = session_with(handler.clone());

        session.feed(StreamFragment::tool_start(0, "call_1", "sum"));
        session.feed(StreamFragment::tool_arguments(0, r#"{"first":"#));
        session.feed(StreamFragment::tool_arguments(0, r#"2,"second":2}"#));
        session.feed(StreamFragment::finish(FinishReason::ToolCalls));

        assert!(handler.tokens().is_empty());
        let response = handler.response().unwrap();
        assert!(response.text().is_none());
        assert_eq!(response.tool_calls().len(), 1);
        assert_eq!(response.tool_calls()[0].name, "sum");
        assert_eq!(
            response.tool_calls()[0].arguments,
            r#"{"first":2,"second":2}"#
        );
        assert_eq!(response.finish_reason, Some(FinishReason::ToolCalls));
    }

    #[test]
    fn test_interleaved_tool_calls_keep_first_appearance_order() {
        let handler = CollectingHandler::new();
        let mut session = session_with(handler.clone());

        session.feed(StreamFragment::tool_start(0, "c0", "retrieve_payment_status"));
        session.feed(StreamFragment::tool_start(1, "c1", "retrieve_payment_date"));
        session.feed(StreamFragment::tool_arguments(1, r#"{"id":"T1002"}"#));
        session.feed(StreamFragment::tool_arguments(0, r#"{"id":"T1001"}"#));
        session.feed(StreamFragment::finish(FinishReason::ToolCalls));

        let response = handler.response().unwrap();
        let names: Vec<_> = response
            .tool_calls()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["retrieve_payment_status", "retrieve_payment_date"]);
        assert_eq!(response.tool_calls()[0].arguments, r#"{"id":"T1001"}"#);
        assert_eq!(response.tool_calls()[1].arguments, r#"{"id":"T1002"}"#);
    }

    #[test]
    fn test_error_fragment_fires_on_error_once() {
        let handler = CollectingHandler::new();
        let mut session = session_with(handler.clone());

        session.feed(StreamFragment::text("partial"));
        session.feed(StreamFragment::error(StreamError::Authentication(
            "Incorrect API key provided".into(),
        )));

        assert_eq!(session.state(), SessionState::Errored);
        assert!(handler.response().is_none());
        assert!(matches!(
            handler.error(),
            Some(StreamError::Authentication(_))
        ));

        // Anything after the terminal state is ignored.
        session.feed(StreamFragment::text("late"));
        session.feed(StreamFragment::finish(FinishReason::Stop));
        assert_eq!(session.state(), SessionState::Errored);
        assert_eq!(handler.tokens(), vec!["partial"]);
        assert!(handler.response().is_none());
    }

    #[test]
    fn test_post_completion_fragments_ignored() {
        let handler = CollectingHandler::new();
        let mut session = session_with(handler.clone());

        session.feed(StreamFragment::text("done"));
        session.feed(StreamFragment::finish(FinishReason::Stop));
        let first = handler.response().unwrap();

        session.feed(StreamFragment::text("extra"));
        session.feed(StreamFragment::finish(FinishReason::Stop));

        assert_eq!(handler.tokens(), vec!["done"]);
        assert_eq!(handler.response().unwrap(), first);
    }

    #[test]
    fn test_cancel_is_terminal_without_callbacks() {
        let handler = CollectingHandler::new();
        let mut session = session_with(handler.clone());

        session.feed(StreamFragment::text("par"));
        session.cancel();

        assert_eq!(session.state(), SessionState::Cancelled);
        assert!(!handler.is_done());

        session.feed(StreamFragment::text("tial"));
        session.feed(StreamFragment::finish(FinishReason::Stop));
        assert!(!handler.is_done());
        assert_eq!(handler.tokens(), vec!["par"]);
    }

    #[test]
    fn test_length_finish_reason_passthrough() {
        let handler = CollectingHandler::new();
        let mut session = session_with(handler.clone());

        session.feed(StreamFragment::text("Once upon a"));
        session.feed(StreamFragment::finish(FinishReason::Length));

        let response = handler.response().unwrap();
        assert_eq!(response.finish_reason, Some(FinishReason::Length));
        assert_eq!(response.text(), Some("Once upon a"));
    }

    #[derive(Default)]
    struct RecordingListener {
        events: Mutex<Vec<String>>,
    }

    impl ChatModelListener for RecordingListener {
        fn on_request(&self, context: &mut RequestContext<'_>) {
            context
                .attributes
                .insert("id".to_string(), serde_json::json!("12345"));
            self.events
                .lock()
                .push(format!("request:{}", context.request.model));
        }

        fn on_response(&self, context: &mut ResponseContext<'_>) {
            let id = context.attributes["id"].clone();
            self.events
                .lock()
                .push(format!("response:{}", id.as_str().unwrap_or("")));
        }

        fn on_error(&self, context: &mut ErrorContext<'_>) {
            let partial = context
                .partial_response
                .and_then(|r| r.text())
                .unwrap_or("")
                .to_string();
            self.events
                .lock()
                .push(format!("error:{}:{}", context.error, partial));
        }
    }

    #[test]
    fn test_listener_attributes_shared_across_hooks() {
        let listener = Arc::new(RecordingListener::default());
        let handler = CollectingHandler::new();
        let mut session = StreamingSession::new(
            request(),
            Box::new(handler.clone()),
            vec![listener.clone()],
        );

        session.feed(StreamFragment::text("hi"));
        session.feed(StreamFragment::finish(FinishReason::Stop));

        let events = listener.events.lock().clone();
        assert_eq!(events, vec!["request:gpt-4o-mini", "response:12345"]);
    }

    #[test]
    fn test_listener_error_context_carries_partial_response() {
        let listener = Arc::new(RecordingListener::default());
        let handler = CollectingHandler::new();
        let mut session = StreamingSession::new(
            request(),
            Box::new(handler.clone()),
            vec![listener.clone()],
        );

        session.feed(StreamFragment::text("half an ans"));
        session.feed(StreamFragment::error(StreamError::transport(
            "connection reset",
        )));

        let events = listener.events.lock().clone();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], "request:gpt-4o-mini");
        assert_eq!(
            events[1],
            "error:Transport error: connection reset:half an ans"
        );
    }

    #[tokio::test]
    async fn test_drive_until_finish() {
        let handler = CollectingHandler::new();
        let mut session = session_with(handler.clone());

        let fragments = vec![
            StreamFragment::text("Hel"),
            StreamFragment::text("lo"),
            StreamFragment::usage(TokenUsage::with_tokens(5, 2)),
            StreamFragment::finish(FinishReason::Stop),
            // Past the terminal fragment; drive must not consume it.
            StreamFragment::text("never seen"),
        ];
        let stream = futures::stream::iter(fragments);
        let state = session.drive(stream).await;

        assert_eq!(state, SessionState::Completed);
        assert_eq!(handler.concatenated_text(), "Hello");
        assert_eq!(handler.response().unwrap().text(), Some("Hello"));
    }

    #[tokio::test]
    async fn test_drive_exhausted_without_terminal_is_transport_error() {
        let handler = CollectingHandler::new();
        let mut session = session_with(handler.clone());

        let stream = futures::stream::iter(vec![StreamFragment::text("trunca")]);
        let state = session.drive(stream).await;

        assert_eq!(state, SessionState::Errored);
        assert!(matches!(handler.error(), Some(StreamError::Transport(_))));
    }

    #[test]
    fn test_partial_response_snapshot() {
        let handler = CollectingHandler::new();
        let mut session = session_with(handler);

        assert!(session.partial_response().is_none());
        session.feed(StreamFragment::text("so far"));
        assert_eq!(
            session.partial_response().unwrap().text(),
            Some("so far")
        );
    }
}
