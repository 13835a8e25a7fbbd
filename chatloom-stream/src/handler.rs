//! Streaming response handlers.
//!
//! The handler is the caller's view of a live stream: one call per text
//! token as it arrives, then exactly one terminal call with either the
//! finalized response or the error.

use std::sync::Arc;

use chatloom_core::ChatResponse;
use parking_lot::Mutex;

use crate::error::StreamError;

/// Callback interface for consuming a streamed response.
///
/// The session invokes callbacks strictly sequentially; no two callbacks
/// for the same session overlap. Exactly one of [`on_complete`] and
/// [`on_error`] fires per session, after which no further callbacks occur.
///
/// [`on_complete`]: StreamingResponseHandler::on_complete
/// [`on_error`]: StreamingResponseHandler::on_error
pub trait StreamingResponseHandler: Send {
    /// Called for each text token as it arrives.
    ///
    /// Tool-call fragments do not surface here; they are assembled
    /// internally and delivered whole via `on_complete`.
    fn on_next(&mut self, _token: &str) {}

    /// Called once when the stream completes successfully.
    fn on_complete(&mut self, response: ChatResponse);

    /// Called once if the stream fails.
    fn on_error(&mut self, error: StreamError);
}

#[derive(Debug, Default)]
struct CollectingInner {
    tokens: Vec<String>,
    response: Option<ChatResponse>,
    error: Option<StreamError>,
}

/// Handler that collects tokens and the terminal outcome.
///
/// Cloning shares the underlying state, so a caller can hand one clone to
/// a session and inspect the other after the stream ends.
#[derive(Debug, Clone, Default)]
pub struct CollectingHandler {
    inner: Arc<Mutex<CollectingInner>>,
}

impl CollectingHandler {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the tokens received so far, in arrival order.
    #[must_use]
    pub fn tokens(&self) -> Vec<String> {
        self.inner.lock().tokens.clone()
    }

    /// Get all received tokens concatenated.
    #[must_use]
    pub fn concatenated_text(&self) -> String {
        self.inner.lock().tokens.concat()
    }

    /// Get the completed response, if the stream completed.
    #[must_use]
    pub fn response(&self) -> Option<ChatResponse> {
        self.inner.lock().response.clone()
    }

    /// Get the error, if the stream failed.
    #[must_use]
    pub fn error(&self) -> Option<StreamError> {
        self.inner.lock().error.clone()
    }

    /// Get the terminal outcome, if any.
    #[must_use]
    pub fn result(&self) -> Option<Result<ChatResponse, StreamError>> {
        let inner = self.inner.lock();
        if let Some(ref response) = inner.response {
            Some(Ok(response.clone()))
        } else {
            inner.error.clone().map(Err)
        }
    }

    /// Check if a terminal callback has fired.
    #[must_use]
    pub fn is_done(&self) -> bool {
        let inner = self.inner.lock();
        inner.response.is_some() || inner.error.is_some()
    }
}

impl StreamingResponseHandler for CollectingHandler {
    fn on_next(&mut self, token: &str) {
        self.inner.lock().tokens.push(token.to_string());
    }

    fn on_complete(&mut self, response: ChatResponse) {
        self.inner.lock().response = Some(response);
    }

    fn on_error(&mut self, error: StreamError) {
        self.inner.lock().error = Some(error);
    }
}
