//! Client configuration.

use std::fmt;
use std::sync::Arc;

use chatloom_core::{
    ChatMessage, ChatSettings, HeuristicTokenizer, Tokenizer, ToolSpecification,
};

use crate::handler::StreamingResponseHandler;
use crate::listener::{ChatModelListener, RequestSnapshot};
use crate::session::StreamingSession;

/// Configuration for a streaming chat client.
///
/// Holds connection parameters, default generation settings, the tokenizer
/// used for pre-flight estimates, and the listeners attached to every
/// session it opens.
#[derive(Clone)]
pub struct ClientConfig {
    /// Endpoint base URL.
    pub endpoint: String,
    /// API key sent with each request.
    pub api_key: String,
    /// Model name requests target.
    pub model: String,
    /// Default generation settings.
    pub settings: ChatSettings,
    /// Retry budget for the transport layer; 0 disables retries.
    pub max_retries: u32,
    /// Token estimator for pre-flight accounting.
    pub tokenizer: Arc<dyn Tokenizer>,
    /// Listeners attached to every session.
    pub listeners: Vec<Arc<dyn ChatModelListener>>,
}

impl ClientConfig {
    /// Create a configuration for the given model with defaults.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            endpoint: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: model.into(),
            settings: ChatSettings::default(),
            max_retries: 3,
            tokenizer: Arc::new(HeuristicTokenizer::new()),
            listeners: Vec::new(),
        }
    }

    /// Set the endpoint base URL.
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the API key.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Set default generation settings.
    #[must_use]
    pub fn settings(mut self, settings: ChatSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the retry budget; 0 disables retries.
    #[must_use]
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the tokenizer.
    #[must_use]
    pub fn tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Attach a listener.
    #[must_use]
    pub fn listener(mut self, listener: Arc<dyn ChatModelListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Open a streaming session for the given conversation.
    ///
    /// The session snapshots the request for listeners and fires their
    /// request hooks immediately.
    pub fn open_session(
        &self,
        messages: Vec<ChatMessage>,
        tool_specifications: Vec<ToolSpecification>,
        handler: Box<dyn StreamingResponseHandler>,
    ) -> StreamingSession {
        let request = RequestSnapshot {
            model: self.model.clone(),
            temperature: self.settings.temperature,
            top_p: self.settings.top_p,
            max_tokens: self.settings.max_tokens,
            messages,
            tool_specifications,
        };
        StreamingSession::new(request, handler, self.listeners.clone())
    }

    /// Estimate the token count of raw text with the configured tokenizer.
    #[must_use]
    pub fn estimate_token_count(&self, text: &str) -> u64 {
        self.tokenizer.estimate_tokens_in_text(text)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("settings", &self.settings)
            .field("max_retries", &self.max_retries)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
