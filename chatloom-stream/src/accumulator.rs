//! Delta accumulation.
//!
//! Folds streamed fragments into one coherent in-progress response. Text
//! deltas append to a single growing buffer; tool-call deltas are routed
//! by wire index into per-call builders. Nothing is externally visible
//! until finalization.

use std::collections::HashMap;

use chatloom_core::{
    AssistantMessage, ChatResponse, FinishReason, TokenUsage, ToolCallRequest,
};

use crate::fragment::StreamFragment;

/// Incomplete tool call being accumulated.
///
/// The name and id arrive once (first non-empty value wins); argument
/// fragments are concatenated in arrival order. A builder only becomes a
/// [`ToolCallRequest`] once its name is known.
#[derive(Debug, Clone, Default)]
pub struct ToolCallBuilder {
    /// Provider-assigned call id.
    pub id: Option<String>,
    /// Tool name.
    pub name: Option<String>,
    /// Buffer of concatenated argument fragments.
    pub arguments: String,
}

impl ToolCallBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if anything has accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none() && self.arguments.is_empty()
    }

    /// Build the completed request, if the name is known.
    #[must_use]
    pub fn build(&self) -> Option<ToolCallRequest> {
        let name = self.name.as_ref()?;
        let mut request = ToolCallRequest::new(name.clone(), self.arguments.clone());
        if let Some(ref id) = self.id {
            request = request.with_id(id.clone());
        }
        Some(request)
    }
}

/// Accumulates streamed fragments into an in-progress response.
///
/// Owned exclusively by one session; never shared. All `apply_*` methods
/// are best-effort and never panic on malformed input — partial and
/// out-of-order wire data is expected in real streaming systems.
#[derive(Debug, Default)]
pub struct ResponseAccumulator {
    text: String,
    // Builders in first-appearance order; the map routes wire indices
    // (which need not be contiguous) to positions.
    builders: Vec<ToolCallBuilder>,
    index_to_position: HashMap<u32, usize>,
    usage: Option<TokenUsage>,
    finish_reason: Option<FinishReason>,
    response_id: Option<String>,
    model: Option<String>,
}

impl ResponseAccumulator {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one non-terminal fragment into the accumulated state.
    ///
    /// `Finish` sets the finish reason and `Error` is ignored here; the
    /// session decides what both mean for its lifecycle.
    pub fn apply(&mut self, fragment: &StreamFragment) {
        match fragment {
            StreamFragment::TextDelta { content } => self.apply_text_delta(content),
            StreamFragment::ToolCallDelta {
                index,
                id,
                name,
                arguments,
            } => self.apply_tool_call_delta(
                *index,
                id.as_deref(),
                name.as_deref(),
                arguments.as_deref(),
            ),
            StreamFragment::Usage(usage) => self.set_usage(*usage),
            StreamFragment::Finish(reason) => self.set_finish_reason(*reason),
            StreamFragment::Error(_) => {}
        }
    }

    /// Append a text delta to the growing text buffer.
    pub fn apply_text_delta(&mut self, content: &str) {
        self.text.push_str(content);
    }

    /// Fold a tool-call delta into the builder for its wire index.
    ///
    /// A delta for a previously-unseen index creates a new builder at the
    /// next position; first-appearance order defines the final ordering of
    /// tool calls. Fragments for different indices may interleave and are
    /// never concatenated across calls.
    pub fn apply_tool_call_delta(
        &mut self,
        index: u32,
        id: Option<&str>,
        name: Option<&str>,
        arguments: Option<&str>,
    ) {
        let position = match self.index_to_position.get(&index) {
            Some(&position) => position,
            None => {
                let position = self.builders.len();
                self.builders.push(ToolCallBuilder::new());
                self.index_to_position.insert(index, position);
                position
            }
        };

        let builder = &mut self.builders[position];
        if builder.id.is_none() {
            if let Some(id) = id.filter(|s| !s.is_empty()) {
                builder.id = Some(id.to_string());
            }
        }
        if builder.name.is_none() {
            if let Some(name) = name.filter(|s| !s.is_empty()) {
                builder.name = Some(name.to_string());
            }
        }
        if let Some(arguments) = arguments {
            builder.arguments.push_str(arguments);
        }
    }

    /// Record the usage reported by the provider.
    pub fn set_usage(&mut self, usage: TokenUsage) {
        self.usage = Some(usage);
    }

    /// Record the finish reason, passthrough.
    pub fn set_finish_reason(&mut self, reason: FinishReason) {
        self.finish_reason = Some(reason);
    }

    /// Record the provider-assigned response id.
    pub fn set_response_id(&mut self, id: impl Into<String>) {
        self.response_id = Some(id.into());
    }

    /// Record the responding model's name.
    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = Some(model.into());
    }

    /// Get the accumulated text so far.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check if any tool-call builder has accumulated content.
    #[must_use]
    pub fn has_tool_calls(&self) -> bool {
        self.builders.iter().any(|b| !b.is_empty())
    }

    /// Check if nothing has accumulated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && !self.has_tool_calls()
    }

    /// Get the recorded finish reason, if any.
    #[must_use]
    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
    }

    /// Get the recorded usage, if any.
    #[must_use]
    pub fn usage(&self) -> Option<TokenUsage> {
        self.usage
    }

    /// Snapshot the current state as a response (clones data).
    ///
    /// Used for diagnostics when a stream fails mid-flight; the terminal
    /// path uses the consuming [`finalize`](Self::finalize).
    #[must_use]
    pub fn snapshot(&self) -> ChatResponse {
        self.build_response(
            self.completed_tool_calls(false),
            self.text.clone(),
            self.response_id.clone(),
            self.model.clone(),
        )
    }

    /// Finalize into a completed response (consumes self).
    #[must_use]
    pub fn finalize(self) -> ChatResponse {
        let tool_calls = self.completed_tool_calls(true);
        let text = self.text.clone();
        let response_id = self.response_id.clone();
        let model = self.model.clone();
        self.build_response(tool_calls, text, response_id, model)
    }

    // A builder without a name is normal mid-stream; only the terminal
    // path warns before dropping it.
    fn completed_tool_calls(&self, warn_nameless: bool) -> Vec<ToolCallRequest> {
        self.builders
            .iter()
            .filter(|b| !b.is_empty())
            .filter_map(|builder| {
                let request = builder.build();
                if request.is_none() && warn_nameless {
                    tracing::warn!(
                        arguments = %builder.arguments,
                        "dropping tool-call builder that never received a name"
                    );
                }
                request
            })
            .collect()
    }

    fn build_response(
        &self,
        tool_calls: Vec<ToolCallRequest>,
        text: String,
        response_id: Option<String>,
        model: Option<String>,
    ) -> ChatResponse {
        let message = if !tool_calls.is_empty() {
            // Canonical form: text is absent when tool calls are present.
            AssistantMessage::from_tool_calls(tool_calls)
        } else if !text.is_empty() {
            AssistantMessage::from_text(text)
        } else {
            AssistantMessage {
                text: None,
                tool_calls: Vec::new(),
            }
        };

        let mut response = ChatResponse::new(message);
        response.id = response_id;
        response.model = model;
        response.finish_reason = self.finish_reason;
        response.usage = self.usage.map(normalize_usage);
        response
    }
}

/// Enforce the sum invariant on reported usage.
///
/// Usage is attached verbatim when consistent; a partially-populated or
/// inconsistent record has its total recomputed so `total == input +
/// output` always holds on a completed response.
fn normalize_usage(mut usage: TokenUsage) -> TokenUsage {
    if !usage.is_consistent() || usage.total_tokens.is_none() {
        usage.recalculate_total();
    }
    usage
}
