//! Tool-call requests emitted by the model.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A request, emitted by the model, to invoke a tool with given arguments.
///
/// During streaming the arguments arrive as string fragments and are only
/// expected to parse as JSON once the response has completed. The payload is
/// therefore kept as an opaque string; use [`arguments_json`] after
/// completion when structured access is needed.
///
/// [`arguments_json`]: ToolCallRequest::arguments_json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Provider-assigned call id, echoed back in the tool-result message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Name of the tool to invoke.
    pub name: String,
    /// Argument payload. Opaque; valid JSON once the response is complete.
    pub arguments: String,
}

impl ToolCallRequest {
    /// Create a new tool-call request.
    #[must_use]
    pub fn new(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    /// Set the call id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Parse the accumulated arguments as JSON.
    pub fn arguments_json(&self) -> Result<JsonValue, serde_json::Error> {
        serde_json::from_str(&self.arguments)
    }
}
