//! Token count estimation.
//!
//! Estimates are advisory, used for pre-flight accounting only; the
//! authoritative counts come back from the provider in [`TokenUsage`].
//! Implementations must be deterministic and perform no I/O.
//!
//! [`TokenUsage`]: crate::usage::TokenUsage

use crate::messages::{ChatMessage, Content, ToolCallRequest};
use crate::tools::ToolSpecification;

/// Pluggable token count estimator.
///
/// Callers may supply their own implementation (e.g. backed by a real BPE
/// vocabulary) through the client configuration; [`HeuristicTokenizer`] is
/// the default.
pub trait Tokenizer: Send + Sync {
    /// Estimate the token count of raw text.
    fn estimate_tokens_in_text(&self, text: &str) -> u64;

    /// Estimate the token count of one message, including role overhead.
    fn estimate_tokens_in_message(&self, message: &ChatMessage) -> u64;

    /// Estimate the token count of a sequence of messages.
    fn estimate_tokens_in_messages(&self, messages: &[ChatMessage]) -> u64 {
        messages
            .iter()
            .map(|m| self.estimate_tokens_in_message(m))
            .sum()
    }

    /// Estimate the token count of a sequence of tool specifications.
    fn estimate_tokens_in_tool_specifications(&self, specifications: &[ToolSpecification]) -> u64;

    /// Estimate the token count of a sequence of tool-call requests.
    fn estimate_tokens_in_tool_call_requests(&self, requests: &[ToolCallRequest]) -> u64;
}

/// Rough character-based estimator.
///
/// Approximates one token per four bytes of UTF-8, with fixed overheads
/// for message framing, image content, and tool schemas. Typically within
/// a few percent of real BPE counts on English prose, which is all the
/// advisory use case needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTokenizer;

/// Framing overhead per message (role markers, separators).
const TOKENS_PER_MESSAGE: u64 = 3;
/// Flat estimate for an image content part.
const TOKENS_PER_IMAGE: u64 = 85;
/// Framing overhead per tool specification or call.
const TOKENS_PER_TOOL: u64 = 6;
/// Framing overhead per declared tool parameter.
const TOKENS_PER_PARAMETER: u64 = 4;

impl HeuristicTokenizer {
    /// Create a new heuristic tokenizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn text_tokens(text: &str) -> u64 {
        // byte/4 heuristic, rounded up; empty text is free
        (text.len() as u64).div_ceil(4)
    }
}

impl Tokenizer for HeuristicTokenizer {
    fn estimate_tokens_in_text(&self, text: &str) -> u64 {
        Self::text_tokens(text)
    }

    fn estimate_tokens_in_message(&self, message: &ChatMessage) -> u64 {
        let content = match message {
            ChatMessage::System(m) => Self::text_tokens(&m.content),
            ChatMessage::User(m) => m
                .contents
                .iter()
                .map(|c| match c {
                    Content::Text(t) => Self::text_tokens(&t.text),
                    Content::Image(_) => TOKENS_PER_IMAGE,
                })
                .sum(),
            ChatMessage::Assistant(m) => {
                let text = m.text.as_deref().map(Self::text_tokens).unwrap_or(0);
                text + self.estimate_tokens_in_tool_call_requests(&m.tool_calls)
            }
            ChatMessage::ToolResult(m) => {
                Self::text_tokens(&m.tool_name) + Self::text_tokens(&m.content)
            }
        };
        TOKENS_PER_MESSAGE + content
    }

    fn estimate_tokens_in_tool_specifications(&self, specifications: &[ToolSpecification]) -> u64 {
        specifications
            .iter()
            .map(|spec| {
                let header = Self::text_tokens(&spec.name)
                    + spec
                        .description
                        .as_deref()
                        .map(Self::text_tokens)
                        .unwrap_or(0);
                let parameters: u64 = spec
                    .parameters
                    .properties
                    .iter()
                    .map(|(name, schema)| {
                        TOKENS_PER_PARAMETER
                            + Self::text_tokens(name)
                            + schema
                                .description
                                .as_deref()
                                .map(Self::text_tokens)
                                .unwrap_or(0)
                            + schema
                                .enum_values
                                .iter()
                                .flatten()
                                .map(|v| Self::text_tokens(v))
                                .sum::<u64>()
                    })
                    .sum();
                TOKENS_PER_TOOL + header + parameters
            })
            .sum()
    }

    fn estimate_tokens_in_tool_call_requests(&self, requests: &[ToolCallRequest]) -> u64 {
        requests
            .iter()
            .map(|r| TOKENS_PER_TOOL + Self::text_tokens(&r.name) + Self::text_tokens(&r.arguments))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ParameterSchema;

    #[test]
    fn test_deterministic() {
        let tokenizer = HeuristicTokenizer::new();
        let text = "Hello, how are you doing?";
        assert_eq!(
            tokenizer.estimate_tokens_in_text(text),
            tokenizer.estimate_tokens_in_text(text),
        );
    }

    #[test]
    fn test_empty_text_is_free() {
        assert_eq!(HeuristicTokenizer::new().estimate_tokens_in_text(""), 0);
    }

    #[test]
    fn test_longer_text_costs_more() {
        let tokenizer = HeuristicTokenizer::new();
        let short = tokenizer.estimate_tokens_in_text("hi");
        let long = tokenizer.estimate_tokens_in_text("a considerably longer piece of text");
        assert!(long > short);
    }

    #[test]
    fn test_messages_sum_of_parts() {
        let tokenizer = HeuristicTokenizer::new();
        let messages = vec![
            ChatMessage::system("You are a helpful assistant."),
            ChatMessage::user("What is the capital of Germany?"),
        ];
        let total = tokenizer.estimate_tokens_in_messages(&messages);
        let by_hand: u64 = messages
            .iter()
            .map(|m| tokenizer.estimate_tokens_in_message(m))
            .sum();
        assert_eq!(total, by_hand);
        assert!(total > 0);
    }

    #[test]
    fn test_tool_specifications_counted() {
        let tokenizer = HeuristicTokenizer::new();
        let spec = ToolSpecification::new("calculator")
            .with_description("returns a sum of two numbers")
            .with_parameter("first", ParameterSchema::integer())
            .with_parameter("second", ParameterSchema::integer());
        let estimate = tokenizer.estimate_tokens_in_tool_specifications(std::slice::from_ref(&spec));
        assert!(estimate > TOKENS_PER_TOOL);
    }

    #[test]
    fn test_custom_tokenizer_override() {
        struct FixedTokenizer;

        impl Tokenizer for FixedTokenizer {
            fn estimate_tokens_in_text(&self, _text: &str) -> u64 {
                42
            }
            fn estimate_tokens_in_message(&self, _message: &ChatMessage) -> u64 {
                42
            }
            fn estimate_tokens_in_tool_specifications(
                &self,
                _specifications: &[ToolSpecification],
            ) -> u64 {
                42
            }
            fn estimate_tokens_in_tool_call_requests(
                &self,
                _requests: &[ToolCallRequest],
            ) -> u64 {
                42
            }
        }

        let tokenizer: Box<dyn Tokenizer> = Box::new(FixedTokenizer);
        assert_eq!(tokenizer.estimate_tokens_in_text("anything"), 42);
    }
}
