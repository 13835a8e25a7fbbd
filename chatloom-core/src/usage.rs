//! Token usage accounting.

use serde::{Deserialize, Serialize};

/// Token usage for one request/response exchange.
///
/// During streaming, usage is absent until the provider reports it on
/// completion. Whenever both input and output counts are present the
/// invariant `total == input + output` holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the request/prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<u64>,
    /// Tokens in the response/completion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_tokens: Option<u64>,
    /// Total tokens (input + output).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,
}

impl TokenUsage {
    /// Create an empty usage record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create usage with input and output counts; total is derived.
    #[must_use]
    pub fn with_tokens(input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            input_tokens: Some(input_tokens),
            output_tokens: Some(output_tokens),
            total_tokens: Some(input_tokens + output_tokens),
        }
    }

    /// Set input tokens, keeping the total consistent.
    #[must_use]
    pub fn input_tokens(mut self, tokens: u64) -> Self {
        self.input_tokens = Some(tokens);
        self.recalculate_total();
        self
    }

    /// Set output tokens, keeping the total consistent.
    #[must_use]
    pub fn output_tokens(mut self, tokens: u64) -> Self {
        self.output_tokens = Some(tokens);
        self.recalculate_total();
        self
    }

    /// Recalculate total from input and output.
    pub fn recalculate_total(&mut self) {
        self.total_tokens = match (self.input_tokens, self.output_tokens) {
            (Some(a), Some(b)) => Some(a + b),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        };
    }

    /// Merge another usage record into this one, summing counts.
    pub fn merge(&mut self, other: &TokenUsage) {
        self.input_tokens = sum_opt(self.input_tokens, other.input_tokens);
        self.output_tokens = sum_opt(self.output_tokens, other.output_tokens);
        self.recalculate_total();
    }

    /// Get the total, calculating from parts if unset.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total_tokens
            .unwrap_or_else(|| self.input_tokens.unwrap_or(0) + self.output_tokens.unwrap_or(0))
    }

    /// Check that the reported total matches the sum of the parts.
    ///
    /// A record with any count absent is considered consistent; the
    /// invariant only binds fully-populated records.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        match (self.input_tokens, self.output_tokens, self.total_tokens) {
            (Some(input), Some(output), Some(total)) => total == input + output,
            _ => true,
        }
    }

    /// Check if no counts are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.input_tokens.is_none() && self.output_tokens.is_none() && self.total_tokens.is_none()
    }
}

fn sum_opt(a: Option<u64>, b: Option<u64>) -> Option<u64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + b),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

impl std::ops::Add for TokenUsage {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self.merge(&rhs);
        self
    }
}

impl std::ops::AddAssign for TokenUsage {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_tokens_derives_total() {
        let usage = TokenUsage::with_tokens(5, 2);
        assert_eq!(usage.total_tokens, Some(7));
        assert!(usage.is_consistent());
    }

    #[test]
    fn test_merge() {
        let mut usage = TokenUsage::with_tokens(100, 50);
        usage.merge(&TokenUsage::with_tokens(200, 100));
        assert_eq!(usage.input_tokens, Some(300));
        assert_eq!(usage.output_tokens, Some(150));
        assert_eq!(usage.total(), 450);
    }

    #[test]
    fn test_partial_usage_recalculates() {
        let usage = TokenUsage::new().input_tokens(14);
        assert_eq!(usage.total_tokens, Some(14));
        assert!(usage.is_consistent());
    }

    #[test]
    fn test_inconsistent_detected() {
        let usage = TokenUsage {
            input_tokens: Some(5),
            output_tokens: Some(2),
            total_tokens: Some(99),
        };
        assert!(!usage.is_consistent());
    }

    #[test]
    fn test_add_op() {
        let usage = TokenUsage::with_tokens(1, 2) + TokenUsage::with_tokens(3, 4);
        assert_eq!(usage.total(), 10);
    }

    #[test]
    fn test_serde_roundtrip() {
        let usage = TokenUsage::with_tokens(5, 2);
        let json = serde_json::to_string(&usage).unwrap();
        let parsed: TokenUsage = serde_json::from_str(&json).unwrap();
        assert_eq!(usage, parsed);
    }
}
