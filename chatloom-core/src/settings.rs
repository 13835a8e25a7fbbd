//! Generation settings.

use serde::{Deserialize, Serialize};

/// Settings controlling model generation.
///
/// All fields are optional; unset fields fall back to provider defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatSettings {
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Top-p (nucleus) sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,

    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u64>,

    /// Response format hint, e.g. `json_object`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<String>,

    /// Stop sequences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,

    /// Random seed for reproducibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl ChatSettings {
    /// Create empty settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set temperature.
    #[must_use]
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set top-p.
    #[must_use]
    pub fn top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Set max tokens.
    #[must_use]
    pub fn max_tokens(mut self, tokens: u64) -> Self {
        self.max_tokens = Some(tokens);
        self
    }

    /// Set the response format.
    #[must_use]
    pub fn response_format(mut self, format: impl Into<String>) -> Self {
        self.response_format = Some(format.into());
        self
    }

    /// Set stop sequences.
    #[must_use]
    pub fn stop(mut self, sequences: Vec<String>) -> Self {
        self.stop = Some(sequences);
        self
    }

    /// Set the seed.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Merge with another settings value, preferring values from `other`.
    #[must_use]
    pub fn merge(&self, other: &ChatSettings) -> ChatSettings {
        ChatSettings {
            temperature: other.temperature.or(self.temperature),
            top_p: other.top_p.or(self.top_p),
            max_tokens: other.max_tokens.or(self.max_tokens),
            response_format: other
                .response_format
                .clone()
                .or_else(|| self.response_format.clone()),
            stop: other.stop.clone().or_else(|| self.stop.clone()),
            seed: other.seed.or(self.seed),
        }
    }

    /// Check if all settings are unset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none()
            && self.top_p.is_none()
            && self.max_tokens.is_none()
            && self.response_format.is_none()
            && self.stop.is_none()
            && self.seed.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let settings = ChatSettings::new()
            .temperature(0.0)
            .top_p(1.0)
            .max_tokens(7);
        assert_eq!(settings.temperature, Some(0.0));
        assert_eq!(settings.top_p, Some(1.0));
        assert_eq!(settings.max_tokens, Some(7));
    }

    #[test]
    fn test_merge_prefers_other() {
        let base = ChatSettings::new().temperature(0.5).max_tokens(100);
        let other = ChatSettings::new().temperature(0.8);
        let merged = base.merge(&other);
        assert_eq!(merged.temperature, Some(0.8));
        assert_eq!(merged.max_tokens, Some(100));
    }

    #[test]
    fn test_empty() {
        assert!(ChatSettings::new().is_empty());
        assert!(!ChatSettings::new().seed(42).is_empty());
    }
}
