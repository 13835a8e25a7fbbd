//! Content parts for user messages.
//!
//! User messages are ordered sequences of content parts. Today that means
//! text and image references; providers that support neither simply reject
//! the request upstream.

use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// One content part of a user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "content_kind", rename_all = "kebab-case")]
pub enum Content {
    /// Plain text content.
    Text(TextContent),
    /// An image, referenced by URL or carried inline as base64.
    Image(ImageContent),
}

impl Content {
    /// Create a text content part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextContent::new(text))
    }

    /// Create an image content part from a URL.
    #[must_use]
    pub fn image_url(url: impl Into<String>) -> Self {
        Self::Image(ImageContent::from_url(url))
    }

    /// Check if this is a text part.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Check if this is an image part.
    #[must_use]
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image(_))
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Self::text(s)
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Self::text(s)
    }
}

/// Plain text content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    /// The text.
    pub text: String,
}

impl TextContent {
    /// Create new text content.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Image content, either a remote URL or inline base64 data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "kebab-case")]
pub enum ImageContent {
    /// Image referenced by URL.
    Url {
        /// The image URL.
        url: String,
    },
    /// Image carried inline as base64 data.
    Base64 {
        /// Base64-encoded image bytes.
        data: String,
        /// Media type, e.g. `image/png`.
        media_type: String,
    },
}

impl ImageContent {
    /// Create image content from a URL.
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self::Url { url: url.into() }
    }

    /// Create image content from already-encoded base64 data.
    #[must_use]
    pub fn from_base64(data: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self::Base64 {
            data: data.into(),
            media_type: media_type.into(),
        }
    }

    /// Create image content from raw bytes, encoding them as base64.
    #[must_use]
    pub fn from_bytes(bytes: &[u8], media_type: impl Into<String>) -> Self {
        Self::Base64 {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            media_type: media_type.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_from_str() {
        let content: Content = "hello".into();
        assert!(content.is_text());
    }

    #[test]
    fn test_image_from_bytes_encodes_base64() {
        let image = ImageContent::from_bytes(b"abc", "image/png");
        match image {
            ImageContent::Base64 { data, media_type } => {
                assert_eq!(data, "YWJj");
                assert_eq!(media_type, "image/png");
            }
            ImageContent::Url { .. } => panic!("expected base64 image"),
        }
    }

    #[test]
    fn test_serde_roundtrip() {
        let content = Content::image_url("https://example.com/cat.png");
        let json = serde_json::to_string(&content).unwrap();
        let parsed: Content = serde_json::from_str(&json).unwrap();
        assert_eq!(content, parsed);
    }
}
