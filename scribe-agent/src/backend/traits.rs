//! Core traits for LLM backends.
//!
//! This module defines the `LlmBackend` trait - the capability every
//! completion provider implements - and the message/option types it speaks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ProviderKind;

/// Error types for LLM operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Backend is misconfigured (e.g. missing endpoint)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transport-level failure
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered with a non-success status
    #[error("Request failed: HTTP {status}: {body}")]
    RequestFailed { status: u16, body: String },

    /// Rate limited by the backend
    #[error("Rate limited by upstream: {0}")]
    RateLimited(String),

    /// The API answered with something we could not read
    #[error("Parse error: {0}")]
    Parse(String),
}

impl LlmError {
    /// Whether the failure came from the remote side rather than local setup.
    pub fn is_upstream(&self) -> bool {
        !matches!(self, Self::Configuration(_))
    }
}

/// Core trait for LLM backends.
///
/// One configured instance is selected at startup and shared by every
/// request for the lifetime of the process.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Backend identifier used in logs.
    fn id(&self) -> &str;

    /// Which variant this is.
    fn kind(&self) -> ProviderKind;

    /// Model name reported by the health endpoint.
    fn model(&self) -> &str;

    /// Run one completion over the given conversation.
    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<CompletionResult, LlmError>;
}

/// A message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl Message {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }
}

/// Role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// Requested output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Plain text
    Text,
    /// A single JSON object
    JsonObject,
}

impl ResponseFormat {
    /// Wire value for the OpenAI `response_format.type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::JsonObject => "json_object",
        }
    }
}

/// Per-call sampling options. Unset fields use the provider defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    /// Temperature (0.0-2.0)
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Requested output format
    pub response_format: Option<ResponseFormat>,
}

impl CompletionOptions {
    /// Options with JSON-object output requested.
    pub fn json() -> Self {
        Self::default().with_json_output()
    }

    /// Set max tokens.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Set temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp.clamp(0.0, 2.0));
        self
    }

    /// Request JSON output.
    pub fn with_json_output(mut self) -> Self {
        self.response_format = Some(ResponseFormat::JsonObject);
        self
    }

    /// Whether JSON output was requested.
    pub fn wants_json(&self) -> bool {
        self.response_format == Some(ResponseFormat::JsonObject)
    }
}

/// Normalized result of one completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResult {
    /// Generated text
    pub text: String,
    /// Provider payload, when the backend has one
    pub raw: Option<serde_json::Value>,
}

impl CompletionResult {
    /// A result with text only.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            raw: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::system("be brief")).unwrap();
        assert_eq!(json, r#"{"role":"system","content":"be brief"}"#);
    }

    #[test]
    fn test_temperature_clamped() {
        let options = CompletionOptions::default().with_temperature(5.0);
        assert_eq!(options.temperature, Some(2.0));
    }

    #[test]
    fn test_json_options() {
        let options = CompletionOptions::json().with_max_tokens(1600);
        assert!(options.wants_json());
        assert_eq!(options.max_tokens, Some(1600));
        assert!(!CompletionOptions::default().wants_json());
    }

    #[test]
    fn test_upstream_classification() {
        assert!(LlmError::Network("reset".into()).is_upstream());
        assert!(!LlmError::Configuration("no endpoint".into()).is_upstream());
    }
}
