//! Provider configuration.
//!
//! A [`ProviderConfig`] is built once at startup and never mutated. It picks
//! the active backend variant and carries its credentials and defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default OpenAI-compatible endpoint (Groq).
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default model served by the OpenAI-compatible endpoint.
pub const DEFAULT_MODEL: &str = "openai/gpt-oss-20b";

/// Configuration errors. Fatal at startup, or at first use for the stub backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The `provider` selector names no known backend
    #[error("Unsupported provider: {0:?} (expected one of: groq, openai, openai-compatible, huggingface)")]
    UnsupportedProvider(String),

    /// A required credential is absent
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    /// Any other invalid setting
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// The closed set of completion backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    /// Any `/chat/completions` API (Groq, OpenAI, vLLM, ...)
    OpenAiCompatible,
    /// Placeholder for a future Hugging Face inference backend
    HuggingFaceStub,
}

impl ProviderKind {
    /// Short name reported by the health endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAiCompatible => "openai-compatible",
            Self::HuggingFaceStub => "huggingface",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "groq" | "openai" | "openai-compatible" | "openai_compatible" => {
                Ok(Self::OpenAiCompatible)
            }
            "huggingface" | "hugging-face" | "hf" => Ok(Self::HuggingFaceStub),
            _ => Err(ConfigError::UnsupportedProvider(s.to_string())),
        }
    }
}

/// Immutable provider settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    /// Active backend variant
    pub kind: ProviderKind,
    /// Bearer credential for the OpenAI-compatible API
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible API (without `/chat/completions`)
    pub base_url: String,
    /// Model name sent with every request
    pub model: String,
    /// Inference endpoint for the Hugging Face backend
    pub endpoint_url: Option<String>,
    /// Sampling temperature used when a call does not set one
    pub temperature: f32,
    /// Token limit used when a call does not set one
    pub max_tokens: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::OpenAiCompatible,
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            endpoint_url: None,
            temperature: 0.2,
            max_tokens: 1024,
        }
    }
}

impl ProviderConfig {
    /// Create an OpenAI-compatible config with the given key.
    pub fn openai_compatible(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// Create a Hugging Face stub config.
    pub fn huggingface(endpoint_url: Option<String>) -> Self {
        Self {
            kind: ProviderKind::HuggingFaceStub,
            endpoint_url,
            ..Default::default()
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Check the settings the selected backend needs at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model name is empty".to_string()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Invalid(format!(
                "temperature {} outside 0.0-2.0",
                self.temperature
            )));
        }

        match self.kind {
            ProviderKind::OpenAiCompatible => {
                if self.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
                    return Err(ConfigError::MissingCredential("GROQ_API_KEY"));
                }
                url::Url::parse(&self.base_url).map_err(|e| {
                    ConfigError::Invalid(format!("base URL {:?}: {}", self.base_url, e))
                })?;
            }
            // Endpoint is checked on first use
            ProviderKind::HuggingFaceStub => {}
        }

        Ok(())
    }
}
