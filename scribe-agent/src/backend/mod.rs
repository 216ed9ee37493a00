//! LLM Backend abstraction layer.
//!
//! Provides a trait-based interface over the completion providers:
//! - OpenAI-compatible (Groq, OpenAI, vLLM, etc.)
//! - Hugging Face placeholder (echo only, no inference)
//! - Mock backend for testing
//!
//! The active backend is chosen once, by [`from_config`].

pub mod huggingface;
pub mod mock;
pub mod openai;
pub mod traits;

use std::sync::Arc;

use tracing::info;

use crate::config::{ConfigError, ProviderConfig, ProviderKind};

pub use huggingface::HuggingFaceStub;
pub use mock::MockBackend;
pub use openai::OpenAiBackend;
pub use traits::{
    CompletionOptions, CompletionResult, LlmBackend, LlmError, Message, MessageRole,
    ResponseFormat,
};

/// Build the backend selected by `config.kind`.
pub fn from_config(config: &ProviderConfig) -> Result<Arc<dyn LlmBackend>, ConfigError> {
    config.validate()?;

    let backend: Arc<dyn LlmBackend> = match config.kind {
        ProviderKind::OpenAiCompatible => Arc::new(OpenAiBackend::from_config(config)?),
        ProviderKind::HuggingFaceStub => Arc::new(HuggingFaceStub::from_config(config)),
    };

    info!(provider = %config.kind, model = %config.model, "LLM backend selected");
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selects_openai() {
        let backend = from_config(&ProviderConfig::openai_compatible("gsk_test")).unwrap();
        assert_eq!(backend.kind(), ProviderKind::OpenAiCompatible);
        assert_eq!(backend.model(), crate::config::DEFAULT_MODEL);
    }

    #[test]
    fn test_selects_stub() {
        let backend = from_config(&ProviderConfig::huggingface(None)).unwrap();
        assert_eq!(backend.kind(), ProviderKind::HuggingFaceStub);
    }

    #[test]
    fn test_missing_key_fails_fast() {
        assert!(matches!(
            from_config(&ProviderConfig::default()),
            Err(ConfigError::MissingCredential(_))
        ));
    }
}
