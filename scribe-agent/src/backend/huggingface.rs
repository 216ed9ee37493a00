//! Hugging Face placeholder backend.
//!
//! Performs no inference. It flattens the conversation into one text block
//! and echoes a truncated, tagged copy so the rest of the pipeline can be
//! exercised without a model.

use async_trait::async_trait;
use tracing::debug;

use super::traits::*;
use crate::config::{ProviderConfig, ProviderKind};

/// Tag prefixed to every echoed reply.
pub const STUB_TAG: &str = "[huggingface-stub]";

/// Maximum characters echoed back.
pub const ECHO_LIMIT: usize = 512;

/// Echoing stand-in for a Hugging Face inference endpoint.
pub struct HuggingFaceStub {
    endpoint_url: Option<String>,
    model: String,
}

impl HuggingFaceStub {
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self {
            endpoint_url: config
                .endpoint_url
                .clone()
                .filter(|u| !u.trim().is_empty()),
            model: config.model.clone(),
        }
    }

    /// Flatten messages as `role: content` lines.
    fn flatten(messages: &[Message]) -> String {
        messages
            .iter()
            .map(|m| format!("{}: {}", m.role.as_str(), m.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl LlmBackend for HuggingFaceStub {
    fn id(&self) -> &str {
        "huggingface-stub"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::HuggingFaceStub
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        messages: &[Message],
        _options: &CompletionOptions,
    ) -> Result<CompletionResult, LlmError> {
        let endpoint = self.endpoint_url.as_deref().ok_or_else(|| {
            LlmError::Configuration("HF_ENDPOINT_URL is not configured".to_string())
        })?;

        let excerpt: String = Self::flatten(messages).chars().take(ECHO_LIMIT).collect();
        debug!(endpoint, chars = excerpt.chars().count(), "Echoing from stub backend");

        Ok(CompletionResult::text(format!("{} {}", STUB_TAG, excerpt)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echoes_tagged_conversation() {
        let stub = HuggingFaceStub::from_config(&ProviderConfig::huggingface(Some(
            "http://localhost:8080".to_string(),
        )));

        let result = stub
            .complete(
                &[Message::system("Be terse."), Message::user("Hello")],
                &CompletionOptions::default(),
            )
            .await
            .unwrap();

        assert_eq!(result.text, "[huggingface-stub] system: Be terse.\nuser: Hello");
        assert!(result.raw.is_none());
    }

    #[tokio::test]
    async fn test_truncates_on_char_boundary() {
        let stub = HuggingFaceStub::from_config(&ProviderConfig::huggingface(Some(
            "http://localhost:8080".to_string(),
        )));
        let long = "é".repeat(2 * ECHO_LIMIT);

        let result = stub
            .complete(&[Message::user(long)], &CompletionOptions::default())
            .await
            .unwrap();

        let echoed = result.text.strip_prefix("[huggingface-stub] ").unwrap();
        assert_eq!(echoed.chars().count(), ECHO_LIMIT);
        assert!(echoed.starts_with("user: é"));
    }

    #[tokio::test]
    async fn test_missing_endpoint_is_configuration_error() {
        let stub = HuggingFaceStub::from_config(&ProviderConfig::huggingface(None));

        let err = stub
            .complete(&[Message::user("Hi")], &CompletionOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::Configuration(_)));
        assert!(!err.is_upstream());
    }
}
