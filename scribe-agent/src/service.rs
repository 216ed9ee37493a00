//! CompletionService - the single entry point handlers use to reach a model.
//!
//! Wraps one configured backend. Each call is one best-effort round trip:
//! no retries, no caching, no timeout beyond the HTTP client's own.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::backend::{self, CompletionOptions, CompletionResult, LlmBackend, LlmError, Message};
use crate::config::{ConfigError, ProviderConfig, ProviderKind};
use crate::prompt::PromptPair;

/// Error types for the service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Provider settings are unusable
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Backend error
    #[error("Backend error: {0}")]
    Backend(#[from] LlmError),
}

impl ServiceError {
    /// Whether the remote provider failed (as opposed to local setup).
    pub fn is_upstream(&self) -> bool {
        match self {
            Self::Configuration(_) => false,
            Self::Backend(e) => e.is_upstream(),
        }
    }
}

/// Facade over the active backend.
#[derive(Clone)]
pub struct CompletionService {
    backend: Arc<dyn LlmBackend>,
}

impl CompletionService {
    /// Create a service over an already built backend.
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self { backend }
    }

    /// Select and build the backend named by `config`.
    ///
    /// Fails with [`ServiceError::Configuration`] for an unusable config.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ServiceError> {
        Ok(Self::new(backend::from_config(config)?))
    }

    pub fn provider(&self) -> ProviderKind {
        self.backend.kind()
    }

    pub fn model(&self) -> &str {
        self.backend.model()
    }

    /// Send `[system, user]` to the backend.
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> Result<CompletionResult, ServiceError> {
        let messages = [Message::system(system_prompt), Message::user(user_prompt)];
        self.send(&messages, options).await
    }

    /// Send a prompt pair to the backend.
    pub async fn complete_prompt(
        &self,
        prompt: PromptPair,
        options: &CompletionOptions,
    ) -> Result<CompletionResult, ServiceError> {
        self.send(&prompt.into_messages(), options).await
    }

    async fn send(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<CompletionResult, ServiceError> {
        let start = Instant::now();
        let prompt_chars: usize = messages.iter().map(|m| m.content.len()).sum();

        match self.backend.complete(messages, options).await {
            Ok(result) => {
                debug!(
                    backend = %self.backend.id(),
                    prompt_chars,
                    completion_chars = result.text.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Completion finished"
                );
                Ok(result)
            }
            Err(e) => {
                warn!(
                    backend = %self.backend.id(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    error = %e,
                    "Completion failed"
                );
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MessageRole, MockBackend};

    #[tokio::test]
    async fn test_complete_sends_system_then_user() {
        let mock = Arc::new(MockBackend::default().with_response("Mild fever noted."));
        let service = CompletionService::new(mock.clone());

        let result = service
            .complete("sys", "usr", &CompletionOptions::default())
            .await
            .unwrap();

        assert_eq!(result.text, "Mild fever noted.");
        let (messages, _) = mock.last_call().unwrap();
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[0].content, "sys");
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[1].content, "usr");
    }

    #[tokio::test]
    async fn test_backend_failure_is_upstream() {
        let service =
            CompletionService::new(Arc::new(MockBackend::default().with_failure("timeout")));

        let err = service
            .complete_prompt(PromptPair::new("s", "u"), &CompletionOptions::json())
            .await
            .unwrap_err();

        assert!(err.is_upstream());
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn test_from_config_missing_key_fails() {
        let result = CompletionService::from_config(&ProviderConfig::default());
        assert!(matches!(result, Err(ServiceError::Configuration(_))));
    }

    #[test]
    fn test_from_config_reports_model() {
        let config = ProviderConfig::openai_compatible("gsk_test").with_model("llama-3.1-8b-instant");
        let service = CompletionService::from_config(&config).unwrap();
        assert_eq!(service.model(), "llama-3.1-8b-instant");
        assert_eq!(service.provider(), ProviderKind::OpenAiCompatible);
    }
}
