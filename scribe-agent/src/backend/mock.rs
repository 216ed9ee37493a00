//! Mock LLM backend for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use super::traits::*;
use crate::config::ProviderKind;

/// Mock backend for testing.
///
/// Returns a fixed reply (or a fixed failure) and records what it was sent.
pub struct MockBackend {
    model_id: String,
    response_content: String,
    failure: Option<String>,
    call_count: AtomicU32,
    last_call: Mutex<Option<(Vec<Message>, CompletionOptions)>>,
}

impl MockBackend {
    /// Create a new mock backend.
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            response_content: "Mock response".to_string(),
            failure: None,
            call_count: AtomicU32::new(0),
            last_call: Mutex::new(None),
        }
    }

    /// Set the response content.
    pub fn with_response(mut self, content: impl Into<String>) -> Self {
        self.response_content = content.into();
        self
    }

    /// Make every call fail with a network error.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Get the number of times complete was called.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Messages and options of the most recent call.
    pub fn last_call(&self) -> Option<(Vec<Message>, CompletionOptions)> {
        self.last_call.lock().ok().and_then(|guard| guard.clone())
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new("mock-model")
    }
}

#[async_trait]
impl LlmBackend for MockBackend {
    fn id(&self) -> &str {
        &self.model_id
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAiCompatible
    }

    fn model(&self) -> &str {
        &self.model_id
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<CompletionResult, LlmError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_call.lock() {
            *guard = Some((messages.to_vec(), options.clone()));
        }

        if let Some(message) = &self.failure {
            return Err(LlmError::Network(message.clone()));
        }

        Ok(CompletionResult::text(self.response_content.clone()))
    }
}
