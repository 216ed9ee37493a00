//! Scribe Agent - LLM plumbing for clinical note taking
//!
//! Provides the reusable core behind the scribe HTTP gateway:
//! - Prompt templates for each clinical use case
//! - Trait-based LLM backends (OpenAI-compatible, Hugging Face placeholder)
//! - A completion service that turns a prompt pair into one remote call
//! - Best-effort web search augmentation
//! - Tolerant decoding of model output that is supposed to be JSON
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           CompletionService             │
//! │  (system + user prompt -> completion)   │
//! └────────────────┬────────────────────────┘
//!                  │
//!      ┌───────────┴───────────┐
//!      ▼                       ▼
//! ┌─────────────┐       ┌─────────────┐
//! │ LlmBackend  │       │ Prompt      │
//! │ (OpenAI/    │       │ Factory     │
//! │  HF stub)   │       │             │
//! └─────────────┘       └─────────────┘
//! ```

pub mod backend;
pub mod config;
pub mod prompt;
pub mod response;
pub mod search;
pub mod service;

// Re-export main types for convenience
pub use backend::traits::{
    CompletionOptions, CompletionResult, LlmBackend, LlmError, Message, MessageRole,
    ResponseFormat,
};
pub use config::{ConfigError, ProviderConfig, ProviderKind};
pub use prompt::{PromptFactory, PromptPair, SummaryLength, SummaryStyle};
pub use response::{sufficient_context, ModelOutput};
pub use search::SearchAugmenter;
pub use service::{CompletionService, ServiceError};
