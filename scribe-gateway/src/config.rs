//! Configuration for the scribe gateway
//!
//! CLI arguments and environment variable handling using clap. Every
//! setting can come from the environment (or a `.env` file), read once at
//! startup.

use clap::Parser;
use std::net::{IpAddr, SocketAddr};

use scribe_agent::config::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use scribe_agent::search::DEFAULT_SEARCH_URL;
use scribe_agent::{ConfigError, ProviderConfig, ProviderKind};

/// Scribe gateway - LLM endpoints for clinical note taking
#[derive(Parser, Debug, Clone)]
#[command(name = "scribe-gateway")]
#[command(about = "HTTP gateway for clinical summarization, QA and SOAP note generation")]
pub struct Args {
    /// Completion provider: groq, openai, openai-compatible, huggingface
    #[arg(long, env = "LLM_PROVIDER", default_value = "groq")]
    pub provider: String,

    /// API key for the OpenAI-compatible provider
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "LLM_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Model name
    #[arg(long, env = "GROQ_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Inference endpoint for the Hugging Face provider
    #[arg(long, env = "HF_ENDPOINT_URL")]
    pub hf_endpoint_url: Option<String>,

    /// Default sampling temperature
    #[arg(long, env = "LLM_TEMPERATURE", default_value = "0.2")]
    pub temperature: f32,

    /// Default completion token limit
    #[arg(long, env = "LLM_MAX_TOKENS", default_value = "1024")]
    pub max_tokens: u32,

    /// Tavily search API key (search augmentation is skipped without it)
    #[arg(long, env = "TAVILY_API_KEY", hide_env_values = true)]
    pub tavily_api_key: Option<String>,

    /// Tavily API base URL
    #[arg(long, env = "TAVILY_BASE_URL", default_value = DEFAULT_SEARCH_URL)]
    pub tavily_base_url: String,

    /// Comma-separated allowed CORS origins, or `*`
    #[arg(long, env = "CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON", default_value = "false")]
    pub log_json: bool,

    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "5000")]
    pub port: u16,
}

impl Args {
    /// Socket address to bind.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Build and validate the provider settings.
    ///
    /// An unknown provider or a missing credential fails here, before the
    /// listener is bound.
    pub fn provider_config(&self) -> Result<ProviderConfig, ConfigError> {
        let kind: ProviderKind = self.provider.parse()?;
        let config = ProviderConfig {
            kind,
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            endpoint_url: self.hf_endpoint_url.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };
        config.validate()?;
        Ok(config)
    }

    /// Allowed origins; `None` means any origin.
    pub fn cors_origin_list(&self) -> Option<Vec<String>> {
        let origins: Vec<String> = self
            .cors_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect();

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            None
        } else {
            Some(origins)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        let mut argv = vec!["scribe-gateway"];
        argv.extend_from_slice(args);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["--api-key", "gsk_test", "--host", "127.0.0.1", "--port", "8081"]);
        assert_eq!(args.listen_addr().to_string(), "127.0.0.1:8081");

        let config = args.provider_config().unwrap();
        assert_eq!(config.kind, ProviderKind::OpenAiCompatible);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_unknown_provider_fails() {
        let args = parse(&["--provider", "cohere", "--api-key", "k"]);
        assert_eq!(
            args.provider_config(),
            Err(ConfigError::UnsupportedProvider("cohere".to_string()))
        );
    }

    #[test]
    fn test_missing_key_fails() {
        let args = parse(&["--provider", "openai", "--api-key", ""]);
        assert!(matches!(
            args.provider_config(),
            Err(ConfigError::MissingCredential(_))
        ));
    }

    #[test]
    fn test_huggingface_without_key() {
        let args = parse(&["--provider", "hf"]);
        let config = args.provider_config().unwrap();
        assert_eq!(config.kind, ProviderKind::HuggingFaceStub);
    }

    #[test]
    fn test_cors_origins() {
        assert_eq!(parse(&[]).cors_origin_list(), None);

        let args = parse(&["--cors-origins", "https://a.example, https://b.example,"]);
        assert_eq!(
            args.cors_origin_list(),
            Some(vec![
                "https://a.example".to_string(),
                "https://b.example".to_string()
            ])
        );
    }
}
