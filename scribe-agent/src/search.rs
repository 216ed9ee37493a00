//! Web search augmentation via the Tavily search API.
//!
//! Search is best-effort: every failure is logged and turned into an empty
//! link list so the enclosing request always proceeds.

use reqwest::{header, Client};
use serde::Serialize;
use tracing::{debug, warn};

/// Default Tavily API base URL.
pub const DEFAULT_SEARCH_URL: &str = "https://api.tavily.com";

/// Default number of results requested.
pub const DEFAULT_MAX_RESULTS: usize = 3;

/// Why a search produced no links. Never leaves this module.
#[derive(Debug, thiserror::Error)]
enum SearchError {
    #[error("no search API key configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    max_results: usize,
}

/// Fetches supporting links for a free-text query.
#[derive(Clone)]
pub struct SearchAugmenter {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    max_results: usize,
}

impl SearchAugmenter {
    /// Create an augmenter. With no key, every lookup returns no links.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: DEFAULT_SEARCH_URL.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Point at a different search host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Change the result cap.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Ordered result URLs for `query`, at most `max_results`. Empty on any failure.
    pub async fn support_links(&self, query: &str) -> Vec<String> {
        match self.search(query).await {
            Ok(links) => {
                debug!(count = links.len(), "Search returned links");
                links
            }
            Err(e) => {
                warn!(error = %e, "Search augmentation failed, continuing without links");
                Vec::new()
            }
        }
    }

    async fn search(&self, query: &str) -> Result<Vec<String>, SearchError> {
        let api_key = self.api_key.as_deref().ok_or(SearchError::NotConfigured)?;

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .header(header::AUTHORIZATION, format!("Bearer {}", api_key))
            .json(&SearchRequest {
                query,
                max_results: self.max_results,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status { status, body });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SearchError::Malformed(e.to_string()))?;

        extract_links(&body, self.max_results)
    }
}

/// Pull `results[].url` values that are valid http(s) URLs.
fn extract_links(body: &serde_json::Value, limit: usize) -> Result<Vec<String>, SearchError> {
    let results = body
        .get("results")
        .and_then(|r| r.as_array())
        .ok_or_else(|| SearchError::Malformed("missing results array".to_string()))?;

    Ok(results
        .iter()
        .filter_map(|r| r.get("url").and_then(|u| u.as_str()))
        .filter(|u| {
            url::Url::parse(u)
                .map(|parsed| matches!(parsed.scheme(), "http" | "https"))
                .unwrap_or(false)
        })
        .take(limit)
        .map(String::from)
        .collect())
}
