//! Scribe gateway - HTTP front end for the scribe agent
//!
//! Wires the configured completion service and search augmenter into an
//! axum router. The binary in `main.rs` adds logging and the listener.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tracing::{info, warn};

use scribe_agent::{CompletionService, SearchAugmenter, ServiceError};

use config::Args;
use routes::{create_router, AppState};

/// Build the full application from configuration.
///
/// Fails with a configuration error (unknown provider, missing key) before
/// any route exists.
pub fn build_app(args: &Args) -> Result<Router, ServiceError> {
    let provider = args.provider_config()?;
    let service = CompletionService::from_config(&provider)?;

    let search = SearchAugmenter::new(args.tavily_api_key.clone())
        .with_base_url(args.tavily_base_url.clone());
    if !search.is_configured() {
        warn!("TAVILY_API_KEY not set, /query will run without support links");
    }

    info!(
        provider = %service.provider(),
        model = %service.model(),
        "Completion service ready"
    );

    let state = Arc::new(AppState::new(service, search));
    let origins = args.cors_origin_list();
    Ok(create_router(state, origins.as_deref()))
}
