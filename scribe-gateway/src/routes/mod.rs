//! HTTP routes
//!
//! - `GET /` - health
//! - `POST /summarize`, `/qa`, `/extract_entities`, `/generate_note` - note tools
//! - `POST /introduction`, `/query` - session-scoped conversation endpoints

pub mod health;
pub mod notes;
pub mod session;

use std::any::Any;
use std::sync::Arc;

use axum::{
    http::HeaderValue,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any as CorsAny, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use scribe_agent::{CompletionService, SearchAugmenter};

use crate::error::ApiError;

/// State shared across handlers. Read-only after startup.
pub struct AppState {
    pub service: CompletionService,
    pub search: SearchAugmenter,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(service: CompletionService, search: SearchAugmenter) -> Self {
        Self { service, search }
    }
}

/// Create the gateway router
pub fn create_router(state: SharedState, cors_origins: Option<&[String]>) -> Router {
    Router::new()
        .route("/", get(health::health))
        .route("/summarize", post(notes::summarize))
        .route("/qa", post(notes::qa))
        .route("/extract_entities", post(notes::extract_entities))
        .route("/generate_note", post(notes::generate_note))
        .route("/introduction", post(session::introduction))
        .route("/query", post(session::query))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

/// Any origin when `origins` is `None`, otherwise exactly the listed ones.
pub fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(CorsAny)
        .allow_headers(CorsAny);

    match origins {
        None => layer.allow_origin(CorsAny),
        Some(origins) => {
            let values: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| match o.parse::<HeaderValue>() {
                    Ok(v) => Some(v),
                    Err(_) => {
                        warn!(origin = %o, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            layer.allow_origin(AllowOrigin::list(values))
        }
    }
}

fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    ApiError::Internal("Internal server error".to_string()).into_response()
}
