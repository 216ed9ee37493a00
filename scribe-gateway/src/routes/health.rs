//! Health check endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use super::SharedState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub provider: String,
    pub model: String,
}

/// GET /
pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        provider: state.service.provider().to_string(),
        model: state.service.model().to_string(),
    })
}
