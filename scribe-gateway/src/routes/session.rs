//! Session-scoped endpoints: user introduction parsing and search-augmented queries.
//!
//! `session_id` is required and logged; nothing is stored per session.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use scribe_agent::prompt::user_profile_schema;
use scribe_agent::{CompletionOptions, ModelOutput, PromptFactory};

use super::SharedState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub session_id: String,
    pub user_input: String,
}

#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub data: Value,
}

/// POST /introduction
pub async fn introduction(
    State(state): State<SharedState>,
    payload: Result<Json<SessionRequest>, JsonRejection>,
) -> Result<Json<DataResponse>, ApiError> {
    let Json(req) = payload?;
    info!(session_id = %req.session_id, "Parsing user introduction");

    let prompt = PromptFactory::introduction(&req.user_input, &user_profile_schema());
    let out = state
        .service
        .complete_prompt(prompt, &CompletionOptions::json())
        .await?;

    Ok(Json(DataResponse {
        data: ModelOutput::parse(&out.text).into_value_or_raw(),
    }))
}

/// POST /query
pub async fn query(
    State(state): State<SharedState>,
    payload: Result<Json<SessionRequest>, JsonRejection>,
) -> Result<Json<DataResponse>, ApiError> {
    let Json(req) = payload?;

    let links = state.search.support_links(&req.user_input).await;
    info!(session_id = %req.session_id, links = links.len(), "Answering query");

    let prompt = PromptFactory::query(&req.user_input, &links);
    let out = state
        .service
        .complete_prompt(prompt, &CompletionOptions::json())
        .await?;

    // Links always come from search, never from the model
    let data = match ModelOutput::parse(&out.text) {
        ModelOutput::Decoded(mut value) => {
            if let Some(object) = value.as_object_mut() {
                object.insert("support_links".to_string(), json!(links));
            }
            value
        }
        ModelOutput::Raw(text) => json!({ "response": text, "support_links": links }),
    };

    Ok(Json(DataResponse { data }))
}
