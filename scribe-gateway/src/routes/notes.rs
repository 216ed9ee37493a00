//! Note-taking endpoints: summarize, QA, entity extraction, SOAP notes.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use scribe_agent::{
    sufficient_context, CompletionOptions, ModelOutput, PromptFactory, SummaryLength, SummaryStyle,
};

use super::SharedState;
use crate::error::ApiError;

/// Token limit for SOAP note generation.
pub const NOTE_MAX_TOKENS: u32 = 1600;

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
    #[serde(default)]
    pub style: SummaryStyle,
    #[serde(default)]
    pub length: SummaryLength,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

/// POST /summarize
pub async fn summarize(
    State(state): State<SharedState>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let Json(req) = payload?;
    debug!(style = %req.style, length = %req.length, chars = req.text.len(), "Summarizing");

    let prompt = PromptFactory::summarize(&req.text, req.style, req.length);
    let out = state
        .service
        .complete_prompt(prompt, &CompletionOptions::default())
        .await?;

    Ok(Json(SummarizeResponse {
        summary: out.text.trim().to_string(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct QaRequest {
    pub question: String,
    pub context: String,
}

#[derive(Debug, Serialize)]
pub struct QaResponse {
    pub answer: String,
    pub sufficient_context: bool,
}

/// POST /qa
pub async fn qa(
    State(state): State<SharedState>,
    payload: Result<Json<QaRequest>, JsonRejection>,
) -> Result<Json<QaResponse>, ApiError> {
    let Json(req) = payload?;

    let prompt = PromptFactory::qa(&req.question, &req.context);
    let out = state
        .service
        .complete_prompt(prompt, &CompletionOptions::default())
        .await?;

    let answer = out.text.trim().to_string();
    let sufficient_context = sufficient_context(&answer);
    debug!(sufficient_context, "Answered question");

    Ok(Json(QaResponse {
        answer,
        sufficient_context,
    }))
}

#[derive(Debug, Deserialize)]
pub struct EntitiesRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct EntitiesResponse {
    pub entities: Value,
}

/// POST /extract_entities
pub async fn extract_entities(
    State(state): State<SharedState>,
    payload: Result<Json<EntitiesRequest>, JsonRejection>,
) -> Result<Json<EntitiesResponse>, ApiError> {
    let Json(req) = payload?;

    let out = state
        .service
        .complete_prompt(PromptFactory::entities(&req.text), &CompletionOptions::json())
        .await?;

    let output = ModelOutput::parse(&out.text);
    if !output.is_decoded() {
        debug!("Entity output was not JSON, returning raw text");
    }

    Ok(Json(EntitiesResponse {
        entities: output.into_value_or_raw(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub transcript: String,
    #[serde(default)]
    pub chart_context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub note: Value,
}

/// POST /generate_note
pub async fn generate_note(
    State(state): State<SharedState>,
    payload: Result<Json<NoteRequest>, JsonRejection>,
) -> Result<Json<NoteResponse>, ApiError> {
    let Json(req) = payload?;

    let prompt = PromptFactory::note(&req.transcript, req.chart_context.as_deref());
    let options = CompletionOptions::json().with_max_tokens(NOTE_MAX_TOKENS);
    let out = state.service.complete_prompt(prompt, &options).await?;

    let output = ModelOutput::parse(&out.text);
    if !output.is_decoded() {
        debug!("SOAP note output was not JSON, returning raw text");
    }

    Ok(Json(NoteResponse {
        note: output.into_value_or_raw(),
    }))
}
