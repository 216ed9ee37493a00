//! HTTP error type for the gateway.
//!
//! Every failure leaves as `{"detail": "..."}` with a status that tells the
//! caller whose fault it was.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

use scribe_agent::ServiceError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or incomplete request body
    #[error("{0}")]
    Validation(String),

    /// The completion provider failed
    #[error("{0}")]
    Upstream(String),

    /// Provider settings unusable at call time
    #[error("{0}")]
    Configuration(String),

    /// Anything else
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Configuration(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        if e.is_upstream() {
            Self::Upstream(e.to_string())
        } else {
            Self::Configuration(e.to_string())
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        (status, Json(ErrorBody { detail: self.to_string() })).into_response()
    }
}
