use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use keluhan_core::{ExtractionError, PipelineError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("text kosong")]
    EmptyText,

    #[error("q kosong")]
    EmptyQuery,

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::EmptyInput => Self::EmptyText,
            PipelineError::Extraction(e) => Self::Extraction(e),
        }
    }
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::EmptyText | Self::EmptyQuery => StatusCode::BAD_REQUEST,
            Self::Extraction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::EmptyText | Self::EmptyQuery => json!({ "error": self.to_string() }),
            Self::Extraction(e) => {
                error!("Extraction failed: {e}");
                json!({ "error": "internal_error", "detail": e.to_string() })
            }
        };
        (status, Json(body)).into_response()
    }
}
