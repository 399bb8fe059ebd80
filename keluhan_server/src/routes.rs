//! Request handlers.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use keluhan_core::{ChatOutcome, FAQ_MISS_HINT, faq_search};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::SharedState;
use crate::error::{ApiError, Result};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub text: String,
}

impl ChatRequest {
    #[must_use]
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_else(|e| {
            if !body.is_empty() {
                warn!("Unreadable chat body: {e}");
            }
            Self::default()
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FaqQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn healthz(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: state.pipeline.model().to_string(),
    })
}

/// `POST /chat` and its `/extract` alias.
///
/// The body is parsed as JSON whatever its `Content-Type`; an unreadable
/// body is treated like a missing `text` field.
pub async fn chat(State(state): State<SharedState>, body: Bytes) -> Result<Json<ChatOutcome>> {
    let request = ChatRequest::from_body(&body);

    let text = request.text.trim();
    if text.is_empty() {
        return Err(ApiError::EmptyText);
    }

    let request_id = Uuid::now_v7();
    let span = info_span!("chat", %request_id);
    async move {
        info!("Processing complaint ({} chars)", text.chars().count());
        let outcome = state.pipeline.process(text).await?;
        Ok::<_, ApiError>(Json(outcome))
    }
    .instrument(span)
    .await
}

pub async fn faq(Query(query): Query<FaqQuery>) -> Result<Json<Value>> {
    let q = query.q.trim();
    if q.is_empty() {
        return Err(ApiError::EmptyQuery);
    }

    let body = faq_search(q).map_or_else(
        || {
            json!({
                "answer": null,
                "matched_keywords": [],
                "hint": FAQ_MISS_HINT,
            })
        },
        |hit| json!(hit),
    );
    Ok(Json(body))
}
