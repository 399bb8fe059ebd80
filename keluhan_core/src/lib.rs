#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod confidence;
pub mod extraction;
pub mod faq;
pub mod pipeline;
pub mod prompts;
pub mod reconcile;
pub mod record;
pub mod rules;
pub mod validate;

pub use confidence::{round2, score};
pub use extraction::{ExtractionClient, ExtractionConfig, ExtractionError, extract_json_block};
pub use faq::{FAQ_MISS_HINT, FaqHit, faq_search};
pub use pipeline::{ChatOutcome, NEXT_HINT, Pipeline, PipelineError, Summary};
pub use reconcile::reconcile;
pub use record::{Category, ComplaintRecord, ContactChannel, Priority};
pub use rules::{infer_category, infer_priority, normalize_time_window};
pub use validate::{Verdict, validate};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// One chat-completion call to the language-model service.
#[derive(Debug, Clone)]
pub struct CompletionRequest<'a> {
    pub messages: &'a [ChatMessage],
    pub model: &'a str,
    pub temperature: f32,
    /// Ask the service to constrain its reply to a JSON object.
    pub json_mode: bool,
}

#[derive(Debug, Clone)]
pub struct LLMResponse {
    pub content: String,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn chat(&self, request: &CompletionRequest<'_>) -> anyhow::Result<LLMResponse>;
}

#[async_trait]
impl<P> LLMProvider for std::sync::Arc<P>
where
    P: LLMProvider + ?Sized,
{
    async fn chat(&self, request: &CompletionRequest<'_>) -> anyhow::Result<LLMResponse> {
        (**self).chat(request).await
    }
}
