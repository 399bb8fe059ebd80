//! Extraction client: asks the completion service for a JSON complaint record.
//!
//! The primary call requests JSON-object mode and parses the reply directly.
//! Any failure there (transport error, unsupported mode, malformed JSON)
//! degrades to a plain call whose reply is scanned for a `{...}` block.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};

use crate::prompts::{EXTRACTION_SYSTEM, extraction_user_message};
use crate::{ChatMessage, CompletionRequest, LLMProvider};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("completion service failed (primary: {primary}; fallback: {fallback})")]
    Transport {
        primary: String,
        fallback: anyhow::Error,
    },

    #[error("model reply is not valid JSON (primary: {primary}; fallback: {fallback})")]
    Parse {
        primary: String,
        #[source]
        fallback: serde_json::Error,
    },

    #[error("model reply is not a JSON object (primary: {primary})")]
    NotAnObject { primary: String },
}

/// Model settings for extraction calls.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    pub model: String,
    pub temperature: f32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            model: "qwen2.5-7b-instruct-1m".to_string(),
            temperature: 0.2,
        }
    }
}

pub struct ExtractionClient<P> {
    provider: P,
    config: ExtractionConfig,
}

impl<P> ExtractionClient<P>
where
    P: LLMProvider,
{
    pub const fn new(provider: P, config: ExtractionConfig) -> Self {
        Self { provider, config }
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Extract a raw complaint object from free text.
    pub async fn extract(&self, text: &str) -> Result<Map<String, Value>, ExtractionError> {
        let messages = [
            ChatMessage::system(EXTRACTION_SYSTEM),
            ChatMessage::user(extraction_user_message(text)),
        ];

        let primary = match self.request(&messages, true).await {
            Ok(content) => match serde_json::from_str::<Value>(&content) {
                Ok(Value::Object(object)) => return Ok(object),
                Ok(_) => "reply is not a JSON object".to_string(),
                Err(e) => format!("invalid JSON: {e}"),
            },
            Err(e) => e.to_string(),
        };

        warn!("JSON-mode extraction failed ({primary}), retrying without response_format");

        let content = self
            .request(&messages, false)
            .await
            .map_err(|fallback| ExtractionError::Transport {
                primary: primary.clone(),
                fallback,
            })?;

        match serde_json::from_str::<Value>(extract_json_block(&content)) {
            Ok(Value::Object(object)) => Ok(object),
            Ok(_) => Err(ExtractionError::NotAnObject { primary }),
            Err(fallback) => Err(ExtractionError::Parse { primary, fallback }),
        }
    }

    async fn request(&self, messages: &[ChatMessage], json_mode: bool) -> anyhow::Result<String> {
        let request = CompletionRequest {
            messages,
            model: &self.config.model,
            temperature: self.config.temperature,
            json_mode,
        };
        let response = self.provider.chat(&request).await?;
        if let Some(usage) = &response.usage {
            info!(
                "Extraction usage: prompt={} completion={} total={}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }
        Ok(response.content)
    }
}

/// Slice from the first `{` to the last `}` of a reply, spanning newlines.
/// Without such a pair the trimmed reply is returned whole.
#[must_use]
pub fn extract_json_block(response: &str) -> &str {
    let trimmed = response.trim();
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if end > start => &trimmed[start..=end],
        _ => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_is_cut_out_of_prose() {
        let reply = "Berikut hasilnya:\n{\n  \"description\": \"x\"\n}\nSemoga membantu.";
        assert_eq!(extract_json_block(reply), "{\n  \"description\": \"x\"\n}");
    }

    #[test]
    fn nested_objects_stay_whole() {
        let reply = "```json\n{\"a\": {\"b\": 1}}\n```";
        assert_eq!(extract_json_block(reply), "{\"a\": {\"b\": 1}}");
    }

    #[test]
    fn reply_without_braces_is_trimmed() {
        assert_eq!(extract_json_block("  null \n"), "null");
        assert_eq!(extract_json_block("} oops {"), "} oops {");
    }
}
