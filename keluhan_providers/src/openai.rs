use async_trait::async_trait;
use keluhan_core::{CompletionRequest, LLMProvider, LLMResponse, Usage};
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::info;

use crate::retry::{RetryPolicy, retry_with_backoff};

/// Chat-completion client for any OpenAI-compatible server (LM Studio,
/// vLLM, llama.cpp server, ...).
pub struct OpenAiCompatProvider {
    client: Client,
    api_key: String,
    base_url: String,
    retry: RetryPolicy,
}

impl OpenAiCompatProvider {
    /// Build a provider whose every request is bounded by `timeout`.
    pub fn new(api_key: String, timeout: Duration) -> anyhow::Result<Self> {
        info!("Creating OpenAiCompatProvider (timeout={}s)", timeout.as_secs());
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: "http://localhost:1234/v1".to_string(),
            retry: RetryPolicy::default(),
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn request_body(request: &CompletionRequest<'_>) -> Value {
        let mut body = json!({
            "model": request.model,
            "messages": request.messages,
            "temperature": request.temperature,
        });
        if request.json_mode {
            body["response_format"] = json!({ "type": "json_object" });
        }
        body
    }

    fn parse_response(response: &Value) -> anyhow::Result<LLMResponse> {
        let content = response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing content"))?
            .to_string();

        let usage = response["usage"].as_object().map(|u| Usage {
            prompt_tokens: u32::try_from(u["prompt_tokens"].as_u64().unwrap_or(0)).unwrap_or(0),
            completion_tokens: u32::try_from(u["completion_tokens"].as_u64().unwrap_or(0))
                .unwrap_or(0),
            total_tokens: u32::try_from(u["total_tokens"].as_u64().unwrap_or(0)).unwrap_or(0),
        });

        Ok(LLMResponse { content, usage })
    }

    /// Helper method to send a single request
    async fn try_send(&self, body: &Value) -> anyhow::Result<LLMResponse> {
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Self::parse_response(&response)
    }
}

/// Client errors (4xx) such as an unsupported `response_format` will not
/// succeed on retry; connection failures, timeouts and 5xx might.
fn is_transient(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<reqwest::Error>()
        .is_none_or(|e| !e.status().is_some_and(|s| s.is_client_error()))
}

#[async_trait]
impl LLMProvider for OpenAiCompatProvider {
    async fn chat(&self, request: &CompletionRequest<'_>) -> anyhow::Result<LLMResponse> {
        let body = Self::request_body(request);

        info!(
            "Sending request to completion service: model={} json_mode={}",
            request.model, request.json_mode
        );

        let response =
            retry_with_backoff(|| self.try_send(&body), &self.retry, is_transient).await?;

        info!("Received response from completion service");
        Ok(response)
    }
}
