//! End-to-end pipeline scenarios against a scripted completion service.
//!
//! These tests verify that:
//! - Rule inference corrects the model's category and priority
//! - JSON-mode failures degrade to the plain fallback call
//! - Unparseable replies on both calls surface as extraction errors
//! - Blank input never reaches the completion service

use async_trait::async_trait;
use keluhan_core::{
    Category, CompletionRequest, ExtractionConfig, ExtractionError, LLMProvider, LLMResponse,
    Pipeline, PipelineError, Priority,
};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Replays canned replies in order and records every request's JSON mode.
struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, String>>>,
    json_modes: Mutex<Vec<bool>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    fn new(replies: Vec<Result<&str, &str>>) -> Self {
        Self {
            replies: Mutex::new(
                replies
                    .into_iter()
                    .map(|r| r.map(str::to_string).map_err(str::to_string))
                    .collect(),
            ),
            json_modes: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    #[expect(clippy::unwrap_used, reason = "Test failure should panic")]
    fn json_modes(&self) -> Vec<bool> {
        self.json_modes.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    #[expect(clippy::unwrap_used, reason = "Test failure should panic")]
    async fn chat(&self, request: &CompletionRequest<'_>) -> anyhow::Result<LLMResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.json_modes.lock().unwrap().push(request.json_mode);
        assert!((request.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(request.messages.len(), 2);
        // The model always comes from the extraction config.
        assert_eq!(request.model, "qwen2.5-7b-instruct-1m");

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err("no scripted reply".to_string()));
        reply
            .map(|content| LLMResponse {
                content,
                usage: None,
            })
            .map_err(|e| anyhow::anyhow!(e))
    }
}

fn pipeline(provider: ScriptedProvider) -> Pipeline<std::sync::Arc<ScriptedProvider>> {
    Pipeline::new(std::sync::Arc::new(provider), ExtractionConfig::default())
}

const SWALLOWED_CARD_REPLY: &str = r#"{
  "full_name": null,
  "account_number": "123456789012",
  "category": "Lainnya",
  "subcategory": null,
  "description": "Kartu debit tertelan di ATM BNI Semarang.",
  "priority": "Medium",
  "preferred_contact": "call",
  "standby_call_window": "13-15",
  "attachments": []
}"#;

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "Test failure should panic")]
async fn swallowed_debit_card_is_savings() {
    let provider = std::sync::Arc::new(ScriptedProvider::new(vec![Ok(SWALLOWED_CARD_REPLY)]));
    let pipeline = Pipeline::new(provider.clone(), ExtractionConfig::default());

    let outcome = pipeline
        .process(
            "kartu debit saya tertelan di ATM BNI Semarang, rekening 123456789012, standby 13-15",
        )
        .await
        .unwrap();

    let record = &outcome.extracted;
    assert_eq!(record.category, Some(Category::Tabungan));
    assert_eq!(record.subcategory.as_deref(), Some("Kartu debit tertelan"));
    assert_eq!(record.account_number.as_deref(), Some("123456789012"));
    assert_eq!(record.standby_call_window.as_deref(), Some("13:00-15:00"));
    assert_eq!(record.priority, Priority::Medium);
    assert!(outcome.valid);
    assert_eq!(outcome.message, "ok");
    assert_eq!(outcome.next_hint, None);
    assert_eq!(outcome.summary.waktu_standby.as_deref(), Some("13:00-15:00"));
    assert_eq!(provider.calls(), 1);
    assert_eq!(provider.json_modes(), vec![true]);
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "Test failure should panic")]
async fn stolen_credit_card_is_high_priority() {
    let reply = r#"{"category": "Tabungan", "description": "Kartu kredit dicuri, ada transaksi asing.", "priority": "Low"}"#;
    let pipeline = pipeline(ScriptedProvider::new(vec![Ok(reply)]));

    let outcome = pipeline
        .process("kartu kredit saya dicuri, ada transaksi tidak saya kenal")
        .await
        .unwrap();

    assert_eq!(outcome.extracted.category, Some(Category::KartuKredit));
    assert_eq!(outcome.extracted.priority, Priority::High);
    assert!(outcome.valid);
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "Test failure should panic")]
async fn unsupported_json_mode_falls_back_to_block_scan() {
    let provider = std::sync::Arc::new(ScriptedProvider::new(vec![
        Err("400 Bad Request: response_format not supported"),
        Ok("Tentu, ini hasilnya:\n```json\n{\"category\": \"Giro\", \"description\": \"BG ditolak\"}\n```"),
    ]));
    let pipeline = Pipeline::new(provider.clone(), ExtractionConfig::default());

    let outcome = pipeline.process("BG saya ditolak").await.unwrap();

    assert_eq!(outcome.extracted.category, Some(Category::Giro));
    assert_eq!(outcome.extracted.description, "BG ditolak");
    assert_eq!(provider.calls(), 2);
    assert_eq!(provider.json_modes(), vec![true, false]);
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "Test failure should panic")]
async fn malformed_primary_reply_falls_back() {
    let provider = std::sync::Arc::new(ScriptedProvider::new(vec![
        Ok("{\"category\": \"Giro\", "),
        Ok("{\"description\": \"Setoran cek pending\"}"),
    ]));
    let pipeline = Pipeline::new(provider.clone(), ExtractionConfig::default());

    let outcome = pipeline.process("setoran cek saya pending").await.unwrap();

    assert_eq!(outcome.extracted.category, Some(Category::Giro));
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn unparseable_replies_fail_extraction() {
    let pipeline = pipeline(ScriptedProvider::new(vec![
        Ok("maaf, saya tidak paham"),
        Ok("maaf, saya tidak paham"),
    ]));

    let result = pipeline.process("kartu debit saya hilang").await;

    assert!(matches!(
        result,
        Err(PipelineError::Extraction(ExtractionError::Parse { .. }))
    ));
}

#[tokio::test]
async fn unreachable_service_fails_extraction() {
    let pipeline = pipeline(ScriptedProvider::new(vec![
        Err("connection refused"),
        Err("connection refused"),
    ]));

    let result = pipeline.process("kartu debit saya hilang").await;

    assert!(matches!(
        result,
        Err(PipelineError::Extraction(ExtractionError::Transport { .. }))
    ));
}

#[tokio::test]
async fn non_object_reply_fails_extraction() {
    let pipeline = pipeline(ScriptedProvider::new(vec![Ok("[1, 2]"), Ok("[1, 2]")]));

    let result = pipeline.process("kartu debit saya hilang").await;

    assert!(matches!(
        result,
        Err(PipelineError::Extraction(ExtractionError::NotAnObject { .. }))
    ));
}

#[tokio::test]
async fn blank_text_never_calls_the_service() {
    let provider = std::sync::Arc::new(ScriptedProvider::new(vec![Ok("{}")]));
    let pipeline = Pipeline::new(provider.clone(), ExtractionConfig::default());

    let result = pipeline.process("   \n\t ").await;

    assert!(matches!(result, Err(PipelineError::EmptyInput)));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "Test failure should panic")]
async fn hallucinated_category_without_keywords_is_invalid() {
    let reply = r#"{"category": "Deposito", "description": "Bunga deposito kurang"}"#;
    let pipeline = pipeline(ScriptedProvider::new(vec![Ok(reply)]));

    let outcome = pipeline.process("bunga saya kurang").await.unwrap();

    assert!(!outcome.valid);
    assert_eq!(
        outcome.extracted.category,
        Some(Category::Unknown("Deposito".into()))
    );
    assert!(outcome.message.starts_with("Kategori tidak valid"));
    assert!(outcome.next_hint.is_some());
}
