//! Extraction, reconciliation, validation and scoring for one complaint.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::confidence::{round2, score};
use crate::extraction::{ExtractionClient, ExtractionConfig, ExtractionError};
use crate::reconcile::reconcile;
use crate::record::ComplaintRecord;
use crate::validate::validate;
use crate::LLMProvider;

/// Guidance returned alongside an invalid record.
pub const NEXT_HINT: &str = "Mohon lengkapi data yang kurang (mis. kategori/nomor rekening).";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("text kosong")]
    EmptyInput,

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

/// Human-readable digest of a record, keyed in Indonesian.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub nama: Option<String>,
    pub kategori: Option<String>,
    pub subkategori: Option<String>,
    pub ringkasan: Option<String>,
    pub kontak: Option<String>,
    pub waktu_standby: Option<String>,
}

impl From<&ComplaintRecord> for Summary {
    fn from(record: &ComplaintRecord) -> Self {
        Self {
            nama: record.full_name.clone(),
            kategori: record.category.as_ref().map(|c| c.as_str().to_string()),
            subkategori: record.subcategory.clone(),
            ringkasan: Some(record.description.clone()).filter(|d| !d.is_empty()),
            kontak: record
                .preferred_contact
                .as_ref()
                .map(|c| c.as_str().to_string()),
            waktu_standby: record.standby_call_window.clone(),
        }
    }
}

/// Response body for one processed complaint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatOutcome {
    pub valid: bool,
    pub message: String,
    pub confidence: f64,
    pub extracted: ComplaintRecord,
    pub summary: Summary,
    pub next_hint: Option<String>,
}

impl ChatOutcome {
    /// Validate, score and summarize a reconciled record.
    #[must_use]
    pub fn assess(record: ComplaintRecord) -> Self {
        let verdict = validate(&record);
        let confidence = round2(score(&record));
        let summary = Summary::from(&record);

        Self {
            valid: verdict.ok,
            message: verdict.message.to_string(),
            confidence,
            extracted: record,
            summary,
            next_hint: (!verdict.ok).then(|| NEXT_HINT.to_string()),
        }
    }
}

pub struct Pipeline<P> {
    client: ExtractionClient<P>,
}

impl<P> Pipeline<P>
where
    P: LLMProvider,
{
    pub const fn new(provider: P, config: ExtractionConfig) -> Self {
        Self {
            client: ExtractionClient::new(provider, config),
        }
    }

    #[must_use]
    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Run the full pipeline on one complaint.
    ///
    /// Blank text is rejected before the completion service is contacted.
    pub async fn process(&self, text: &str) -> Result<ChatOutcome, PipelineError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PipelineError::EmptyInput);
        }

        let raw = self.client.extract(text).await?;
        let record = reconcile(ComplaintRecord::from_value(&Value::Object(raw)), text);
        let outcome = ChatOutcome::assess(record);

        info!(
            "Complaint processed: category={:?} priority={} valid={} confidence={:.2}",
            outcome.summary.kategori,
            outcome.extracted.priority,
            outcome.valid,
            outcome.confidence
        );

        Ok(outcome)
    }
}
