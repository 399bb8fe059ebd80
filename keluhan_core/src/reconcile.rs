//! Correct the model's record against the keyword heuristics.

use tracing::debug;

use crate::record::ComplaintRecord;
use crate::rules::{infer_category, infer_priority, normalize_time_window};

/// Merge rule-based inference into `raw`, using the original complaint text.
///
/// Precedence:
/// - a category hint always replaces the model's category;
/// - a subcategory hint only fills an empty subcategory;
/// - severity keywords force `High`, otherwise a known model priority stays;
/// - the standby window is normalized.
///
/// Every other field passes through untouched.
#[must_use]
pub fn reconcile(mut raw: ComplaintRecord, original_text: &str) -> ComplaintRecord {
    let (category_hint, subcategory_hint) = infer_category(original_text);

    if let Some(hint) = category_hint
        && raw.category.as_ref() != Some(&hint)
    {
        debug!(
            "Category override: model={:?} rules={}",
            raw.category.as_ref().map(|c| c.as_str().to_string()),
            hint
        );
        raw.category = Some(hint);
    }

    if raw.subcategory.as_deref().is_none_or(str::is_empty)
        && let Some(hint) = subcategory_hint
    {
        raw.subcategory = Some(hint.to_string());
    }

    raw.priority = infer_priority(original_text, Some(&raw.priority));
    raw.standby_call_window = normalize_time_window(raw.standby_call_window.as_deref());

    raw
}
