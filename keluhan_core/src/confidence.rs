//! Completeness-based confidence score.

use crate::record::ComplaintRecord;

const BASE: f64 = 0.45;
const PER_FIELD: f64 = 0.06;
const CATEGORY_AND_DESCRIPTION_BONUS: f64 = 0.05;

/// Heuristic completeness score in `[0, 1]`. Not a probability.
#[must_use]
pub fn score(record: &ComplaintRecord) -> f64 {
    #[expect(clippy::cast_precision_loss, reason = "field count is at most 9")]
    let filled = record.filled_fields() as f64;
    let mut value = PER_FIELD.mul_add(filled, BASE);

    let has_category = record
        .category
        .as_ref()
        .is_some_and(|c| !c.as_str().is_empty());
    if has_category && record.has_description() {
        value += CATEGORY_AND_DESCRIPTION_BONUS;
    }

    value.clamp(0.0, 1.0)
}

/// Round to two decimals for presentation.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Category, ContactChannel, Priority};

    #[test]
    fn empty_record_scores_base_plus_priority() {
        // Priority always carries a value.
        let record = ComplaintRecord::default();
        assert!((round2(score(&record)) - 0.51).abs() < f64::EPSILON);
    }

    #[test]
    fn category_and_description_earn_bonus() {
        let record = ComplaintRecord {
            category: Some(Category::Giro),
            description: "BG ditolak".into(),
            ..ComplaintRecord::default()
        };
        // 3 filled fields + bonus
        assert!((round2(score(&record)) - 0.68).abs() < f64::EPSILON);
    }

    #[test]
    fn whitespace_description_counts_as_missing() {
        let record = ComplaintRecord {
            category: Some(Category::Giro),
            description: " \n\t ".into(),
            ..ComplaintRecord::default()
        };
        assert!(!record.has_description());
        assert_eq!(record.filled_fields(), 2);
        // category + priority, no bonus
        assert!((round2(score(&record)) - 0.57).abs() < f64::EPSILON);
        assert!(!crate::validate(&record).ok);
    }

    #[test]
    fn full_record_is_clamped_to_one() {
        let record = ComplaintRecord {
            full_name: Some("Budi".into()),
            account_number: Some("1234567890".into()),
            category: Some(Category::Tabungan),
            subcategory: Some("Kartu debit tertelan".into()),
            description: "Kartu tertelan".into(),
            priority: Priority::High,
            preferred_contact: Some(ContactChannel::Call),
            standby_call_window: Some("13:00-15:00".into()),
            attachments: vec!["foto.jpg".into()],
        };
        assert!((score(&record) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn score_stays_in_bounds() {
        let records = [
            ComplaintRecord::default(),
            ComplaintRecord {
                description: "x".into(),
                ..ComplaintRecord::default()
            },
            ComplaintRecord {
                category: Some(Category::Unknown(String::new())),
                ..ComplaintRecord::default()
            },
        ];
        for record in &records {
            let value = score(record);
            assert!((0.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert!((round2(0.686_666) - 0.69).abs() < f64::EPSILON);
        assert!((round2(0.5) - 0.5).abs() < f64::EPSILON);
    }
}
