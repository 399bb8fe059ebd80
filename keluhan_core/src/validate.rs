//! Business-rule validation of a reconciled record.

use crate::record::ComplaintRecord;

pub const MSG_OK: &str = "ok";
pub const MSG_INVALID_CATEGORY: &str =
    "Kategori tidak valid. Pilihan: Tabungan/Giro/Kartu Kredit/Lainnya.";
pub const MSG_INVALID_ACCOUNT: &str = "Format nomor rekening tidak valid (10\u{2013}16 digit).";
pub const MSG_MISSING_DESCRIPTION: &str = "Deskripsi keluhan wajib diisi.";
pub const MSG_INVALID_PRIORITY: &str = "Priority harus salah satu: Low/Medium/High.";
pub const MSG_INVALID_CONTACT: &str = "preferred_contact harus call/chat/null.";

/// Outcome of [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub ok: bool,
    pub message: &'static str,
}

impl Verdict {
    const fn pass() -> Self {
        Self {
            ok: true,
            message: MSG_OK,
        }
    }

    const fn fail(message: &'static str) -> Self {
        Self { ok: false, message }
    }
}

/// Check `record` against the business schema, stopping at the first failure.
#[must_use]
pub fn validate(record: &ComplaintRecord) -> Verdict {
    if record.category.as_ref().is_some_and(|c| !c.is_known()) {
        return Verdict::fail(MSG_INVALID_CATEGORY);
    }

    if let Some(account) = record.account_number.as_deref().filter(|a| !a.is_empty())
        && !is_account_number(account)
    {
        return Verdict::fail(MSG_INVALID_ACCOUNT);
    }

    if !record.has_description() {
        return Verdict::fail(MSG_MISSING_DESCRIPTION);
    }

    if !record.priority.is_known() {
        return Verdict::fail(MSG_INVALID_PRIORITY);
    }

    if record
        .preferred_contact
        .as_ref()
        .is_some_and(|c| !c.is_known())
    {
        return Verdict::fail(MSG_INVALID_CONTACT);
    }

    Verdict::pass()
}

fn is_account_number(value: &str) -> bool {
    (10..=16).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Category, ContactChannel, Priority};

    fn valid_record() -> ComplaintRecord {
        ComplaintRecord {
            category: Some(Category::Tabungan),
            description: "Kartu debit tertelan".into(),
            ..ComplaintRecord::default()
        }
    }

    #[test]
    fn accepts_minimal_record() {
        assert_eq!(validate(&valid_record()), Verdict::pass());
        let no_category = ComplaintRecord {
            category: None,
            ..valid_record()
        };
        assert!(validate(&no_category).ok);
    }

    #[test]
    fn account_number_length_boundaries() {
        let with_account = |digits: usize| ComplaintRecord {
            account_number: Some("7".repeat(digits)),
            ..valid_record()
        };

        assert_eq!(validate(&with_account(9)).message, MSG_INVALID_ACCOUNT);
        assert!(validate(&with_account(10)).ok);
        assert!(validate(&with_account(16)).ok);
        assert_eq!(validate(&with_account(17)).message, MSG_INVALID_ACCOUNT);
    }

    #[test]
    fn account_number_must_be_digits() {
        let record = ComplaintRecord {
            account_number: Some("12345-67890".into()),
            ..valid_record()
        };
        assert!(!validate(&record).ok);
    }

    #[test]
    fn unknown_category_is_rejected_first() {
        let record = ComplaintRecord {
            category: Some(Category::Unknown("Deposito".into())),
            description: String::new(),
            ..valid_record()
        };
        assert_eq!(validate(&record).message, MSG_INVALID_CATEGORY);
    }

    #[test]
    fn blank_description_is_rejected() {
        let record = ComplaintRecord {
            description: "   ".into(),
            ..valid_record()
        };
        assert_eq!(validate(&record).message, MSG_MISSING_DESCRIPTION);
    }

    #[test]
    fn unknown_priority_and_contact_are_rejected() {
        let record = ComplaintRecord {
            priority: Priority::Unknown("Urgent".into()),
            ..valid_record()
        };
        assert_eq!(validate(&record).message, MSG_INVALID_PRIORITY);

        let record = ComplaintRecord {
            preferred_contact: Some(ContactChannel::Unknown("email".into())),
            ..valid_record()
        };
        assert_eq!(validate(&record).message, MSG_INVALID_CONTACT);
    }

    #[test]
    fn validation_does_not_mutate() {
        let record = valid_record();
        let before = record.clone();
        let _ = validate(&record);
        assert_eq!(record, before);
    }
}
