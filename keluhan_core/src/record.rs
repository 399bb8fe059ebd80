//! The structured complaint record and its enumerated fields.
//!
//! Enumerations keep whatever the model produced: values outside the known
//! set land in an `Unknown` variant so the validator can reject them instead
//! of them being coerced away.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Product line a complaint belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Tabungan,
    Giro,
    KartuKredit,
    Lainnya,
    Unknown(String),
}

impl Category {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Tabungan => "Tabungan",
            Self::Giro => "Giro",
            Self::KartuKredit => "Kartu Kredit",
            Self::Lainnya => "Lainnya",
            Self::Unknown(raw) => raw,
        }
    }

    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Tabungan" => Self::Tabungan,
            "Giro" => Self::Giro,
            "Kartu Kredit" => Self::KartuKredit,
            "Lainnya" => Self::Lainnya,
            _ => Self::Unknown(value),
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handling priority of a complaint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Unknown(String),
}

impl Priority {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Unknown(raw) => raw,
        }
    }

    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Low" => Self::Low,
            "Medium" => Self::Medium,
            "High" => Self::High,
            _ => Self::Unknown(value),
        }
    }
}

impl From<Priority> for String {
    fn from(value: Priority) -> Self {
        match value {
            Priority::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the complainant prefers to be contacted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContactChannel {
    Call,
    Chat,
    Unknown(String),
}

impl ContactChannel {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Call => "call",
            Self::Chat => "chat",
            Self::Unknown(raw) => raw,
        }
    }

    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<String> for ContactChannel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "call" => Self::Call,
            "chat" => Self::Chat,
            _ => Self::Unknown(value),
        }
    }
}

impl From<ContactChannel> for String {
    fn from(value: ContactChannel) -> Self {
        match value {
            ContactChannel::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ContactChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured complaint extracted from free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintRecord {
    pub full_name: Option<String>,
    pub account_number: Option<String>,
    pub category: Option<Category>,
    pub subcategory: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    pub preferred_contact: Option<ContactChannel>,
    pub standby_call_window: Option<String>,
    #[serde(default)]
    pub attachments: Vec<String>,
}

impl ComplaintRecord {
    /// Build a record from the model's raw JSON object.
    ///
    /// Conversion never fails: numbers are stringified, empty strings and
    /// unsupported JSON types read as absent, and non-string attachments are
    /// dropped. Strictness is left to [`crate::validate`].
    #[must_use]
    pub fn from_value(raw: &Value) -> Self {
        Self {
            full_name: text_field(raw, "full_name"),
            account_number: text_field(raw, "account_number"),
            category: text_field(raw, "category").map(Category::from),
            subcategory: text_field(raw, "subcategory"),
            description: text_field(raw, "description").unwrap_or_default(),
            priority: text_field(raw, "priority")
                .map(Priority::from)
                .unwrap_or_default(),
            preferred_contact: text_field(raw, "preferred_contact").map(ContactChannel::from),
            standby_call_window: text_field(raw, "standby_call_window"),
            attachments: raw
                .get("attachments")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    /// Whether the description carries anything besides whitespace.
    #[must_use]
    pub fn has_description(&self) -> bool {
        !self.description.trim().is_empty()
    }

    /// Number of fields carrying a value (not null, not empty, not `[]`).
    #[must_use]
    pub fn filled_fields(&self) -> usize {
        let optional_text = [
            &self.full_name,
            &self.account_number,
            &self.subcategory,
            &self.standby_call_window,
        ]
        .into_iter()
        .filter(|field| field.as_deref().is_some_and(|s| !s.is_empty()))
        .count();

        let category = usize::from(
            self.category
                .as_ref()
                .is_some_and(|c| !c.as_str().is_empty()),
        );
        let contact = usize::from(
            self.preferred_contact
                .as_ref()
                .is_some_and(|c| !c.as_str().is_empty()),
        );
        let description = usize::from(self.has_description());
        let priority = usize::from(!self.priority.as_str().is_empty());
        let attachments = usize::from(!self.attachments.is_empty());

        optional_text + category + contact + description + priority + attachments
    }
}

fn text_field(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
