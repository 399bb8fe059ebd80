//! Keyword heuristics for category, priority and standby time windows.
//! Pure functions, total over every input string.

use regex::Regex;
use std::sync::OnceLock;

use crate::record::{Category, Priority};

/// A keyword pattern, optionally vetoed by what follows the match.
struct KeywordRule {
    pattern: Regex,
    /// Literal that must not follow the match (after optional whitespace).
    unless_followed_by: Option<&'static str>,
}

impl KeywordRule {
    fn is_match(&self, text: &str) -> bool {
        let Some(veto) = self.unless_followed_by else {
            return self.pattern.is_match(text);
        };
        self.pattern
            .find_iter(text)
            .any(|m| !text[m.end()..].trim_start().starts_with(veto))
    }
}

struct CategoryGroup {
    category: Category,
    keywords: Vec<KeywordRule>,
}

impl CategoryGroup {
    fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|rule| rule.is_match(text))
    }
}

/// Compiled keyword tables, checked in declaration order.
struct RuleBook {
    /// Credit card first, then giro, then savings. First match wins.
    groups: Vec<CategoryGroup>,
    savings_subcategories: Vec<(Regex, &'static str)>,
    high_priority: Vec<Regex>,
    time_window: Regex,
}

static RULE_BOOK: OnceLock<RuleBook> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex patterns are guaranteed to be valid"
)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Static regex pattern is guaranteed to be valid")
}

fn keyword(pattern: &str) -> KeywordRule {
    KeywordRule {
        pattern: compile(pattern),
        unless_followed_by: None,
    }
}

fn rule_book() -> &'static RuleBook {
    RULE_BOOK.get_or_init(|| RuleBook {
        groups: vec![
            CategoryGroup {
                category: Category::KartuKredit,
                keywords: vec![
                    keyword(r"\bkartu\s*kredit\b"),
                    keyword(r"\bcc\b"),
                    keyword(r"\blimit\b"),
                    keyword(r"\bcicilan\b"),
                    keyword(r"\bcharge\s*back\b"),
                    keyword(r"\bchargeback\b"),
                    keyword(r"\brefund\s*merchant\b"),
                    keyword(r"\btagihan\b"),
                ],
            },
            CategoryGroup {
                category: Category::Giro,
                keywords: vec![
                    keyword(r"\bgiro\b"),
                    keyword(r"\bbilyet\s*giro\b"),
                    keyword(r"\bbg\b"),
                    keyword(r"\bcek\b"),
                    keyword(r"\binkaso\b"),
                    keyword(r"\bkliring\b"),
                ],
            },
            CategoryGroup {
                category: Category::Tabungan,
                keywords: vec![
                    keyword(r"\bkartu\s*debit\b"),
                    keyword(r"\bdebit\b"),
                    keyword(r"\batm\b"),
                    KeywordRule {
                        pattern: compile(r"\brekening\b"),
                        unless_followed_by: Some("kredit"),
                    },
                    keyword(r"\btarik\b"),
                    keyword(r"\bsetor\b"),
                    keyword(r"\bbuku\s*tabungan\b"),
                    keyword(r"\bsaldo\b"),
                ],
            },
        ],
        savings_subcategories: vec![
            (compile("tertelan"), "Kartu debit tertelan"),
            (compile("hilang"), "Kartu debit hilang"),
            (compile("tarik.*gagal|gagal.*tarik"), "Tarik tunai gagal"),
            (compile("pin.*blok|blok.*pin"), "PIN terblokir"),
        ],
        high_priority: vec![
            compile(r"(?i)\bhilang\b"),
            compile(r"(?i)\bdicuri\b"),
            compile(r"(?i)\bfraud\b"),
            compile(r"(?i)\btidak\s*kenal(i)?\b"),
            compile(r"(?i)\btidak\s*dikenal(i)?\b"),
            compile(r"(?i)\bakses\s*(tidak\s*sah|ilegal)\b"),
        ],
        time_window: compile(r"^([0-9]{1,2})(?::?([0-9]{2}))?-([0-9]{1,2})(?::?([0-9]{2}))?$"),
    })
}

/// Infer `(category, subcategory)` from complaint text.
///
/// Only a savings match yields a subcategory. Text with no keyword at all
/// yields `(None, None)`.
#[must_use]
pub fn infer_category(text: &str) -> (Option<Category>, Option<&'static str>) {
    let book = rule_book();
    let lowered = text.to_lowercase();

    let Some(group) = book.groups.iter().find(|g| g.matches(&lowered)) else {
        return (None, None);
    };

    let subcategory = if group.category == Category::Tabungan {
        book.savings_subcategories
            .iter()
            .find(|(pattern, _)| pattern.is_match(&lowered))
            .map(|(_, label)| *label)
    } else {
        None
    };

    (Some(group.category.clone()), subcategory)
}

/// Severity keywords force `High`; otherwise a known current value is kept
/// and anything else falls back to `Medium`.
#[must_use]
pub fn infer_priority(text: &str, current: Option<&Priority>) -> Priority {
    if rule_book().high_priority.iter().any(|re| re.is_match(text)) {
        return Priority::High;
    }
    match current {
        Some(priority) if priority.is_known() => priority.clone(),
        _ => Priority::Medium,
    }
}

/// Rewrite a standby window such as `13-15` or `13.30 – 15.45` into
/// `HH:mm-HH:mm`.
///
/// Input that does not parse, or parses out of range, is returned as given.
/// Blank input reads as no window at all.
#[must_use]
pub fn normalize_time_window(input: Option<&str>) -> Option<String> {
    let raw = input?;
    if raw.trim().is_empty() {
        return None;
    }

    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '.' => ':',
            '\u{2013}' | '\u{2014}' => '-',
            other => other,
        })
        .collect();

    let Some(caps) = rule_book().time_window.captures(&compact) else {
        return Some(raw.to_string());
    };

    let part = |idx: usize| -> Option<u32> {
        caps.get(idx).map_or(Some(0), |m| m.as_str().parse().ok())
    };

    match (part(1), part(2), part(3), part(4)) {
        (Some(h1), Some(m1), Some(h2), Some(m2))
            if h1 <= 23 && h2 <= 23 && m1 <= 59 && m2 <= 59 =>
        {
            Some(format!("{h1:02}:{m1:02}-{h2:02}:{m2:02}"))
        }
        _ => Some(raw.to_string()),
    }
}
