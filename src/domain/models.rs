//! Domain models for the quote collection.
//!
//! A [`Quote`] is the system's sole domain entity: a text paired with a
//! category. Quotes have no identity field; merge identity is the `text`
//! alone, while change detection compares whole records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{AppError, Result};

/// Sentinel category meaning "no filter" at the CLI surface.
pub const ALL_CATEGORIES: &str = "all";

/// A single quote with its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// The quote text. Also the merge identity: two quotes with the same
    /// text are "the same quote" as far as reconciliation is concerned.
    pub text: String,
    /// Free-form category label.
    #[serde(default)]
    pub category: String,
}

impl Quote {
    /// Build a quote from untrusted input, trimming both fields.
    ///
    /// # Errors
    /// Returns [`AppError::Validation`] if either field is empty after
    /// trimming. Imported quotes bypass this path on purpose.
    pub fn validated(text: &str, category: &str) -> Result<Self> {
        let text = text.trim();
        let category = category.trim();

        if text.is_empty() {
            return Err(AppError::Validation {
                message: "quote text must not be empty".into(),
            });
        }
        if category.is_empty() {
            return Err(AppError::Validation {
                message: "quote category must not be empty".into(),
            });
        }

        Ok(Self {
            text: text.to_string(),
            category: category.to_string(),
        })
    }
}

/// The three quotes a fresh store starts with.
#[must_use]
pub fn seed_quotes() -> Vec<Quote> {
    vec![
        Quote {
            text: "The best way to get started is to quit talking and begin doing.".into(),
            category: "Motivation".into(),
        },
        Quote {
            text: "Your time is limited, so don’t waste it living someone else’s life.".into(),
            category: "Life".into(),
        },
        Quote {
            text: "If life were predictable it would cease to be life.".into(),
            category: "Philosophy".into(),
        },
    ]
}

/// Outcome of one reconcile cycle.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    /// Remote quotes appended because no local text matched.
    pub added: usize,
    /// Local quotes overwritten in place by a remote record with the
    /// same text but different content.
    pub replaced: usize,
    /// Whether the cycle mutated the store at all.
    pub dirty: bool,
    /// Whether the push phase reached the remote.
    pub pushed: bool,
    /// Push failure message, if any. Pull effects stand regardless.
    pub push_error: Option<String>,
    /// Set when the cycle was skipped because another was in flight.
    pub skipped: bool,
    /// When the cycle finished.
    pub completed_at: Option<DateTime<Utc>>,
}

impl SyncReport {
    /// Report for a cycle that never ran because one was already in flight.
    #[must_use]
    pub const fn skipped() -> Self {
        Self {
            added: 0,
            replaced: 0,
            dirty: false,
            pushed: false,
            push_error: None,
            skipped: true,
            completed_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_trims_fields() {
        let quote = Quote::validated("  hello  ", " Wisdom ").unwrap();
        assert_eq!(quote.text, "hello");
        assert_eq!(quote.category, "Wisdom");
    }

    #[test]
    fn test_validated_rejects_empty_text() {
        assert!(matches!(
            Quote::validated("   ", "Wisdom"),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn test_validated_rejects_empty_category() {
        assert!(matches!(
            Quote::validated("hello", ""),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn test_seed_quotes_are_valid() {
        let seeds = seed_quotes();
        assert_eq!(seeds.len(), 3);
        for q in &seeds {
            assert!(Quote::validated(&q.text, &q.category).is_ok());
        }
    }
}
