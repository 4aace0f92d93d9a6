//! The quote store.
//!
//! Owns the in-memory quote sequence and keeps it persisted through a
//! key-value collaborator. A fresh store seeds itself with three built-in
//! quotes and writes them back immediately.

use crate::domain::{seed_quotes, AppError, Quote, Result, ALL_CATEGORIES};
use crate::infrastructure::KvStore;

/// Persistent key holding the serialized quote sequence.
const QUOTES_KEY: &str = "quotes";
/// Persistent key holding the user's last chosen category filter.
const LAST_SELECTED_KEY: &str = "lastSelectedCategory";

/// In-memory quote sequence backed by a persistent key-value store.
pub struct QuoteStore {
    kv: Box<dyn KvStore>,
    quotes: Vec<Quote>,
}

impl QuoteStore {
    /// Load the store, seeding the built-in quotes when nothing is
    /// persisted yet.
    ///
    /// # Errors
    /// Returns [`AppError::InvalidData`] when persisted bytes exist but do
    /// not deserialize. That case is surfaced rather than treated as
    /// absent, so corrupted data is never silently reseeded over.
    pub fn open(kv: Box<dyn KvStore>) -> Result<Self> {
        let quotes = match kv.get(QUOTES_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| AppError::InvalidData {
                message: format!("Persisted quotes are corrupted: {e}"),
            })?,
            None => {
                let seeds = seed_quotes();
                let raw = serde_json::to_string(&seeds).map_err(|e| AppError::InvalidData {
                    message: format!("Failed to serialize seed quotes: {e}"),
                })?;
                kv.set(QUOTES_KEY, &raw)?;
                tracing::info!(count = seeds.len(), "Seeded built-in quotes");
                seeds
            }
        };

        Ok(Self { kv, quotes })
    }

    /// The current quote sequence, insertion order preserved.
    #[must_use]
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Mutable access for import and merge operations. The caller is
    /// responsible for calling [`Self::persist`] afterwards.
    pub fn quotes_mut(&mut self) -> &mut Vec<Quote> {
        &mut self.quotes
    }

    /// Validate, append and persist a new quote.
    ///
    /// # Errors
    /// Returns [`AppError::Validation`] when either field is empty after
    /// trimming; the store is untouched in that case.
    pub fn add(&mut self, text: &str, category: &str) -> Result<Quote> {
        let quote = Quote::validated(text, category)?;
        self.quotes.push(quote.clone());
        self.persist()?;
        Ok(quote)
    }

    /// Serialize and persist the whole sequence. Idempotent, safe to call
    /// after every mutation.
    ///
    /// # Errors
    /// Returns error if the key-value store rejects the write.
    pub fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.quotes).map_err(|e| AppError::InvalidData {
            message: format!("Failed to serialize quotes: {e}"),
        })?;
        self.kv.set(QUOTES_KEY, &raw)
    }

    /// The category filter the user last chose, `"all"` when never set.
    ///
    /// # Errors
    /// Returns error if the key-value store read fails.
    pub fn last_selected_category(&self) -> Result<String> {
        Ok(self
            .kv
            .get(LAST_SELECTED_KEY)?
            .unwrap_or_else(|| ALL_CATEGORIES.to_string()))
    }

    /// Remember the category filter across restarts.
    ///
    /// # Errors
    /// Returns error if the key-value store write fails.
    pub fn set_last_selected_category(&self, category: &str) -> Result<()> {
        self.kv.set(LAST_SELECTED_KEY, category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{MemoryKv, SqliteKv};
    use tempfile::tempdir;

    #[test]
    fn test_seed_on_empty_store() {
        let store = QuoteStore::open(Box::new(MemoryKv::new())).unwrap();
        assert_eq!(store.quotes().len(), 3);
        assert_eq!(store.quotes()[0].category, "Motivation");
    }

    #[test]
    fn test_seed_idempotence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("quotes.db");

        let first = {
            let kv = SqliteKv::open(&path).unwrap();
            let store = QuoteStore::open(Box::new(kv)).unwrap();
            store.quotes().to_vec()
        };

        // Second open must load the persisted seeds, not reseed.
        let kv = SqliteKv::open(&path).unwrap();
        let store = QuoteStore::open(Box::new(kv)).unwrap();

        assert_eq!(store.quotes(), first.as_slice());
        assert_eq!(store.quotes().len(), 3);
    }

    #[test]
    fn test_add_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("quotes.db");

        {
            let kv = SqliteKv::open(&path).unwrap();
            let mut store = QuoteStore::open(Box::new(kv)).unwrap();
            store.add("Stay hungry.", "Motivation").unwrap();
        }

        let kv = SqliteKv::open(&path).unwrap();
        let store = QuoteStore::open(Box::new(kv)).unwrap();
        assert_eq!(store.quotes().len(), 4);
        assert_eq!(store.quotes()[3].text, "Stay hungry.");
    }

    #[test]
    fn test_add_rejects_empty_fields() {
        let mut store = QuoteStore::open(Box::new(MemoryKv::new())).unwrap();

        assert!(matches!(
            store.add("  ", "Motivation"),
            Err(AppError::Validation { .. })
        ));
        assert!(matches!(
            store.add("text", "   "),
            Err(AppError::Validation { .. })
        ));
        // Failed adds never mutate
        assert_eq!(store.quotes().len(), 3);
    }

    #[test]
    fn test_corrupted_quotes_surface_error() {
        let kv = MemoryKv::new();
        kv.set("quotes", "not json at all").unwrap();

        assert!(matches!(
            QuoteStore::open(Box::new(kv)),
            Err(AppError::InvalidData { .. })
        ));
    }

    #[test]
    fn test_last_selected_category_defaults_to_all() {
        let store = QuoteStore::open(Box::new(MemoryKv::new())).unwrap();
        assert_eq!(store.last_selected_category().unwrap(), ALL_CATEGORIES);

        store.set_last_selected_category("Life").unwrap();
        assert_eq!(store.last_selected_category().unwrap(), "Life");
    }
}
