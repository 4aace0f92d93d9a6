//! Category filtering and random quote selection.
//!
//! Selection is uniform over the filtered subsequence, never the full
//! sequence, and the `(category, index)` pair of the last shown quote is
//! remembered through a session-scoped collaborator so the view survives
//! a reload within the same session.

use std::collections::BTreeSet;

use rand::Rng;

use crate::domain::{Quote, Result, ViewState, ALL_CATEGORIES};
use crate::infrastructure::KvStore;

/// Session key holding the index of the last shown quote.
const LAST_INDEX_KEY: &str = "lastFilteredQuoteIndex";
/// Session key holding the category the index was recorded against.
const LAST_CATEGORY_KEY: &str = "lastFilteredCategory";

/// A quote picked from a filtered view, with where it was found.
#[derive(Debug, Clone)]
pub struct Selected {
    pub quote: Quote,
    /// Index within the filtered subsequence, not the full sequence.
    pub index: usize,
    pub category: String,
}

/// Unique categories currently in the store, lexicographic order.
/// The `"all"` sentinel is added at the CLI surface, not here.
#[must_use]
pub fn categories(quotes: &[Quote]) -> Vec<String> {
    quotes
        .iter()
        .map(|q| q.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The subsequence visible under `category`, preserving order.
/// `"all"` means no filter.
#[must_use]
pub fn filter_by_category<'a>(category: &str, quotes: &'a [Quote]) -> Vec<&'a Quote> {
    if category == ALL_CATEGORIES {
        quotes.iter().collect()
    } else {
        quotes.iter().filter(|q| q.category == category).collect()
    }
}

/// Restore the last shown quote from recorded view state.
///
/// The subsequence is recomputed against the current store, so an index
/// recorded before a mutation may be out of range; it clamps to 0 rather
/// than failing. An empty subsequence yields `None`.
#[must_use]
pub fn restore_from(state: &ViewState, quotes: &[Quote]) -> Option<Selected> {
    let candidates = filter_by_category(&state.last_shown_category, quotes);
    if candidates.is_empty() {
        return None;
    }

    let index = if state.last_shown_index < candidates.len() {
        state.last_shown_index
    } else {
        0
    };

    Some(Selected {
        quote: candidates[index].clone(),
        index,
        category: state.last_shown_category.clone(),
    })
}

/// Random quote selection with session-scoped memory of the last pick.
pub struct Selector {
    session: Box<dyn KvStore>,
}

impl Selector {
    #[must_use]
    pub fn new(session: Box<dyn KvStore>) -> Self {
        Self { session }
    }

    /// Pick a quote uniformly at random from the view under `category`
    /// and record the pick. `None` when the category has no quotes; the
    /// caller renders a placeholder instead of falling back to the
    /// unfiltered sequence.
    ///
    /// # Errors
    /// Returns error if recording to the session store fails.
    pub fn select(&self, category: &str, quotes: &[Quote]) -> Result<Option<Selected>> {
        let candidates = filter_by_category(category, quotes);
        if candidates.is_empty() {
            return Ok(None);
        }

        let index = rand::thread_rng().gen_range(0..candidates.len());
        self.record(category, index)?;

        Ok(Some(Selected {
            quote: candidates[index].clone(),
            index,
            category: category.to_string(),
        }))
    }

    /// Re-show the quote recorded by the last [`Self::select`] call in
    /// this session, clamping a stale index to 0.
    ///
    /// # Errors
    /// Returns error if the session store read fails.
    pub fn restore_last(&self, quotes: &[Quote]) -> Result<Option<Selected>> {
        Ok(restore_from(&self.view_state()?, quotes))
    }

    /// Read the recorded view state, defaulting when nothing was recorded
    /// this session.
    ///
    /// # Errors
    /// Returns error if the session store read fails.
    pub fn view_state(&self) -> Result<ViewState> {
        let mut state = ViewState::default();

        if let Some(category) = self.session.get(LAST_CATEGORY_KEY)? {
            state.last_shown_category = category;
        }
        if let Some(raw) = self.session.get(LAST_INDEX_KEY)? {
            state.last_shown_index = raw.parse().unwrap_or(0);
        }

        Ok(state)
    }

    fn record(&self, category: &str, index: usize) -> Result<()> {
        self.session.set(LAST_CATEGORY_KEY, category)?;
        self.session.set(LAST_INDEX_KEY, &index.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryKv;

    fn sample() -> Vec<Quote> {
        vec![
            Quote {
                text: "b-quote".into(),
                category: "B".into(),
            },
            Quote {
                text: "a-one".into(),
                category: "A".into(),
            },
            Quote {
                text: "a-two".into(),
                category: "A".into(),
            },
        ]
    }

    #[test]
    fn test_categories_sorted_and_deduped() {
        assert_eq!(categories(&sample()), vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_categories_empty_store() {
        assert!(categories(&[]).is_empty());
    }

    #[test]
    fn test_filter_all_returns_everything() {
        let quotes = sample();
        assert_eq!(filter_by_category(ALL_CATEGORIES, &quotes).len(), 3);
    }

    #[test]
    fn test_select_empty_category_is_explicit_empty() {
        let selector = Selector::new(Box::new(MemoryKv::new()));
        let quotes = sample();

        // Category with zero matches: empty outcome, never a pick from
        // the unfiltered set.
        let picked = selector.select("Nope", &quotes).unwrap();
        assert!(picked.is_none());
    }

    #[test]
    fn test_select_stays_within_subsequence() {
        let selector = Selector::new(Box::new(MemoryKv::new()));
        let quotes = sample();

        for _ in 0..20 {
            let picked = selector.select("A", &quotes).unwrap().unwrap();
            assert_eq!(picked.quote.category, "A");
            assert!(picked.index < 2);
        }
    }

    #[test]
    fn test_select_records_view_state() {
        let selector = Selector::new(Box::new(MemoryKv::new()));
        let quotes = sample();

        let picked = selector.select("A", &quotes).unwrap().unwrap();
        let state = selector.view_state().unwrap();

        assert_eq!(state.last_shown_category, "A");
        assert_eq!(state.last_shown_index, picked.index);
    }

    #[test]
    fn test_restore_clamps_stale_index() {
        let state = ViewState {
            last_shown_category: "A".into(),
            last_shown_index: 99,
            ..Default::default()
        };

        let restored = restore_from(&state, &sample()).unwrap();
        assert_eq!(restored.index, 0);
        assert_eq!(restored.quote.text, "a-one");
    }

    #[test]
    fn test_restore_empty_subsequence() {
        let state = ViewState {
            last_shown_category: "Gone".into(),
            last_shown_index: 0,
            ..Default::default()
        };

        assert!(restore_from(&state, &sample()).is_none());
    }

    #[test]
    fn test_restore_roundtrip_through_session() {
        let selector = Selector::new(Box::new(MemoryKv::new()));
        let quotes = sample();

        let picked = selector.select("A", &quotes).unwrap().unwrap();
        let restored = selector.restore_last(&quotes).unwrap().unwrap();

        assert_eq!(restored.quote, picked.quote);
        assert_eq!(restored.index, picked.index);
    }
}
