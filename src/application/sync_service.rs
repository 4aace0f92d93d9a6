//! Reconciliation between the local store and the remote service.
//!
//! Each cycle pulls the remote collection, merges it into the local store
//! with a last-writer-wins-by-text policy (remote wins on conflict), then
//! pushes the entire post-merge list back. A failed pull aborts the cycle
//! before any mutation; a failed push is reported but the merge stands.

use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::time::MissedTickBehavior;

use crate::domain::{Quote, Result, SyncReport};
use crate::infrastructure::{QuoteRemote, RemoteRecord};

use super::formatter;
use super::store::QuoteStore;

/// What a merge did to the local sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeStats {
    /// Remote quotes appended (no local text match).
    pub added: usize,
    /// Local quotes overwritten in place.
    pub replaced: usize,
}

impl MergeStats {
    /// True when the merge mutated the sequence.
    #[must_use]
    pub const fn dirty(&self) -> bool {
        self.added + self.replaced > 0
    }
}

/// Default remote-to-local mapping: the record title becomes the text,
/// everything lands in a fixed "Server" category. Total and deterministic.
#[must_use]
pub fn map_record(record: &RemoteRecord) -> Quote {
    Quote {
        text: record.title.clone(),
        category: "Server".to_string(),
    }
}

/// Merge mapped remote quotes into the local sequence.
///
/// For each remote quote: no local quote with the same text means append;
/// a text match with different content means replace in place at the same
/// position. Matching is by text only, comparison is field-by-field, so a
/// local category edit under an unchanged text is overwritten by remote.
pub fn merge_remote(local: &mut Vec<Quote>, remote: Vec<Quote>) -> MergeStats {
    let mut stats = MergeStats::default();

    for sq in remote {
        match local.iter().position(|q| q.text == sq.text) {
            None => {
                local.push(sq);
                stats.added += 1;
            }
            Some(i) if local[i] != sq => {
                local[i] = sq;
                stats.replaced += 1;
            }
            Some(_) => {}
        }
    }

    stats
}

/// Service running reconcile cycles against a remote collaborator.
pub struct SyncService<R: QuoteRemote> {
    store: tokio::sync::Mutex<QuoteStore>,
    remote: R,
    mapper: fn(&RemoteRecord) -> Quote,
    // Single-flight guard: a tick that fires while a cycle's network round
    // trip is still pending skips instead of interleaving pull and push.
    cycle: tokio::sync::Mutex<()>,
}

impl<R: QuoteRemote> SyncService<R> {
    /// Create a sync service with the default record mapper.
    #[must_use]
    pub fn new(store: QuoteStore, remote: R) -> Self {
        Self::with_mapper(store, remote, map_record)
    }

    /// Create a sync service with a custom remote-to-local mapping.
    #[must_use]
    pub fn with_mapper(store: QuoteStore, remote: R, mapper: fn(&RemoteRecord) -> Quote) -> Self {
        Self {
            store: tokio::sync::Mutex::new(store),
            remote,
            mapper,
            cycle: tokio::sync::Mutex::new(()),
        }
    }

    /// Run one reconcile cycle: pull, merge, persist if dirty, push.
    ///
    /// # Errors
    /// Returns [`crate::domain::AppError::Network`] when the pull fails; the
    /// store is untouched and the push phase never runs. A push failure is
    /// reported inside the returned [`SyncReport`] instead, because the
    /// pulled merge has already been committed.
    pub async fn sync(&self) -> Result<SyncReport> {
        let Ok(_guard) = self.cycle.try_lock() else {
            tracing::debug!("Previous sync cycle still in flight, skipping");
            return Ok(SyncReport::skipped());
        };

        let start = Instant::now();

        // Pull phase: any failure here aborts before the store is touched.
        let records = self.remote.fetch().await?;
        let mapped: Vec<Quote> = records.iter().map(self.mapper).collect();

        let mut store = self.store.lock().await;
        let stats = merge_remote(store.quotes_mut(), mapped);

        if stats.dirty() {
            store.persist()?;
        }

        // Push phase: the whole post-merge list, wholesale. The remote's
        // acknowledgement is observed, never merged back.
        let push_error = match self.remote.push(store.quotes()).await {
            Ok(ack) => {
                tracing::debug!(ack = %ack, "Push acknowledged");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Push failed; pulled changes stand");
                Some(e.to_string())
            }
        };

        tracing::info!(
            added = stats.added,
            replaced = stats.replaced,
            pushed = push_error.is_none(),
            duration_ms = start.elapsed().as_millis(),
            "Sync cycle completed"
        );

        Ok(SyncReport {
            added: stats.added,
            replaced: stats.replaced,
            dirty: stats.dirty(),
            pushed: push_error.is_none(),
            push_error,
            skipped: false,
            completed_at: Some(Utc::now()),
        })
    }

    /// Run reconcile cycles on a fixed interval until Ctrl-C.
    ///
    /// The first cycle runs immediately; missed ticks are skipped rather
    /// than bursted.
    ///
    /// # Errors
    /// Currently infallible at the loop level; individual cycle failures
    /// are reported and the loop keeps going.
    pub async fn watch(&self, interval_secs: u64) -> Result<()> {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(interval_secs, "Watching remote for changes (Ctrl-C to stop)");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.sync().await {
                        Ok(report) => formatter::notify_report(&report),
                        Err(e) => formatter::notify_sync_failure(&e),
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutting down watch loop");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Snapshot of the current local sequence.
    pub async fn quotes(&self) -> Vec<Quote> {
        self.store.lock().await.quotes().to_vec()
    }
}
