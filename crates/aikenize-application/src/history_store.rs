//! In-memory history log with an explicit persistence step.

use std::sync::Arc;

use aikenize_core::error::Result;
use aikenize_core::history::seed_history;
use aikenize_core::{HistoryLog, HistoryRecord, HistoryRepository};
use chrono::Utc;

/// The history log the session works with, kept in step with storage.
///
/// Every mutation first computes the new log, then persists it, then commits
/// it in memory. When a call returns `Ok`, memory and storage agree; when it
/// returns `Err`, memory is unchanged.
pub struct HistoryStore {
    repository: Arc<dyn HistoryRepository>,
    log: HistoryLog,
    seed_on_empty: bool,
}

impl HistoryStore {
    /// Loads the persisted log.
    ///
    /// Nothing persisted, or a value that cannot be read, yields the seed
    /// dataset (or an empty log when `seed_on_empty` is false). The seed is
    /// not written back; it is replaced by the first real record.
    pub async fn load(repository: Arc<dyn HistoryRepository>, seed_on_empty: bool) -> Self {
        let log = match repository.load().await {
            Ok(Some(records)) => {
                tracing::info!("[HistoryStore] Loaded {} history record(s)", records.len());
                HistoryLog::from_records(records)
            }
            Ok(None) => {
                tracing::debug!("[HistoryStore] No persisted history");
                Self::initial_log(seed_on_empty)
            }
            Err(e) => {
                tracing::warn!("[HistoryStore] Discarding unreadable history: {}", e);
                Self::initial_log(seed_on_empty)
            }
        };

        Self {
            repository,
            log,
            seed_on_empty,
        }
    }

    fn initial_log(seed_on_empty: bool) -> HistoryLog {
        if seed_on_empty {
            seed_history(Utc::now())
        } else {
            HistoryLog::new()
        }
    }

    /// Prepends `record`, dropping the oldest entry past the bound.
    pub async fn append(&mut self, record: HistoryRecord) -> Result<()> {
        let next = self.log.with_prepended(record);

        if let Err(e) = self.repository.save(next.records()).await {
            tracing::error!("[HistoryStore] Failed to persist history: {}", e);
            return Err(e);
        }

        self.log = next;
        Ok(())
    }

    /// Removes the persisted log and empties the in-memory one.
    pub async fn clear(&mut self) -> Result<()> {
        if let Err(e) = self.repository.remove().await {
            tracing::error!("[HistoryStore] Failed to clear history: {}", e);
            return Err(e);
        }

        self.log.clear();
        tracing::info!("[HistoryStore] History cleared");
        Ok(())
    }

    pub fn records(&self) -> &[HistoryRecord] {
        self.log.records()
    }

    /// Record at `index` (0 is the newest).
    pub fn get(&self, index: usize) -> Option<&HistoryRecord> {
        self.log.get(index)
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Whether an empty or unreadable store is shown as the seed dataset.
    pub fn seeds_on_empty(&self) -> bool {
        self.seed_on_empty
    }
}
