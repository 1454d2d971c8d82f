//! History repository trait.

use async_trait::async_trait;

use super::model::HistoryRecord;
use crate::error::Result;

/// Durable storage for the history log.
///
/// The repository only moves whole logs in and out of storage; bounding and
/// ordering are the log's concern.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Reads the persisted log.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(records))`: A log was persisted (possibly empty)
    /// - `Ok(None)`: Nothing has been persisted
    /// - `Err(_)`: The persisted value could not be read or parsed
    async fn load(&self) -> Result<Option<Vec<HistoryRecord>>>;

    /// Replaces the persisted log with `records` (newest first).
    async fn save(&self, records: &[HistoryRecord]) -> Result<()>;

    /// Removes the persisted log entirely, so that the next `load` returns `Ok(None)`.
    async fn remove(&self) -> Result<()>;
}
