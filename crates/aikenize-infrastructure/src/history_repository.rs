//! History repository over a key-value store.

use std::sync::Arc;

use aikenize_core::error::Result;
use aikenize_core::storage::KeyValueStore;
use aikenize_core::{HistoryRecord, HistoryRepository};
use async_trait::async_trait;

use crate::dto::HistoryRecordDto;

/// Storage key holding the serialized history array.
pub const HISTORY_KEY: &str = "aiken_history";

/// Persists the whole history log as one JSON array under a single key.
///
/// Removing the key (rather than writing `[]`) is how `clear` is expressed,
/// which keeps "never saved" distinguishable from "saved empty".
#[derive(Clone)]
pub struct KeyValueHistoryRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl KeyValueHistoryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, HISTORY_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }
}

#[async_trait]
impl HistoryRepository for KeyValueHistoryRepository {
    async fn load(&self) -> Result<Option<Vec<HistoryRecord>>> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(None);
        };

        let dtos: Vec<HistoryRecordDto> = serde_json::from_str(&raw)?;
        let records = dtos
            .into_iter()
            .map(HistoryRecord::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(records))
    }

    async fn save(&self, records: &[HistoryRecord]) -> Result<()> {
        let dtos: Vec<HistoryRecordDto> = records.iter().map(HistoryRecordDto::from).collect();
        let raw = serde_json::to_string(&dtos)?;
        self.store.set(&self.key, &raw).await
    }

    async fn remove(&self) -> Result<()> {
        self.store.remove(&self.key).await
    }
}
