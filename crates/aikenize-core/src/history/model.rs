//! History domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::language::SourceLanguage;
use crate::translation::TranslationResult;

/// One past successful translation.
///
/// Records are immutable once created; the log only ever prepends or drops
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Unique record identifier (UUID format for new records)
    pub id: String,
    /// When the translation completed
    pub created_at: DateTime<Utc>,
    pub source_language: SourceLanguage,
    /// The snippet as it was when the translation was submitted
    pub snippet: String,
    pub result: TranslationResult,
}

impl HistoryRecord {
    /// Creates a record with a fresh id, stamped now.
    pub fn new(
        source_language: SourceLanguage,
        snippet: impl Into<String>,
        result: TranslationResult,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            source_language,
            snippet: snippet.into(),
            result,
        }
    }
}

/// Newest-first, bounded list of history records.
///
/// Order is insertion order: `prepend` always puts the record at index 0,
/// whatever its `created_at` says.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryLog {
    records: Vec<HistoryRecord>,
}

impl HistoryLog {
    /// Maximum number of records kept.
    pub const MAX_ENTRIES: usize = 50;

    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a log from newest-first records, dropping anything past the bound.
    pub fn from_records(mut records: Vec<HistoryRecord>) -> Self {
        records.truncate(Self::MAX_ENTRIES);
        Self { records }
    }

    /// Inserts `record` as the newest entry and evicts the oldest beyond the bound.
    pub fn prepend(&mut self, record: HistoryRecord) {
        self.records.insert(0, record);
        self.records.truncate(Self::MAX_ENTRIES);
    }

    /// Copy of this log with `record` prepended; `self` is left untouched.
    pub fn with_prepended(&self, record: HistoryRecord) -> Self {
        let mut next = self.clone();
        next.prepend(record);
        next
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&HistoryRecord> {
        self.records.get(index)
    }

    pub fn newest(&self) -> Option<&HistoryRecord> {
        self.records.first()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
