//! History record DTO.
//!
//! The persisted shape is the browser editor's `aiken_history` array:
//!
//! ```json
//! [{
//!   "id": "k3j9x0a1b",
//!   "timestamp": 1717171717171,
//!   "sourceLanguage": "typescript",
//!   "sourceCode": "...",
//!   "result": { "aikenCode": "...", "explanation": "...", "errors": "..." }
//! }]
//! ```

use aikenize_core::error::{AikenizeError, Result};
use aikenize_core::{HistoryRecord, SourceLanguage, TranslationResult};
use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResultDto {
    pub aiken_code: String,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecordDto {
    pub id: String,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    pub source_language: SourceLanguage,
    pub source_code: String,
    pub result: TranslationResultDto,
}

impl From<&TranslationResult> for TranslationResultDto {
    fn from(result: &TranslationResult) -> Self {
        Self {
            aiken_code: result.translated_code.clone(),
            explanation: result.explanation.clone(),
            errors: result.errors.clone(),
        }
    }
}

impl From<TranslationResultDto> for TranslationResult {
    fn from(dto: TranslationResultDto) -> Self {
        Self {
            translated_code: dto.aiken_code,
            explanation: dto.explanation,
            errors: dto.errors,
        }
    }
}

impl From<&HistoryRecord> for HistoryRecordDto {
    fn from(record: &HistoryRecord) -> Self {
        Self {
            id: record.id.clone(),
            timestamp: record.created_at.timestamp_millis(),
            source_language: record.source_language,
            source_code: record.snippet.clone(),
            result: TranslationResultDto::from(&record.result),
        }
    }
}

impl TryFrom<HistoryRecordDto> for HistoryRecord {
    type Error = AikenizeError;

    fn try_from(dto: HistoryRecordDto) -> Result<Self> {
        let created_at = Utc
            .timestamp_millis_opt(dto.timestamp)
            .single()
            .ok_or_else(|| {
                AikenizeError::json(format!(
                    "History record '{}' has an out-of-range timestamp {}",
                    dto.id, dto.timestamp
                ))
            })?;

        Ok(Self {
            id: dto.id,
            created_at,
            source_language: dto.source_language,
            snippet: dto.source_code,
            result: dto.result.into(),
        })
    }
}
