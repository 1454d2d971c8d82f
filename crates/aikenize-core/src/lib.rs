//! Domain layer for aikenize.
//!
//! Pure types and the traits the outer layers implement: the translation
//! client, history and key-value storage, and the clipboard.

pub mod clipboard;
pub mod config;
pub mod error;
pub mod export;
pub mod history;
pub mod language;
pub mod storage;
pub mod template;
pub mod translation;

// Re-export common types
pub use error::AikenizeError;
pub use history::{HistoryLog, HistoryRecord, HistoryRepository};
pub use language::SourceLanguage;
pub use translation::{TranslationClient, TranslationResult};
