//! Storage representations of domain models.
//!
//! DTOs keep the on-disk shape stable and independent of the domain
//! structs; conversions validate what comes back from storage.

pub mod history;

pub use history::{HistoryRecordDto, TranslationResultDto};
