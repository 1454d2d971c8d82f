//! Naming of exported contract files.

use chrono::{DateTime, Utc};

/// Extension of exported Aiken sources.
pub const EXPORT_EXTENSION: &str = "ak";

/// File name for code exported at `at`: `contract_<unix-millis>.ak`.
pub fn export_file_name(at: DateTime<Utc>) -> String {
    format!("contract_{}.{}", at.timestamp_millis(), EXPORT_EXTENSION)
}
