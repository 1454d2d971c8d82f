//! Supported source languages.

use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Language of the snippet being translated.
///
/// Serialized as lowercase (`"typescript"`, `"python"`) both in persisted
/// history and on the command line.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SourceLanguage {
    #[default]
    TypeScript,
    Python,
}

impl SourceLanguage {
    /// Maps a file extension (with or without the leading dot) to a language.
    ///
    /// `py` maps to Python; `ts` and `js` map to TypeScript. Matching is
    /// case-insensitive. Anything else is unrecognized.
    pub fn from_extension(extension: &str) -> Option<Self> {
        let ext = extension.trim().trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "py" => Some(Self::Python),
            "ts" | "js" => Some(Self::TypeScript),
            _ => None,
        }
    }

    /// Extension of `path`, as a lossy string, if it has one.
    pub fn extension_of(path: &Path) -> Option<String> {
        path.extension()
            .map(|ext| ext.to_string_lossy().into_owned())
    }

    /// Human-readable name used in listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TypeScript => "TypeScript",
            Self::Python => "Python",
        }
    }
}
