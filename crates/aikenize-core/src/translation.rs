//! Translation contract between the session and the remote model.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::language::SourceLanguage;

/// Normalized outcome of one translation attempt.
///
/// A successful response carries code and an explanation. A failed one has
/// empty `translated_code` and `explanation` and a human-readable `errors`.
/// The model may also return code together with `errors` (mapping caveats),
/// so callers decide what to display through [`TranslationResult::has_code`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translated_code: String,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<String>,
}

impl TranslationResult {
    pub fn success(translated_code: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            translated_code: translated_code.into(),
            explanation: explanation.into(),
            errors: None,
        }
    }

    /// Result for a failed attempt: nothing to display, only the message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            translated_code: String::new(),
            explanation: String::new(),
            errors: Some(message.into()),
        }
    }

    pub fn with_errors(mut self, errors: impl Into<String>) -> Self {
        self.errors = Some(errors.into());
        self
    }

    /// True when there is translated code to display (and to record).
    pub fn has_code(&self) -> bool {
        !self.translated_code.is_empty()
    }
}

/// Client that turns a snippet into Aiken code.
///
/// Implementations must always resolve: transport errors, timeouts and
/// malformed responses are reported through [`TranslationResult::failure`],
/// never as a panic or an `Err`. One call performs at most one outbound
/// request.
#[async_trait]
pub trait TranslationClient: Send + Sync {
    async fn translate(&self, snippet: &str, language: SourceLanguage) -> TranslationResult;
}
