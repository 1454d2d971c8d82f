use aikenize_core::{SourceLanguage, TranslationResult};
use std::fmt;

/// Mutable fields of the session, guarded by the controller.
#[derive(Debug, Clone)]
pub(crate) struct SessionState {
    pub(crate) language: SourceLanguage,
    pub(crate) snippet: String,
    pub(crate) result: Option<TranslationResult>,
}

/// Point-in-time copy of the session for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub language: SourceLanguage,
    pub snippet: String,
    pub result: Option<TranslationResult>,
    pub is_translating: bool,
}

/// What happened to a submit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The client was called and its result is now current.
    ///
    /// `recorded` is true when a history record was appended and persisted.
    Completed {
        result: TranslationResult,
        recorded: bool,
    },
    /// Nothing was sent.
    Rejected(RejectReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The snippet is empty or whitespace only.
    BlankSnippet,
    /// Another translation is still in flight.
    AlreadyTranslating,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::BlankSnippet => write!(f, "the snippet is empty"),
            RejectReason::AlreadyTranslating => write!(f, "a translation is already running"),
        }
    }
}
