//! Failures of a single translation attempt.

use thiserror::Error;

/// Why a translation attempt produced no usable result.
///
/// These never leave the client: `translate` renders them into the
/// `errors` field of a failed [`aikenize_core::TranslationResult`], so the
/// messages are written for the person at the editor.
#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("Failed to build the prompt: {0}")]
    Prompt(String),

    #[error("Gemini API request failed: {0}")]
    Transport(String),

    #[error("Gemini API request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Gemini API returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("No response from model")]
    EmptyResponse,

    #[error("Model response did not match the expected format: {0}")]
    InvalidPayload(String),
}

impl From<minijinja::Error> for TranslationError {
    fn from(err: minijinja::Error) -> Self {
        Self::Prompt(err.to_string())
    }
}
