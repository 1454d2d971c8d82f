//! Remote model integrations.
//!
//! Everything that talks to the Gemini API lives here; the rest of the
//! workspace only sees [`aikenize_core::TranslationClient`].

pub mod error;
pub mod gemini_api_client;
pub mod prompt;

pub use error::TranslationError;
pub use gemini_api_client::GeminiApiClient;
