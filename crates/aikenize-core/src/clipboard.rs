//! Clipboard collaborator.

use crate::error::Result;

/// Text clipboard used by paste and copy.
///
/// Failures are reported as [`crate::AikenizeError::Clipboard`]; callers
/// log them and leave the session untouched.
pub trait Clipboard: Send + Sync {
    fn read_text(&self) -> Result<String>;

    fn write_text(&self, text: &str) -> Result<()>;
}
