//! Clipboard implementations.

use std::sync::{Arc, Mutex};

use aikenize_core::clipboard::Clipboard;
use aikenize_core::error::{AikenizeError, Result};

/// System clipboard backed by `cli-clipboard`.
#[cfg(feature = "system-clipboard")]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

#[cfg(feature = "system-clipboard")]
impl Clipboard for SystemClipboard {
    fn read_text(&self) -> Result<String> {
        use cli_clipboard::{ClipboardContext, ClipboardProvider};

        ClipboardContext::new()
            .and_then(|mut ctx| ctx.get_contents())
            .map_err(|e| AikenizeError::clipboard(e.to_string()))
    }

    fn write_text(&self, text: &str) -> Result<()> {
        use cli_clipboard::{ClipboardContext, ClipboardProvider};

        ClipboardContext::new()
            .and_then(|mut ctx| ctx.set_contents(text.to_string()))
            .map_err(|e| AikenizeError::clipboard(e.to_string()))
    }
}

/// Clipboard used when the binary was built without clipboard support.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableClipboard;

impl Clipboard for UnavailableClipboard {
    fn read_text(&self) -> Result<String> {
        Err(unavailable())
    }

    fn write_text(&self, _text: &str) -> Result<()> {
        Err(unavailable())
    }
}

fn unavailable() -> AikenizeError {
    AikenizeError::clipboard("clipboard support is not enabled (build with the `system-clipboard` feature)")
}

/// Process-local clipboard.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<String>,
}

impl MemoryClipboard {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(text.into()),
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn read_text(&self) -> Result<String> {
        self.contents
            .lock()
            .map(|contents| contents.clone())
            .map_err(|e| AikenizeError::clipboard(e.to_string()))
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|e| AikenizeError::clipboard(e.to_string()))?;
        *contents = text.to_string();
        Ok(())
    }
}

/// The clipboard this build supports.
pub fn default_clipboard() -> Arc<dyn Clipboard> {
    #[cfg(feature = "system-clipboard")]
    {
        Arc::new(SystemClipboard)
    }
    #[cfg(not(feature = "system-clipboard"))]
    {
        Arc::new(UnavailableClipboard)
    }
}
