//! File and clipboard actions around the session.
//!
//! Paste, copy, import and export. Failures are logged and returned; the
//! session is only touched once the outside world has answered.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use aikenize_core::clipboard::Clipboard;
use aikenize_core::error::{AikenizeError, Result};
use aikenize_core::export::export_file_name;
use aikenize_core::{HistoryRecord, SourceLanguage};
use chrono::{DateTime, Duration, Utc};
use tokio::io::AsyncWriteExt;

use crate::session::SessionController;

pub struct WorkbenchIo {
    session: Arc<SessionController>,
    clipboard: Arc<dyn Clipboard>,
}

impl WorkbenchIo {
    pub fn new(session: Arc<SessionController>, clipboard: Arc<dyn Clipboard>) -> Self {
        Self { session, clipboard }
    }

    /// Replaces the snippet with the clipboard text.
    ///
    /// Returns `Ok(false)` and leaves the snippet alone when the clipboard
    /// holds no text.
    pub async fn paste(&self) -> Result<bool> {
        let clipboard = self.clipboard.clone();
        let text = run_blocking(move || clipboard.read_text())
            .await
            .inspect_err(|e| tracing::warn!("[WorkbenchIo] Paste failed: {}", e))?;

        if text.is_empty() {
            return Ok(false);
        }
        self.session.set_snippet(text).await;
        Ok(true)
    }

    /// Copies the current translated code. `Ok(false)` when there is none.
    pub async fn copy(&self) -> Result<bool> {
        let Some(code) = self.session.current_code().await else {
            return Ok(false);
        };

        let clipboard = self.clipboard.clone();
        run_blocking(move || clipboard.write_text(&code))
            .await
            .inspect_err(|e| tracing::warn!("[WorkbenchIo] Copy failed: {}", e))?;
        Ok(true)
    }

    /// Loads a source file into the editor; its extension picks the language
    /// when recognized. Returns the language now in effect.
    pub async fn import_file(&self, path: &Path) -> Result<SourceLanguage> {
        self.import_file_as(path, None).await
    }

    /// Like [`WorkbenchIo::import_file`], but `language` wins over the
    /// extension when given.
    pub async fn import_file_as(
        &self,
        path: &Path,
        language: Option<SourceLanguage>,
    ) -> Result<SourceLanguage> {
        let text = tokio::fs::read_to_string(path).await.map_err(|e| {
            tracing::warn!("[WorkbenchIo] Import of {} failed: {}", path.display(), e);
            AikenizeError::io(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let language = match language {
            Some(language) => {
                self.session.change_language(language).await;
                self.session.set_snippet(text).await;
                language
            }
            None => {
                let extension = SourceLanguage::extension_of(path);
                self.session
                    .import_snippet(text, extension.as_deref())
                    .await
            }
        };
        tracing::info!("[WorkbenchIo] Imported {} as {}", path.display(), language);
        Ok(language)
    }

    /// Writes the current translated code into `dir`.
    ///
    /// Returns the written path, or `None` when there is no code to export.
    pub async fn export(&self, dir: &Path) -> Result<Option<PathBuf>> {
        let Some(code) = self.session.current_code().await else {
            return Ok(None);
        };
        export_code(dir, &code).await.map(Some)
    }
}

/// Writes the code of a history record into `dir`. `None` when it has no code.
pub async fn export_record(dir: &Path, record: &HistoryRecord) -> Result<Option<PathBuf>> {
    if !record.result.has_code() {
        return Ok(None);
    }
    export_code(dir, &record.result.translated_code)
        .await
        .map(Some)
}

/// Later names tried when `contract_<millis>.ak` is already taken.
const MAX_EXPORT_ATTEMPTS: i64 = 100;

async fn export_code(dir: &Path, code: &str) -> Result<PathBuf> {
    export_code_at(dir, code, Utc::now()).await
}

/// Writes `code` to a new file named after `at`, never replacing an existing
/// one: a taken name moves on to the next millisecond.
async fn export_code_at(dir: &Path, code: &str, at: DateTime<Utc>) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| export_failed(dir, e))?;

    for offset in 0..MAX_EXPORT_ATTEMPTS {
        let path = dir.join(export_file_name(at + Duration::milliseconds(offset)));
        match write_new_file(&path, code).await {
            Ok(()) => {
                tracing::info!("[WorkbenchIo] Exported {} bytes to {}", code.len(), path.display());
                return Ok(path);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(export_failed(&path, e)),
        }
    }

    Err(AikenizeError::io(format!(
        "No free contract file name in {}",
        dir.display()
    )))
}

async fn write_new_file(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    file.write_all(contents.as_bytes()).await?;
    file.flush().await
}

fn export_failed(path: &Path, e: std::io::Error) -> AikenizeError {
    tracing::warn!("[WorkbenchIo] Export to {} failed: {}", path.display(), e);
    AikenizeError::io(format!("Failed to write {}: {}", path.display(), e))
}

async fn run_blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AikenizeError::internal(format!("Clipboard task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history_store::HistoryStore;
    use aikenize_core::{TranslationClient, TranslationResult};
    use aikenize_infrastructure::{
        InMemoryStore, KeyValueHistoryRepository, MemoryClipboard, UnavailableClipboard,
    };
    use async_trait::async_trait;
    use chrono::TimeZone;
    use tempfile::TempDir;

    struct FixedClient(TranslationResult);

    #[async_trait]
    impl TranslationClient for FixedClient {
        async fn translate(&self, _snippet: &str, _language: SourceLanguage) -> TranslationResult {
            self.0.clone()
        }
    }

    async fn session(result: TranslationResult) -> Arc<SessionController> {
        let repository = Arc::new(KeyValueHistoryRepository::new(Arc::new(InMemoryStore::new())));
        let history = HistoryStore::load(repository, false).await;
        Arc::new(SessionController::new(Arc::new(FixedClient(result)), history))
    }

    #[tokio::test]
    async fn test_paste_replaces_snippet() {
        let session = session(TranslationResult::default()).await;
        let io = WorkbenchIo::new(session.clone(), Arc::new(MemoryClipboard::with_text("x = 1")));

        assert!(io.paste().await.unwrap());
        assert_eq!(session.snapshot().await.snippet, "x = 1");
    }

    #[tokio::test]
    async fn test_paste_of_empty_clipboard_keeps_snippet() {
        let session = session(TranslationResult::default()).await;
        let before = session.snapshot().await.snippet;
        let io = WorkbenchIo::new(session.clone(), Arc::new(MemoryClipboard::default()));

        assert!(!io.paste().await.unwrap());
        assert_eq!(session.snapshot().await.snippet, before);
    }

    #[tokio::test]
    async fn test_unavailable_clipboard_leaves_session_untouched() {
        let session = session(TranslationResult::default()).await;
        let before = session.snapshot().await;
        let io = WorkbenchIo::new(session.clone(), Arc::new(UnavailableClipboard));

        assert!(io.paste().await.is_err());
        assert_eq!(session.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_copy_only_with_code() {
        let clipboard = Arc::new(MemoryClipboard::default());
        let session = session(TranslationResult::success("validator {}", "ok")).await;
        let io = WorkbenchIo::new(session.clone(), clipboard.clone());

        assert!(!io.copy().await.unwrap());

        session.submit().await;
        assert!(io.copy().await.unwrap());
        assert_eq!(clipboard.read_text().unwrap(), "validator {}");
    }

    #[tokio::test]
    async fn test_import_file_uses_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contract.py");
        std::fs::write(&path, "def validate(): return True").unwrap();

        let session = session(TranslationResult::default()).await;
        let io = WorkbenchIo::new(session.clone(), Arc::new(MemoryClipboard::default()));

        let language = io.import_file(&path).await.unwrap();

        assert_eq!(language, SourceLanguage::Python);
        assert_eq!(session.snapshot().await.snippet, "def validate(): return True");
    }

    #[tokio::test]
    async fn test_import_with_explicit_language_ignores_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("snippet.txt");
        std::fs::write(&path, "x = 1").unwrap();

        let session = session(TranslationResult::default()).await;
        let io = WorkbenchIo::new(session.clone(), Arc::new(MemoryClipboard::default()));

        let language = io
            .import_file_as(&path, Some(SourceLanguage::Python))
            .await
            .unwrap();

        let snapshot = session.snapshot().await;
        assert_eq!(language, SourceLanguage::Python);
        assert_eq!(snapshot.language, SourceLanguage::Python);
        assert_eq!(snapshot.snippet, "x = 1");
    }

    #[tokio::test]
    async fn test_import_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let session = session(TranslationResult::default()).await;
        let before = session.snapshot().await;
        let io = WorkbenchIo::new(session.clone(), Arc::new(MemoryClipboard::default()));

        assert!(io.import_file(&temp_dir.path().join("nope.ts")).await.is_err());
        assert_eq!(session.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_export_writes_contract_file() {
        let temp_dir = TempDir::new().unwrap();
        let out_dir = temp_dir.path().join("out");
        let session = session(TranslationResult::success("validator {}", "ok")).await;
        let io = WorkbenchIo::new(session.clone(), Arc::new(MemoryClipboard::default()));

        assert!(io.export(&out_dir).await.unwrap().is_none());

        session.submit().await;
        let path = io.export(&out_dir).await.unwrap().unwrap();

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("contract_"));
        assert!(name.ends_with(".ak"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "validator {}");
    }

    #[tokio::test]
    async fn test_export_record_without_code_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let record = HistoryRecord::new(
            SourceLanguage::TypeScript,
            "const a = 1;",
            TranslationResult::failure("boom"),
        );

        assert!(export_record(temp_dir.path(), &record).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_export_in_same_millisecond_keeps_both_files() {
        let temp_dir = TempDir::new().unwrap();
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();

        let first = export_code_at(temp_dir.path(), "validator a {}", at)
            .await
            .unwrap();
        let second = export_code_at(temp_dir.path(), "validator b {}", at)
            .await
            .unwrap();

        assert_eq!(first, temp_dir.path().join("contract_1700000000123.ak"));
        assert_eq!(second, temp_dir.path().join("contract_1700000000124.ak"));
        assert_eq!(std::fs::read_to_string(&first).unwrap(), "validator a {}");
        assert_eq!(std::fs::read_to_string(&second).unwrap(), "validator b {}");
    }
}
