//! File-backed key-value store.

use std::path::PathBuf;

use aikenize_core::error::{AikenizeError, Result};
use aikenize_core::storage::KeyValueStore;
use async_trait::async_trait;

use super::atomic_file::AtomicFile;

/// Key-value store keeping one file per key under a directory.
///
/// Values are JSON documents by convention (`<key>.json`), but the store
/// never parses them: a corrupt value is returned as-is and judged by the
/// caller. File I/O runs on the blocking pool.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn file_for(&self, key: &str) -> Result<AtomicFile> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(AikenizeError::data_access(format!(
                "Invalid storage key '{}': use ASCII letters, digits, '_' or '-'",
                key
            )));
        }
        Ok(AtomicFile::new(self.dir.join(format!("{key}.json"))))
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AikenizeError::internal(format!("Failed to join task: {}", e)))?
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let file = self.file_for(key)?;
        run_blocking(move || Ok(file.read()?)).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let file = self.file_for(key)?;
        let bytes = value.len();
        let value = value.to_string();
        run_blocking(move || Ok(file.write(&value)?)).await?;
        tracing::debug!("[JsonFileStore] Wrote key '{}' ({} bytes)", key, bytes);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let file = self.file_for(key)?;
        run_blocking(move || Ok(file.remove()?)).await?;
        tracing::debug!("[JsonFileStore] Removed key '{}'", key);
        Ok(())
    }
}
