//! Wiring of configuration, storage and the translation client.

use std::path::PathBuf;
use std::sync::Arc;

use aikenize_core::clipboard::Clipboard;
use aikenize_core::config::AppConfig;
use aikenize_core::error::Result;
use aikenize_core::storage::KeyValueStore;
use aikenize_core::{HistoryRepository, TranslationClient};
use aikenize_infrastructure::{
    AikenizePaths, ConfigService, InMemoryStore, JsonFileStore, KeyValueHistoryRepository,
    default_clipboard,
};
use aikenize_interaction::GeminiApiClient;

use crate::history_store::HistoryStore;
use crate::session::SessionController;
use crate::workbench_io::WorkbenchIo;

/// Where the application reads and writes.
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    pub config_dir: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    /// Keep history in memory only.
    pub ephemeral: bool,
}

impl AppOptions {
    /// Resolved config and data locations; needs no config to be loaded.
    pub fn paths(&self) -> AikenizePaths {
        AikenizePaths::new(self.config_dir.as_deref(), self.data_dir.as_deref())
    }
}

/// Loaded configuration plus the shared storage backend.
pub struct AppContext {
    config_service: ConfigService,
    config: AppConfig,
    store: Arc<dyn KeyValueStore>,
}

impl AppContext {
    /// Loads `config.toml` and opens the history store backend.
    pub fn load(options: &AppOptions) -> Result<Self> {
        let config_service = ConfigService::new(options.paths());
        let config = config_service.load_config()?;

        let store: Arc<dyn KeyValueStore> = if options.ephemeral {
            tracing::info!("[AppContext] Using in-memory history store");
            Arc::new(InMemoryStore::new())
        } else {
            let dir = config_service.paths().store_dir()?;
            tracing::debug!("[AppContext] History store at {}", dir.display());
            Arc::new(JsonFileStore::new(dir))
        };

        Ok(Self {
            config_service,
            config,
            store,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn history_repository(&self) -> Arc<dyn HistoryRepository> {
        Arc::new(KeyValueHistoryRepository::new(self.store.clone()))
    }

    pub async fn open_history(&self) -> HistoryStore {
        HistoryStore::load(self.history_repository(), self.config.history.seed_on_empty).await
    }

    /// Builds the Gemini client. Fails when no API key is configured.
    pub fn translation_client(&self) -> Result<Arc<dyn TranslationClient>> {
        let api_key = self.config_service.resolve_api_key()?;
        let client = GeminiApiClient::from_config(api_key, &self.config.model);
        tracing::debug!("[AppContext] Translation client ready: {:?}", client);
        Ok(Arc::new(client))
    }

    /// Opens a session with the Gemini client and the persisted history.
    pub async fn session(&self) -> Result<Arc<SessionController>> {
        self.session_with(self.translation_client()?).await
    }

    pub async fn session_with(
        &self,
        client: Arc<dyn TranslationClient>,
    ) -> Result<Arc<SessionController>> {
        let history = self.open_history().await;
        Ok(Arc::new(SessionController::new(client, history)))
    }

    /// Clipboard and file actions for `session`, on this build's clipboard.
    pub fn workbench_io(&self, session: Arc<SessionController>) -> WorkbenchIo {
        self.workbench_io_with(session, default_clipboard())
    }

    pub fn workbench_io_with(
        &self,
        session: Arc<SessionController>,
        clipboard: Arc<dyn Clipboard>,
    ) -> WorkbenchIo {
        WorkbenchIo::new(session, clipboard)
    }
}
