pub mod clipboard;
pub mod config_service;
pub mod dto;
pub mod history_repository;
pub mod paths;
pub mod storage;

pub use crate::clipboard::{MemoryClipboard, UnavailableClipboard, default_clipboard};
pub use crate::config_service::ConfigService;
pub use crate::history_repository::{HISTORY_KEY, KeyValueHistoryRepository};
pub use crate::paths::AikenizePaths;
pub use crate::storage::{InMemoryStore, JsonFileStore};

#[cfg(feature = "system-clipboard")]
pub use crate::clipboard::SystemClipboard;
