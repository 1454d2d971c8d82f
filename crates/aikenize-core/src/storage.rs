//! Key-value storage trait.
//!
//! Mirrors a browser-style local storage: string keys, string values, and
//! a missing key that is observably different from any stored value.

use async_trait::async_trait;

use crate::error::Result;

/// Persistent string key-value store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `Ok(None)` if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// A successful return means the value is durable.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
