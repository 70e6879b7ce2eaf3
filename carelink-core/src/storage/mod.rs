//! Durable key/value storage
//!
//! A small string-to-string store with the same shape as browser local
//! storage. The session store keeps its record here; nothing else in the
//! process coordinates access, so every call is a plain read or write and
//! the last writer wins.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::config::{StorageBackend, StorageConfig};
use crate::utils::expand_home;
use std::sync::Arc;

/// String key/value storage shared by the state containers
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> crate::Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> crate::Result<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> crate::Result<()>;

    /// Whether a value is stored under `key`
    fn contains(&self, key: &str) -> crate::Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// Open the storage backend selected by configuration
pub fn open_storage(config: &StorageConfig) -> crate::Result<Arc<dyn KeyValueStore>> {
    match config.backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryStorage::new())),
        StorageBackend::File => {
            let path = expand_home(&config.path);
            Ok(Arc::new(FileStorage::open(path)?))
        }
    }
}
