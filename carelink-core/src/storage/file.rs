//! JSON-file storage backend
//!
//! The whole key/value map lives in one JSON object on disk. Every mutation
//! rewrites the file through a temporary sibling and an atomic rename, so a
//! crash mid-write leaves either the old or the new map, never a torn one.

use super::KeyValueStore;
use crate::Error;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Storage persisted as a JSON object in a single file
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open the store at `path`, reading existing entries if the file exists
    ///
    /// A missing or empty file yields an empty store. A file that is not a
    /// JSON object of strings is reported as a storage error rather than
    /// silently discarded.
    pub fn open(path: impl Into<PathBuf>) -> crate::Result<Self> {
        let path = path.into();
        let entries = read_entries(&path)?;
        tracing::debug!(path = %path.display(), keys = entries.len(), "Opened file storage");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> crate::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(entries)?;
        let tmp_path = temp_path(&self.path)?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(content.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> crate::Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> crate::Result<()> {
        let mut entries = self.entries.write();
        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> crate::Result<()> {
        let mut entries = self.entries.write();
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

fn read_entries(path: &Path) -> crate::Result<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    serde_json::from_str(&content).map_err(|e| {
        Error::Storage(format!(
            "{} is not a JSON object of strings: {}",
            path.display(),
            e
        ))
    })
}

fn temp_path(path: &Path) -> crate::Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::Storage(format!("{} has no file name", path.display())))?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::open(temp_dir.path().join("store.json")).unwrap();
        assert_eq!(storage.get("session").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("store.json");

        let storage = FileStorage::open(&path).unwrap();
        storage.set("session", r#"{"token":"t"}"#).unwrap();
        storage.set("other", "x").unwrap();
        storage.remove("other").unwrap();
        drop(storage);

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(
            reopened.get("session").unwrap().as_deref(),
            Some(r#"{"token":"t"}"#)
        );
        assert_eq!(reopened.get("other").unwrap(), None);
        assert!(!path.with_file_name("store.json.tmp").exists());
    }

    #[test]
    fn test_malformed_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let err = FileStorage::open(&path).unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
    }

    #[test]
    fn test_failed_write_leaves_entries_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let parent = temp_dir.path().join("x");
        let storage = FileStorage::open(parent.join("store.json")).unwrap();
        storage.set("session", "OLD").unwrap();

        // A regular file where the parent directory should be
        fs::remove_dir_all(&parent).unwrap();
        fs::write(&parent, "not a directory").unwrap();

        assert!(storage.set("session", "NEW").is_err());
        assert_eq!(storage.get("session").unwrap().as_deref(), Some("OLD"));

        assert!(storage.remove("session").is_err());
        assert_eq!(storage.get("session").unwrap().as_deref(), Some("OLD"));
    }

    #[test]
    fn test_empty_file_is_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        fs::write(&path, "  \n").unwrap();

        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get("anything").unwrap(), None);
    }
}
