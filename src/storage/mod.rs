// SPDX-License-Identifier: PMPL-1.0-or-later

//! Durable storage for the chosen language.
//!
//! The language state only needs a small string key/value store that
//! survives restarts. [`FilePreferenceStore`] keeps everything in a single
//! JSON object on disk; [`MemoryPreferenceStore`] is for tests and for hosts
//! that have nowhere to write.

use crate::error::StorageError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Key under which the active language code is persisted.
pub const STORAGE_KEY: &str = "mies.language";

/// String key/value storage that outlives the process.
pub trait PreferenceStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Preferences stored as a flat JSON object in one file.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/mies/preferences.json`, or a relative path when the
    /// platform has no data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("mies"))
            .unwrap_or_else(|| PathBuf::from(".mies"))
            .join("preferences.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // A corrupt file is replaced rather than blocking every future save.
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(StorageError::Corrupt { .. }) => BTreeMap::new(),
            Err(err) => return Err(err),
        };
        entries.insert(key.to_string(), value.to_string());

        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let payload = serde_json::to_string_pretty(&entries).map_err(|source| {
            StorageError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, payload).map_err(io_err)
    }
}

/// In-process storage; wrap in `Arc` to share one instance between owners.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for std::sync::Arc<T> {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }
}

/// Storage that is never available, e.g. private browsing or a read-only
/// host. Every call fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

impl PreferenceStore for UnavailableStore {
    fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("no durable storage".to_string()))
    }

    fn save(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("no durable storage".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_store_roundtrip_creates_parent_dirs() {
        let dir = TempDir::new().expect("tempdir");
        let store = FilePreferenceStore::new(dir.path().join("nested/prefs.json"));
        assert_eq!(store.load(STORAGE_KEY).expect("load"), None);

        store.save(STORAGE_KEY, "th").expect("save");
        store.save("other", "value").expect("save");
        assert_eq!(store.load(STORAGE_KEY).expect("load"), Some("th".to_string()));
        assert_eq!(store.load("other").expect("load"), Some("value".to_string()));
    }

    #[test]
    fn corrupt_file_fails_load_but_save_recovers() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{not json").expect("write");
        let store = FilePreferenceStore::new(&path);

        assert!(matches!(
            store.load(STORAGE_KEY),
            Err(StorageError::Corrupt { .. })
        ));
        store.save(STORAGE_KEY, "en").expect("save");
        assert_eq!(store.load(STORAGE_KEY).expect("load"), Some("en".to_string()));
    }

    #[test]
    fn unavailable_store_always_errors() {
        assert!(UnavailableStore.load(STORAGE_KEY).is_err());
        assert!(UnavailableStore.save(STORAGE_KEY, "en").is_err());
    }
}
