//! Key-Value Storage
//!
//! The persistence seam under the result cache. It behaves like browser
//! storage: string keys, string values, and a stable key enumeration order
//! (first insertion; overwriting a key keeps its position).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

const STORE_FILE: &str = "results.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Synchronous string key-value storage
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or overwrite a value; last write wins
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key; removing a missing key is not an error
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;

    /// All keys, in enumeration order
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredItem {
    key: String,
    value: String,
}

/// In-memory storage, used for tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Vec<StoredItem>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|item| item.key == key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.position(key).map(|i| self.items[i].value.clone()))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        match self.position(key) {
            Some(i) => self.items[i].value = value.to_string(),
            None => self.items.push(StoredItem {
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        if let Some(i) = self.position(key) {
            self.items.remove(i);
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.items.iter().map(|item| item.key.clone()).collect())
    }
}

/// File-backed storage: a [`MemoryStore`] mirrored to a JSON file
pub struct FileStore {
    path: PathBuf,
    memory: MemoryStore,
}

impl FileStore {
    /// Open (or create) the store inside `dir`
    ///
    /// A missing file yields an empty store. An unreadable or corrupt file is
    /// logged and replaced on the next write.
    pub fn open(dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(STORE_FILE);

        let items = if path.exists() {
            match fs::read_to_string(&path)
                .map_err(StorageError::from)
                .and_then(|content| {
                    serde_json::from_str::<Vec<StoredItem>>(&content).map_err(StorageError::from)
                })
            {
                Ok(items) => {
                    info!(entries = items.len(), "Loaded result store from {:?}", path);
                    items
                }
                Err(e) => {
                    warn!("Discarding unreadable result store {:?}: {}", path, e);
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            memory: MemoryStore { items },
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whole store, via a temp file so a crash never leaves half a file
    fn persist(&self) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(&self.memory.items)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.memory.get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.memory.set_item(key, value)?;
        self.persist()
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        if self.memory.position(key).is_none() {
            return Ok(());
        }
        self.memory.remove_item(key)?;
        self.persist()
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        self.memory.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_keeps_insertion_order() {
        let mut store = MemoryStore::new();
        store.set_item("b", "1").unwrap();
        store.set_item("a", "2").unwrap();
        store.set_item("c", "3").unwrap();
        // overwrite keeps position
        store.set_item("b", "4").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["b", "a", "c"]);
        assert_eq!(store.get_item("b").unwrap(), Some("4".to_string()));

        store.remove_item("a").unwrap();
        store.remove_item("missing").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["b", "c"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let temp_dir = TempDir::new().unwrap();

        {
            let mut store = FileStore::open(temp_dir.path()).unwrap();
            store.set_item("search_results_one", "{}").unwrap();
            store.set_item("search_results_two", "[]").unwrap();
            store.remove_item("search_results_one").unwrap();
            store.set_item("search_results_three", "null").unwrap();
        }

        let store = FileStore::open(temp_dir.path()).unwrap();
        assert_eq!(
            store.keys().unwrap(),
            vec!["search_results_two", "search_results_three"]
        );
        assert_eq!(
            store.get_item("search_results_two").unwrap(),
            Some("[]".to_string())
        );
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_file_store_recovers_from_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(STORE_FILE), "{ not json").unwrap();

        let mut store = FileStore::open(temp_dir.path()).unwrap();
        assert!(store.keys().unwrap().is_empty());

        store.set_item("k", "v").unwrap();
        let reopened = FileStore::open(temp_dir.path()).unwrap();
        assert_eq!(reopened.get_item("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn test_file_store_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");

        let mut store = FileStore::open(&nested).unwrap();
        store.set_item("k", "v").unwrap();
        assert!(nested.join(STORE_FILE).exists());
    }
}
