//! Persistent string key-value store shared by every kotobaten process.
//!
//! The store is the only channel between the long-running rotation display and
//! the short-lived `next`/`previous` commands. It offers per-key atomicity and
//! nothing more: a multi-key update can be observed half-applied by a reader.
//!
//! # Public API
//! - [`KeyValueStore`]: Async get/set/remove contract
//! - [`FileStore`]: One file per key, replaced atomically via rename
//! - [`MemoryStore`]: In-process store used by tests

use crate::core::error::{KotobatenError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Directory-backed store. Each key lives in its own file named after the key.
pub struct FileStore {
    root: PathBuf,
    write_seq: AtomicU64,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if let Err(e) = std::fs::create_dir_all(&root) {
            log::error!("Failed to create store directory '{}': {}", root.display(), e);
            return Err(KotobatenError::store_directory_creation_failed(&root, e));
        }

        log::debug!("Opened key-value store at {}", root.display());
        Ok(Self {
            root,
            write_seq: AtomicU64::new(0),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(file_name)
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(KotobatenError::store_read_failed(key, &path, e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        // Readers in other processes must never see a half-written value.
        let tmp = self.root.join(format!(
            ".{}.{}.{}.tmp",
            key,
            std::process::id(),
            self.write_seq.fetch_add(1, Ordering::Relaxed)
        ));

        if let Err(e) = tokio::fs::write(&tmp, value).await {
            return Err(KotobatenError::store_write_failed(key, &tmp, e));
        }

        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(KotobatenError::store_write_failed(key, &path, e));
        }

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(KotobatenError::store_write_failed(key, &path, e)),
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored value.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.values
            .lock()
            .map(|values| values.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .values
            .lock()
            .ok()
            .and_then(|values| values.get(key).cloned()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path().join("store")).unwrap();

        assert_eq!(store.get("practice_menubar_index").await.unwrap(), None);

        store.set("practice_menubar_index", "3").await.unwrap();
        assert_eq!(
            store.get("practice_menubar_index").await.unwrap().as_deref(),
            Some("3")
        );

        store.set("practice_menubar_index", "4").await.unwrap();
        assert_eq!(
            store.get("practice_menubar_index").await.unwrap().as_deref(),
            Some("4")
        );

        store.remove("practice_menubar_index").await.unwrap();
        assert_eq!(store.get("practice_menubar_index").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_is_shared_between_instances() {
        let temp_dir = TempDir::new().unwrap();
        let writer = FileStore::open(temp_dir.path()).unwrap();
        let reader = FileStore::open(temp_dir.path()).unwrap();

        writer.set("practice_menubar_enabled", "false").await.unwrap();
        assert_eq!(
            reader.get("practice_menubar_enabled").await.unwrap().as_deref(),
            Some("false")
        );
    }

    #[tokio::test]
    async fn test_file_store_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();

        store.set("auth_token", "abc").await.unwrap();

        let names: Vec<String> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["auth_token".to_string()]);
    }

    #[tokio::test]
    async fn test_remove_missing_key_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();
        store.remove("never_written").await.unwrap();
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryStore::new();
        store.set("a", "1").await.unwrap();
        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("1"));
        store.remove("a").await.unwrap();
        assert!(store.snapshot().is_empty());
    }
}
