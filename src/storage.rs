use crate::config::project_dirs;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

/// String key-value persistence, the shape of the app's local storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// JSON-file-backed store under the platform config dir.
pub struct PreferencesStore {
    entries: Arc<RwLock<BTreeMap<String, String>>>,
    path: PathBuf,
}

impl PreferencesStore {
    pub fn new() -> Result<Self> {
        let project_dirs = project_dirs()?;
        let config_dir = project_dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;

        Self::open(config_dir.join("preferences.json"))
    }

    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        // Unreadable or corrupt files start over empty rather than blocking the app
        let entries = if path.exists() {
            match std::fs::read_to_string(&path)
                .map_err(Error::from)
                .and_then(|content| serde_json::from_str(&content).map_err(Error::from))
            {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Discarding unreadable preferences {:?}: {}", path, e);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            entries: Arc::new(RwLock::new(entries)),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for PreferencesStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        let mut updated = entries.clone();
        updated.insert(key.to_string(), value.to_string());

        // memory only changes once the file does
        self.save(&updated).await?;
        *entries = updated;
        Ok(())
    }
}

/// In-process store for tests and one-shot runs.
#[derive(Default, Clone)]
pub struct MemoryStore {
    entries: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(key.to_string(), value.to_string());
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn preferences_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        let store = PreferencesStore::open(&path).unwrap();
        assert_eq!(store.get("lastVersionCheck").await.unwrap(), None);
        store.set("lastVersionCheck", "2025-04-06").await.unwrap();

        let reopened = PreferencesStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("lastVersionCheck").await.unwrap().as_deref(),
            Some("2025-04-06")
        );
    }

    #[tokio::test]
    async fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "[1, 2").unwrap();

        let store = PreferencesStore::open(&path).unwrap();
        assert_eq!(store.get("userName").await.unwrap(), None);
    }

    #[tokio::test]
    async fn non_utf8_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let store = PreferencesStore::open(&path).unwrap();
        assert_eq!(store.get("lastVersionCheck").await.unwrap(), None);
    }

    #[tokio::test]
    async fn failed_save_leaves_memory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let store = PreferencesStore::open(blocker.join("preferences.json")).unwrap();
        assert!(store.set("lastVersionCheck", "2025-04-06").await.is_err());
        assert_eq!(store.get("lastVersionCheck").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_creates_missing_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");

        let store = PreferencesStore::open(&path).unwrap();
        store.set("userName", "Maria").await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn memory_store_overwrites() {
        let store = MemoryStore::with_entry("userName", "Ana");
        store.set("userName", "Bia").await.unwrap();
        assert_eq!(store.get("userName").await.unwrap().as_deref(), Some("Bia"));
    }
}
