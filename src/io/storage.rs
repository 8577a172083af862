use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;

use tempfile::NamedTempFile;

/// Keys for the four independent persisted entries.
pub const PROGRESS_KEY: &str = "progress";
pub const SETTINGS_KEY: &str = "settings";
pub const FILTERS_KEY: &str = "filters";
pub const COLLAPSED_KEY: &str = "collapsed";

/// Error type for storage writes
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The persistence port: a durable key-value store holding one JSON text
/// per entry. Loads never fail loudly — a missing or unreadable entry is
/// simply absent and the caller falls back to the type's default.
pub trait Storage {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// File-backed store: one `<key>.json` per entry under a state directory.
/// Writes go through a temp file and an atomic rename so a crash mid-save
/// never leaves a truncated entry.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let write_err = |source| StorageError::Write {
            path: path.clone(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(write_err)?;
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        tmp.write_all(value.as_bytes()).map_err(write_err)?;
        tmp.flush().map_err(write_err)?;
        tmp.persist(&path).map_err(|e| write_err(e.error))?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions. Clones share the
/// same entry map, so a test can keep a handle and inspect what the app
/// saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct read access, for assertions
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.get(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Load one entry and decode it, falling back to the default on a missing
/// or corrupt value. Corruption is logged, never propagated.
pub fn load_entry<T>(storage: &dyn Storage, key: &str) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    let Some(text) = storage.load(key) else {
        return T::default();
    };
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("corrupt {} entry, resetting to default: {}", key, e);
            T::default()
        }
    }
}

/// Best-effort save used on every state change: failures are logged and
/// the in-memory state stands.
pub fn save_entry<T: serde::Serialize>(storage: &dyn Storage, key: &str, value: &T) {
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            log::error!("could not serialize {} entry: {}", key, e);
            return;
        }
    };
    if let Err(e) = storage.save(key, &json) {
        log::error!("could not save {} entry: {}", key, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    use crate::model::settings::Settings;

    #[test]
    fn file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileStorage::new(dir.path());
        store.save(PROGRESS_KEY, r#"{"a":true}"#).unwrap();
        assert_eq!(store.load(PROGRESS_KEY).unwrap(), r#"{"a":true}"#);
    }

    #[test]
    fn file_store_missing_entry_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStorage::new(dir.path());
        assert!(store.load(PROGRESS_KEY).is_none());
    }

    #[test]
    fn file_store_entries_are_independent() {
        let dir = TempDir::new().unwrap();
        let store = FileStorage::new(dir.path());
        store.save(PROGRESS_KEY, "{}").unwrap();
        store.save(SETTINGS_KEY, r#"{"hide_checked":true}"#).unwrap();
        assert!(dir.path().join("progress.json").exists());
        assert!(dir.path().join("settings.json").exists());
        assert!(store.load(FILTERS_KEY).is_none());
    }

    #[test]
    fn file_store_creates_missing_dir() {
        let dir = TempDir::new().unwrap();
        let store = FileStorage::new(dir.path().join("nested/state"));
        store.save(SETTINGS_KEY, "{}").unwrap();
        assert!(store.load(SETTINGS_KEY).is_some());
    }

    #[test]
    fn memory_store_shares_entries_across_clones() {
        let store = MemoryStorage::new();
        let handle = store.clone();
        store.save("k", "v").unwrap();
        assert_eq!(handle.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn load_entry_defaults_on_missing() {
        let store = MemoryStorage::new();
        let settings: Settings = load_entry(&store, SETTINGS_KEY);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn load_entry_defaults_on_corrupt_json() {
        let store = MemoryStorage::new();
        store.save(SETTINGS_KEY, "not json {{{").unwrap();
        let settings: Settings = load_entry(&store, SETTINGS_KEY);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn corrupt_entry_does_not_poison_others() {
        let store = MemoryStorage::new();
        store.save(SETTINGS_KEY, "garbage").unwrap();
        store.save(FILTERS_KEY, r#"{"main":{"Weapon":true},"sub":{}}"#).unwrap();

        let settings: Settings = load_entry(&store, SETTINGS_KEY);
        assert_eq!(settings, Settings::default());
        let filters: crate::model::FilterState = load_entry(&store, FILTERS_KEY);
        assert!(filters.is_main_enabled("Weapon"));
    }

    #[test]
    fn save_entry_serializes_value() {
        let store = MemoryStorage::new();
        save_entry(&store, SETTINGS_KEY, &Settings { hide_checked: true });
        assert_eq!(
            store.get(SETTINGS_KEY).as_deref(),
            Some(r#"{"hide_checked":true}"#)
        );
    }
}
