//! JSON persistence for ~/.jellyrun/.
//!
//! Two layers: whole-file JSON documents (config) and a flat key-value
//! store of opaque strings (profile, last score, cosmetic selections).

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the key-value store inside the data directory.
pub const STORE_FILE: &str = "store.json";

/// Errors raised by the key-value store. Callers log these and fall back
/// to default values.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("store contents are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// The file was read but its bytes are not a store (bad JSON or bad UTF-8).
    pub fn is_corrupt(&self) -> bool {
        match self {
            StoreError::Json(_) => true,
            StoreError::Io(e) => e.kind() == io::ErrorKind::InvalidData,
        }
    }
}

/// Get the ~/.jellyrun/ directory path, creating it if needed.
pub fn data_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".jellyrun");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.jellyrun/.
pub fn data_path(filename: &str) -> io::Result<PathBuf> {
    Ok(data_dir()?.join(filename))
}

/// Load a JSON file, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("ignoring unreadable {}: {}", path.display(), e);
            T::default()
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => T::default(),
        Err(e) => {
            log::warn!("failed to read {}: {}", path.display(), e);
            T::default()
        }
    }
}

/// Save a value as pretty-printed JSON, creating parent directories.
pub fn save_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}

/// Flat string store backed by a single JSON object on disk.
///
/// Every call re-reads the file, so independent owners of a store pointing
/// at the same path always observe each other's writes.
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    path: PathBuf,
}

impl KeyValueStore {
    /// Store at ~/.jellyrun/store.json.
    pub fn open_default() -> io::Result<Self> {
        Ok(Self::at(data_path(STORE_FILE)?))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Raw string value for `key`, `None` when absent.
    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    /// Write `value` under `key`. A store file that does not decode is
    /// replaced; any other read failure is returned and the file is left alone.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(e) if e.is_corrupt() => {
                log::warn!("discarding corrupt store {}: {}", self.path.display(), e);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }

    /// Delete the whole store file. A missing file is not an error.
    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Decode the JSON string stored under `key`.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw)
    }

    /// Decode `key`, logging any failure and falling back to `T::default()`.
    pub fn load_or_default<T: Default + DeserializeOwned>(&self, key: &str) -> T {
        match self.get_json(key) {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                log::warn!("failed to load '{}' from store: {}", key, e);
                T::default()
            }
        }
    }
}

#[cfg(test)]
pub(crate) fn scratch_path(name: &str) -> PathBuf {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir()
        .join(format!("jellyrun-test-{}-{}", std::process::id(), n))
        .join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_path_format() {
        let path = data_path("test.json").expect("data_path should succeed");
        assert!(path.to_string_lossy().ends_with(".jellyrun/test.json"));
    }

    #[test]
    fn test_load_missing_returns_default() {
        let val: Vec<String> = load_json_or_default(&scratch_path("missing.json"));
        assert!(val.is_empty());
    }

    #[test]
    fn test_load_invalid_returns_default() {
        let path = scratch_path("broken.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let val: Vec<u32> = load_json_or_default(&path);
        assert!(val.is_empty());
    }

    #[test]
    fn test_store_missing_key_is_none() {
        let store = KeyValueStore::at(scratch_path(STORE_FILE));
        assert_eq!(store.get("@score").unwrap(), None);
    }

    #[test]
    fn test_store_set_then_get() {
        let store = KeyValueStore::at(scratch_path(STORE_FILE));
        store.set("@score", "12").unwrap();
        store.set("user", "{}").unwrap();

        assert_eq!(store.get("@score").unwrap().as_deref(), Some("12"));
        assert_eq!(store.get("user").unwrap().as_deref(), Some("{}"));

        store.set("@score", "3").unwrap();
        assert_eq!(store.get("@score").unwrap().as_deref(), Some("3"));
    }

    #[test]
    fn test_store_shared_between_handles() {
        let path = scratch_path(STORE_FILE);
        let a = KeyValueStore::at(&path);
        let b = KeyValueStore::at(&path);

        a.set("@score", "7").unwrap();
        assert_eq!(b.get("@score").unwrap().as_deref(), Some("7"));
    }

    #[test]
    fn test_store_corrupt_file_read_is_error_and_write_recovers() {
        let path = scratch_path(STORE_FILE);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "garbage").unwrap();
        let store = KeyValueStore::at(&path);

        assert!(matches!(store.get("user"), Err(StoreError::Json(_))));
        let fallback: Vec<String> = store.load_or_default("user");
        assert!(fallback.is_empty());

        store.set("@score", "1").unwrap();
        assert_eq!(store.get("@score").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_store_unreadable_path_is_not_overwritten() {
        // A directory where the file should be: reading fails with an I/O
        // error that says nothing about the contents.
        let path = scratch_path(STORE_FILE);
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("keep.txt"), "x").unwrap();
        let store = KeyValueStore::at(&path);

        let err = store.set("@score", "1").unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(!err.is_corrupt());
        assert!(path.is_dir());
        assert!(path.join("keep.txt").exists());
    }

    #[test]
    fn test_store_invalid_utf8_is_treated_as_corrupt() {
        let path = scratch_path(STORE_FILE);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let store = KeyValueStore::at(&path);

        store.set("@score", "2").unwrap();
        assert_eq!(store.get("@score").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_store_remove_and_clear() {
        let store = KeyValueStore::at(scratch_path(STORE_FILE));
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();

        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));

        store.clear().unwrap();
        assert_eq!(store.get("b").unwrap(), None);
        // Clearing twice is fine
        store.clear().unwrap();
    }
}
