//! String key/value store persisted as one JSON file.
//!
//! Writes go to a temp file in the same directory which is then renamed over
//! the target, so readers never see a half-written file.

use crate::{Result, StorefrontError};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockWriteGuard};
use tracing::{debug, warn};

/// Persistent string map, the storefront's local storage.
pub struct LocalStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl LocalStore {
    /// Open the store at `path`. A missing file is an empty store; an
    /// unreadable or corrupt one is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match read_json_map(&path) {
            Ok(Some(values)) => values,
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                warn!("Ignoring unreadable preference store {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self {
            path,
            values: RwLock::new(values),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        match self.values.read() {
            Ok(guard) => guard.get(key).cloned(),
            Err(poisoned) => poisoned.into_inner().get(key).cloned(),
        }
    }

    /// Set `key` and persist the whole store.
    ///
    /// The in-memory value only changes once the file has been written.
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.write_values();
        let mut next = values.clone();
        next.insert(key.to_string(), value.to_string());
        write_json_atomic(&self.path, &next)?;
        *values = next;
        debug!("Stored {} in {}", key, self.path.display());
        Ok(())
    }

    /// Remove `key` and persist. Returns whether it was present.
    pub fn remove_item(&self, key: &str) -> Result<bool> {
        let mut values = self.write_values();
        if !values.contains_key(key) {
            return Ok(false);
        }
        let mut next = values.clone();
        next.remove(key);
        write_json_atomic(&self.path, &next)?;
        *values = next;
        Ok(true)
    }

    fn write_values(&self) -> RwLockWriteGuard<'_, BTreeMap<String, String>> {
        match self.values.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore").field("path", &self.path).finish()
    }
}

fn read_json_map(path: &Path) -> Result<Option<BTreeMap<String, String>>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents =
        fs::read_to_string(path).map_err(|e| StorefrontError::io_with_path(e, path))?;
    let values = serde_json::from_str(&contents).map_err(|e| StorefrontError::Json {
        message: format!("Failed to parse {}: {}", path.display(), e),
        source: Some(e),
    })?;
    Ok(Some(values))
}

fn write_json_atomic(path: &Path, values: &BTreeMap<String, String>) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(|e| StorefrontError::Io {
        message: format!("Failed to create directory {}", parent.display()),
        path: Some(parent.clone()),
        source: Some(e),
    })?;

    let serialized = serde_json::to_string_pretty(values)?;

    let mut temp = tempfile::NamedTempFile::new_in(&parent)
        .map_err(|e| StorefrontError::io_with_path(e, &parent))?;
    temp.write_all(serialized.as_bytes())
        .map_err(|e| StorefrontError::io_with_path(e, temp.path()))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| StorefrontError::io_with_path(e, temp.path()))?;
    temp.persist(path)
        .map_err(|e| StorefrontError::io_with_path(e.error, path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path().join("prefs.json"));
        assert!(store.get_item("anything").is_none());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let store = LocalStore::open(&path);
        store.set_item("theme", "dark").unwrap();
        store.set_item("lang", "en").unwrap();

        let reopened = LocalStore::open(&path);
        assert_eq!(reopened.get_item("theme").as_deref(), Some("dark"));
        assert_eq!(reopened.get_item("lang").as_deref(), Some("en"));
    }

    #[test]
    fn test_corrupt_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{not json").unwrap();

        let store = LocalStore::open(&path);
        assert!(store.get_item("theme").is_none());

        // The next write replaces the corrupt content.
        store.set_item("theme", "light").unwrap();
        assert_eq!(LocalStore::open(&path).get_item("theme").as_deref(), Some("light"));
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let dir = TempDir::new().unwrap();
        // A regular file where the store's directory should be.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let store = LocalStore::open(blocker.join("prefs.json"));

        assert!(store.set_item("theme", "dark").is_err());
        assert!(store.get_item("theme").is_none());
    }

    #[test]
    fn test_failed_remove_keeps_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs").join("prefs.json");
        let store = LocalStore::open(&path);
        store.set_item("theme", "dark").unwrap();

        // Swap the directory for a file so the next write cannot land.
        fs::remove_dir_all(dir.path().join("prefs")).unwrap();
        fs::write(dir.path().join("prefs"), "").unwrap();

        assert!(store.remove_item("theme").is_err());
        assert_eq!(store.get_item("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_remove_item() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        let store = LocalStore::open(&path);

        store.set_item("k", "v").unwrap();
        assert!(store.remove_item("k").unwrap());
        assert!(!store.remove_item("k").unwrap());
        assert!(LocalStore::open(&path).get_item("k").is_none());
    }
}
