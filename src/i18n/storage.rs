//! Durable preference storage.
//!
//! The locale store only needs a string key/value pair to survive a restart.
//! Every operation returns a `Result`; the store decides which failures to
//! ignore instead of the storage swallowing them.

use crate::i18n::StorageError;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use tracing::warn;

/// Key/value storage for user preferences.
pub trait PreferenceStorage {
    /// Read the value stored under `key`; `Ok(None)` when nothing is stored.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: PreferenceStorage + ?Sized> PreferenceStorage for Arc<T> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

/// In-memory storage. Clones share the same underlying map, which lets
/// tests model a reload by building a second store over a clone.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every stored value (the "user cleared site data" case).
    pub fn clear(&self) -> Result<(), StorageError> {
        self.values
            .lock()
            .map_err(|_| StorageError::Poisoned)?
            .clear();
        Ok(())
    }
}

impl PreferenceStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().map_err(|_| StorageError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage backed by a JSON object on disk: `{ "fd-lang": "it", ... }`.
///
/// Keys other than the ones this process writes are preserved.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&content).map_err(|source| StorageError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    fn corrupt_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".corrupt");
        PathBuf::from(name)
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl PreferenceStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.load()?;
        Ok(values
            .get(key)
            .and_then(Value::as_str)
            .map(ToString::to_string))
    }

    /// The file is replaced atomically (temp file + rename), so a crash
    /// mid-write leaves the previous contents intact. A malformed file is
    /// moved aside to `<name>.corrupt` and replaced with a fresh object.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = match self.load() {
            Ok(values) => values,
            Err(StorageError::Malformed { source, .. }) => {
                let backup = self.corrupt_path();
                warn!(
                    "Preference file {} is malformed ({}), moving it to {}",
                    self.path.display(),
                    source,
                    backup.display()
                );
                fs::rename(&self.path, &backup).map_err(|e| self.io_error(e))?;
                Map::new()
            }
            Err(err) => return Err(err),
        };
        values.insert(key.to_string(), Value::String(value.to_string()));

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;

        let content = serde_json::to_string_pretty(&values).map_err(|source| {
            StorageError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;

        let mut file = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        file.write_all(content.as_bytes())
            .and_then(|_| file.as_file().sync_all())
            .map_err(|e| self.io_error(e))?;
        file.persist(&self.path).map_err(|e| self.io_error(e.error))?;
        Ok(())
    }
}

/// Storage that is switched off (private browsing, read-only media).
/// Every call fails with `StorageError::Unavailable`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledStorage;

impl PreferenceStorage for DisabledStorage {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ==================== MemoryStorage Tests ====================

    #[test]
    fn test_memory_read_missing() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read("fd-lang").unwrap(), None);
    }

    #[test]
    fn test_memory_write_then_read() {
        let storage = MemoryStorage::new();
        storage.write("fd-lang", "it").unwrap();
        assert_eq!(storage.read("fd-lang").unwrap().as_deref(), Some("it"));
    }

    #[test]
    fn test_memory_clones_share_values() {
        let storage = MemoryStorage::new();
        let reloaded = storage.clone();
        storage.write("fd-lang", "de").unwrap();
        assert_eq!(reloaded.read("fd-lang").unwrap().as_deref(), Some("de"));
    }

    #[test]
    fn test_memory_clear() {
        let storage = MemoryStorage::new();
        storage.write("fd-lang", "de").unwrap();
        storage.clear().unwrap();
        assert_eq!(storage.read("fd-lang").unwrap(), None);
    }

    // ==================== FileStorage Tests ====================

    #[test]
    fn test_file_missing_reads_none() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("prefs.json"));
        assert_eq!(storage.read("fd-lang").unwrap(), None);
    }

    #[test]
    fn test_file_write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("prefs.json");
        let storage = FileStorage::new(&path);

        storage.write("fd-lang", "es").unwrap();

        assert!(path.exists());
        assert_eq!(storage.read("fd-lang").unwrap().as_deref(), Some("es"));
    }

    #[test]
    fn test_file_write_preserves_other_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"theme": "dark"}"#).unwrap();
        let storage = FileStorage::new(&path);

        storage.write("fd-lang", "it").unwrap();

        assert_eq!(storage.read("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(storage.read("fd-lang").unwrap().as_deref(), Some("it"));
    }

    #[test]
    fn test_file_non_string_value_reads_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"fd-lang": 42}"#).unwrap();

        let storage = FileStorage::new(&path);
        assert_eq!(storage.read("fd-lang").unwrap(), None);
    }

    #[test]
    fn test_file_malformed_read_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();
        let storage = FileStorage::new(&path);

        assert!(matches!(
            storage.read("fd-lang"),
            Err(StorageError::Malformed { .. })
        ));
    }

    #[test]
    fn test_file_write_recovers_from_truncated_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"fd-lang": "i"#).unwrap();
        let storage = FileStorage::new(&path);

        storage.write("fd-lang", "es").unwrap();

        assert_eq!(storage.read("fd-lang").unwrap().as_deref(), Some("es"));
        assert_eq!(
            fs::read_to_string(dir.path().join("prefs.json.corrupt")).unwrap(),
            r#"{"fd-lang": "i"#
        );
    }

    #[test]
    fn test_file_write_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        let storage = FileStorage::new(&path);

        storage.write("fd-lang", "it").unwrap();
        storage.write("fd-lang", "de").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("prefs.json")]);
    }

    #[test]
    fn test_file_empty_is_treated_as_empty_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "").unwrap();

        let storage = FileStorage::new(&path);
        assert_eq!(storage.read("fd-lang").unwrap(), None);
    }

    // ==================== DisabledStorage Tests ====================

    #[test]
    fn test_disabled_always_fails() {
        let storage = DisabledStorage;
        assert!(matches!(
            storage.read("fd-lang"),
            Err(StorageError::Unavailable)
        ));
        assert!(matches!(
            storage.write("fd-lang", "en"),
            Err(StorageError::Unavailable)
        ));
    }

    #[test]
    fn test_arc_storage_delegates() {
        let storage = Arc::new(MemoryStorage::new());
        storage.write("fd-lang", "de").unwrap();
        assert_eq!(
            PreferenceStorage::read(&storage, "fd-lang").unwrap().as_deref(),
            Some("de")
        );
    }
}
