//! Key-value blob storage for ActivityHub
//!
//! The store holds JSON-serializable values under namespaced keys. Two
//! backends: a flat JSON file (the durable default) and an in-memory map
//! for serverless deploys and tests.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::{Map, Value};
use tracing::instrument;

use crate::config::Durability;
use crate::error::Result;

/// Collection key for the activity list
pub const ACTIVITIES_KEY: &str = "activities";

/// Collection key for the user list
pub const USERS_KEY: &str = "users";

/// Namespace prefix applied to every stored key
const PREFIX: &str = "activityhub_";

fn namespaced(key: &str) -> String {
    format!("{PREFIX}{key}")
}

/// Blob store interface: get/set/remove of JSON values by key
pub trait Store: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn put(&self, key: &str, value: &Value) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Write a value through the store under the configured durability policy.
///
/// Best-effort: a failed durable write is logged and swallowed so the
/// caller's in-memory view still advances. Strict: the failure propagates.
pub(crate) fn persist(
    store: &dyn Store,
    durability: Durability,
    key: &str,
    value: &Value,
) -> Result<()> {
    match store.put(key, value) {
        Ok(()) => Ok(()),
        Err(e) => match durability {
            Durability::BestEffort => {
                tracing::warn!(key, error = %e, "durable write failed, keeping in-memory state");
                Ok(())
            }
            Durability::Strict => Err(e),
        },
    }
}

/// In-memory store for serverless deploys and tests
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(&namespaced(key)).cloned())
    }

    fn put(&self, key: &str, value: &Value) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(namespaced(key), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.remove(&namespaced(key));
        Ok(())
    }
}

/// Flat JSON file store.
///
/// The whole database is one JSON object mapping keys to values; every get
/// reads the file, every put rewrites it pretty-printed. The `io` mutex
/// keeps concurrent read-modify-write cycles from tearing each other.
pub struct JsonFileStore {
    path: PathBuf,
    io: Mutex<()>,
}

impl JsonFileStore {
    /// Open or create the store file at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !path.exists() {
            fs::write(&path, "{}")?;
        }
        Ok(Self {
            path,
            io: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        let raw = fs::read_to_string(&self.path)?;
        let value: Value = serde_json::from_str(&raw)?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }

    fn write_all(&self, map: &Map<String, Value>) -> Result<()> {
        let raw = serde_json::to_string_pretty(&Value::Object(map.clone()))?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl Store for JsonFileStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let _io = self.io.lock().unwrap();
        let map = self.read_all()?;
        Ok(map.get(&namespaced(key)).cloned())
    }

    #[instrument(skip(self, value))]
    fn put(&self, key: &str, value: &Value) -> Result<()> {
        let _io = self.io.lock().unwrap();
        let mut map = self.read_all()?;
        map.insert(namespaced(key), value.clone());
        self.write_all(&map)
    }

    #[instrument(skip(self))]
    fn remove(&self, key: &str) -> Result<()> {
        let _io = self.io.lock().unwrap();
        let mut map = self.read_all()?;
        map.remove(&namespaced(key));
        self.write_all(&map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get("activities").unwrap().is_none());

        store.put("activities", &json!([{"name": "Science Fair"}])).unwrap();
        let value = store.get("activities").unwrap().unwrap();
        assert_eq!(value[0]["name"], "Science Fair");

        store.remove("activities").unwrap();
        assert!(store.get("activities").unwrap().is_none());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("db.json");
        let store = JsonFileStore::open(&path).unwrap();

        store.put("users", &json!([{"studentId": "STU001"}])).unwrap();
        let value = store.get("users").unwrap().unwrap();
        assert_eq!(value[0]["studentId"], "STU001");

        // Keys are namespaced on disk
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("activityhub_users"));
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("db.json");
        {
            let store = JsonFileStore::open(&path).unwrap();
            store.put("activities", &json!([1, 2, 3])).unwrap();
        }
        let store = JsonFileStore::open(&path).unwrap();
        let value = store.get("activities").unwrap().unwrap();
        assert_eq!(value, json!([1, 2, 3]));
    }

    #[test]
    fn test_file_store_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("dir").join("db.json");
        let store = JsonFileStore::open(&path).unwrap();
        store.put("activities", &json!([])).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let store = MemoryStore::new();
        store.remove("never-set").unwrap();
    }
}
