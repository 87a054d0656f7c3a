//! Read side of the bookmark/progress store.
//!
//! Records are written by the UI layer; this crate only lists and reads
//! them.

use rustbreak::{deser::Ron, FileDatabase};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::RwLock;
use tracing::{debug, warn};

pub const BOOKMARK_KEY: &str = "BOOKMARK";
pub const VIEW_LST_KEY: &str = "VIEW_LST";

pub trait KeyValueStore: Send + Sync {
    /// Every key starting with `prefix`, in key order.
    fn list_keys(&self, prefix: &str) -> Vec<String>;

    fn get_raw(&self, key: &str) -> Option<Value>;
}

/// Typed read; records that no longer decode are treated as absent.
pub fn get_typed<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get_raw(key)?;
    match serde_json::from_value(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("store record {} is unreadable: {}", key, e);
            None
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: impl Into<String>, value: Value) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.into(), value);
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn list_keys(&self, prefix: &str) -> Vec<String> {
        match self.entries.read() {
            Ok(entries) => entries
                .keys()
                .filter(|k| k.starts_with(prefix))
                .cloned()
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    fn get_raw(&self, key: &str) -> Option<Value> {
        self.entries.read().ok()?.get(key).cloned()
    }
}

type Records = BTreeMap<String, Value>;

/// Records persisted in a RON file through rustbreak. A missing file starts
/// out empty.
pub struct FileStore {
    db: FileDatabase<Records, Ron>,
}

impl FileStore {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let db = FileDatabase::<Records, Ron>::load_from_path_or_default(path)?;
        debug!("opened store at {}", path.display());
        Ok(Self { db })
    }
}

impl KeyValueStore for FileStore {
    fn list_keys(&self, prefix: &str) -> Vec<String> {
        self.db
            .read(|records| {
                records
                    .keys()
                    .filter(|k| k.starts_with(prefix))
                    .cloned()
                    .collect()
            })
            .unwrap_or_else(|e| {
                warn!("store read failed: {}", e);
                Vec::new()
            })
    }

    fn get_raw(&self, key: &str) -> Option<Value> {
        self.db.read(|records| records.get(key).cloned()).ok().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Record {
        id: String,
    }

    #[test]
    fn test_prefix_listing_and_typed_reads() {
        let store = MemoryStore::new();
        store.insert("BOOKMARK-2", json!({ "id": "b" }));
        store.insert("BOOKMARK-1", json!({ "id": "a" }));
        store.insert("VIEW_LST-1", json!({ "id": "v" }));
        store.insert("BOOKMARK-3", json!(42));

        assert_eq!(store.list_keys(BOOKMARK_KEY), vec!["BOOKMARK-1", "BOOKMARK-2", "BOOKMARK-3"]);
        assert_eq!(get_typed::<Record>(&store, "BOOKMARK-1"), Some(Record { id: "a".into() }));
        assert_eq!(get_typed::<Record>(&store, "BOOKMARK-3"), None);
        assert_eq!(get_typed::<Record>(&store, "missing"), None);
    }

    #[test]
    fn test_file_store() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("store.ron");
        {
            let db = FileDatabase::<Records, Ron>::load_from_path_or_default(&path)?;
            db.write(|records| {
                records.insert("VIEW_LST-9".into(), json!({ "id": "x", "pos": 30 }));
                records.insert("BOOKMARK-9".into(), json!({ "id": "9" }));
            })?;
            db.save()?;
        }

        let store = FileStore::open(&path)?;
        assert_eq!(store.list_keys(VIEW_LST_KEY), vec!["VIEW_LST-9"]);
        assert_eq!(get_typed::<Record>(&store, "BOOKMARK-9"), Some(Record { id: "9".into() }));

        let empty = FileStore::open(&dir.path().join("absent.ron"))?;
        assert!(empty.list_keys("").is_empty());
        assert!(empty.get_raw("BOOKMARK-9").is_none());
        Ok(())
    }
}
