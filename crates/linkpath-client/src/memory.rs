use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use linkpath_types::ID_KEY;

use crate::error::{ClientError, ClientResult};
use crate::traits::ObjectSource;

/// In-memory, HashMap-based object source.
///
/// Documents are keyed by their `@id` and cloned on fetch. Every fetch is
/// counted, which lets tests observe how many round-trips a caller made.
pub struct InMemoryObjectSource {
    documents: RwLock<HashMap<String, Value>>,
    fetches: AtomicU64,
}

impl InMemoryObjectSource {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            fetches: AtomicU64::new(0),
        }
    }

    /// Load every `*.json` file in `dir`.
    ///
    /// A file holds either one document or a JSON array of documents.
    pub fn load_dir(dir: &Path) -> ClientResult<Self> {
        let source = Self::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().map(|e| e != "json").unwrap_or(true) {
                continue;
            }
            let raw = std::fs::read_to_string(&path)?;
            let location = path.display().to_string();
            let parsed: Value =
                serde_json::from_str(&raw).map_err(|e| ClientError::malformed(&location, e))?;
            match parsed {
                Value::Array(documents) => {
                    for document in documents {
                        source.insert(document)?;
                    }
                }
                document => {
                    source.insert(document)?;
                }
            }
        }
        tracing::debug!(dir = %dir.display(), count = source.len(), "loaded object documents");
        Ok(source)
    }

    /// Store (or replace) a document under its `@id`. Returns the id.
    pub fn insert(&self, document: Value) -> ClientResult<String> {
        let id = document
            .get(ID_KEY)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ClientError::malformed("<unknown>", "document has no string `@id`"))?;
        self.documents
            .write()
            .expect("lock poisoned")
            .insert(id.clone(), document);
        Ok(id)
    }

    /// Remove a document. Returns `true` if it existed.
    pub fn remove(&self, id: &str) -> bool {
        self.documents
            .write()
            .expect("lock poisoned")
            .remove(id)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.documents.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().expect("lock poisoned").is_empty()
    }

    /// Sorted list of stored identifiers.
    pub fn ids(&self) -> Vec<String> {
        let map = self.documents.read().expect("lock poisoned");
        let mut ids: Vec<String> = map.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of `fetch` calls served so far.
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::Relaxed)
    }
}

impl Default for InMemoryObjectSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectSource for InMemoryObjectSource {
    async fn fetch(&self, id: &str) -> ClientResult<Option<Value>> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        let map = self.documents.read().expect("lock poisoned");
        Ok(map.get(id).cloned())
    }
}

impl std::fmt::Debug for InMemoryObjectSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryObjectSource")
            .field("object_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn insert_and_fetch() {
        let source = InMemoryObjectSource::new();
        let id = source
            .insert(json!({"@id": "/u/9", "@type": "User", "name": "Ada"}))
            .unwrap();
        assert_eq!(id, "/u/9");

        let doc = source.fetch("/u/9").await.unwrap().expect("should exist");
        assert_eq!(doc["name"], "Ada");
        assert!(source.fetch("/u/10").await.unwrap().is_none());
        assert_eq!(source.fetch_count(), 2);
    }

    #[test]
    fn insert_requires_id() {
        let source = InMemoryObjectSource::new();
        let err = source.insert(json!({"@type": "User"})).unwrap_err();
        assert!(matches!(err, ClientError::Malformed { .. }));
        assert!(source.is_empty());
    }

    #[test]
    fn remove_present_and_missing() {
        let source = InMemoryObjectSource::new();
        source.insert(json!({"@id": "/x/1", "@type": "Item"})).unwrap();
        assert!(source.remove("/x/1"));
        assert!(!source.remove("/x/1"));
    }

    #[test]
    fn load_dir_reads_single_and_array_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("item.json"),
            r#"{"@id":"/x/1","@type":"Item","owner":"/u/9"}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("users.json"),
            r#"[{"@id":"/u/9","@type":"User"},{"@id":"/u/10","@type":"User"}]"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let source = InMemoryObjectSource::load_dir(dir.path()).unwrap();
        assert_eq!(source.ids(), ["/u/10", "/u/9", "/x/1"]);
    }

    #[test]
    fn load_dir_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), "[").unwrap();
        assert!(InMemoryObjectSource::load_dir(dir.path()).is_err());
    }
}
