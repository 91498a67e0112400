use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{SchemaError, SchemaResult};
use crate::traits::{check_type_name, SchemaSource};

/// In-memory, HashMap-based schema source.
///
/// Intended for tests, embedding and for serving a fixed set of schemas.
pub struct InMemorySchemaSource {
    documents: RwLock<HashMap<String, Value>>,
}

impl InMemorySchemaSource {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Load every `*.json` file in `dir`, keyed by file stem.
    pub fn load_dir(dir: &Path) -> SchemaResult<Self> {
        let source = Self::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().map(|e| e != "json").unwrap_or(true) {
                continue;
            }
            let Some(type_name) = path.file_stem().and_then(|s| s.to_str()) else {
                tracing::warn!("skipping schema file with non UTF-8 name {:?}", path);
                continue;
            };
            let raw = std::fs::read_to_string(&path)?;
            let document = serde_json::from_str(&raw)
                .map_err(|e| SchemaError::malformed(type_name, e.to_string()))?;
            source.insert(type_name, document);
        }
        Ok(source)
    }

    /// Store (or replace) the document for `type_name`.
    pub fn insert(&self, type_name: impl Into<String>, document: Value) {
        self.documents
            .write()
            .expect("lock poisoned")
            .insert(type_name.into(), document);
    }

    pub fn len(&self) -> usize {
        self.documents.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().expect("lock poisoned").is_empty()
    }

    /// Sorted list of stored type names.
    pub fn type_names(&self) -> Vec<String> {
        let map = self.documents.read().expect("lock poisoned");
        let mut names: Vec<String> = map.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for InMemorySchemaSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchemaSource for InMemorySchemaSource {
    async fn fetch_schema(&self, type_name: &str) -> SchemaResult<Option<Value>> {
        check_type_name(type_name)?;
        let map = self.documents.read().expect("lock poisoned");
        Ok(map.get(type_name).cloned())
    }
}

impl std::fmt::Debug for InMemorySchemaSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySchemaSource")
            .field("schema_count", &self.len())
            .finish()
    }
}
