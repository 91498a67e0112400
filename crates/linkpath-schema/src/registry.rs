use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use linkpath_types::{Memo, Schema};

use crate::error::{SchemaError, SchemaResult};
use crate::parse::parse_schema;
use crate::traits::SchemaSource;

/// Memoizing schema registry.
///
/// Construct one per process or session and share it behind an `Arc`.
/// Schemas are assumed few and stable: entries are never evicted.
pub struct SchemaRegistry {
    source: Arc<dyn SchemaSource>,
    cache: Memo<Arc<Schema>>,
    fetches: AtomicU64,
}

impl SchemaRegistry {
    pub fn new(source: Arc<dyn SchemaSource>) -> Self {
        Self {
            source,
            cache: Memo::new(),
            fetches: AtomicU64::new(0),
        }
    }

    /// Schema for `type_name`, fetching and parsing it on first use.
    pub async fn get(&self, type_name: &str) -> SchemaResult<Arc<Schema>> {
        self.cache
            .get_or_try_init(type_name, || self.load(type_name))
            .await
    }

    async fn load(&self, type_name: &str) -> SchemaResult<Arc<Schema>> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(type_name, "schema cache miss");
        let document = self
            .source
            .fetch_schema(type_name)
            .await?
            .ok_or_else(|| SchemaError::NotFound(type_name.to_string()))?;
        parse_schema(type_name, &document).map(Arc::new)
    }

    /// The cached schema for `type_name`, without fetching.
    pub fn cached(&self, type_name: &str) -> Option<Arc<Schema>> {
        self.cache.get(type_name)
    }

    /// Sorted type names currently cached.
    pub fn cached_types(&self) -> Vec<String> {
        self.cache.keys()
    }

    /// Number of fetches issued to the underlying source.
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("cached", &self.cache.len())
            .field("fetches", &self.fetch_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemorySchemaSource;
    use linkpath_types::FieldSchema;
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        let source = InMemorySchemaSource::new();
        source.insert("User", json!({ "name": {} }));
        source.insert("Item", json!({ "owner": { "linkTo": "User" } }));
        source.insert("Broken", json!({ "tags": { "type": "array" } }));
        SchemaRegistry::new(Arc::new(source))
    }

    #[tokio::test]
    async fn get_parses_schema() {
        let registry = registry();
        let schema = registry.get("Item").await.unwrap();
        assert_eq!(schema.type_name(), "Item");
        assert_eq!(schema.field("owner"), Some(&FieldSchema::link("User")));
    }

    #[tokio::test]
    async fn repeated_gets_fetch_once() {
        let registry = registry();
        let first = registry.get("User").await.unwrap();
        let second = registry.get("User").await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.fetch_count(), 1);

        registry.get("Item").await.unwrap();
        assert_eq!(registry.fetch_count(), 2);
        assert_eq!(registry.cached_types(), ["Item", "User"]);
    }

    #[tokio::test]
    async fn concurrent_first_gets_fetch_once() {
        let registry = Arc::new(registry());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = Arc::clone(&registry);
                tokio::spawn(async move { registry.get("User").await.map(|_| ()) })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(registry.fetch_count(), 1);
    }

    #[tokio::test]
    async fn missing_schema_is_not_found() {
        let registry = registry();
        let err = registry.get("Ghost").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(registry.cached("Ghost").is_none());
    }

    #[tokio::test]
    async fn malformed_schema_is_reported() {
        let registry = registry();
        let err = registry.get("Broken").await.unwrap_err();
        assert!(matches!(err, SchemaError::Malformed { ref type_name, .. } if type_name == "Broken"));
    }

    #[tokio::test]
    async fn failures_are_retried() {
        let registry = registry();
        registry.get("Ghost").await.unwrap_err();
        registry.get("Ghost").await.unwrap_err();
        assert_eq!(registry.fetch_count(), 2);
    }
}
