use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{SchemaError, SchemaResult};
use crate::traits::{check_type_name, SchemaSource};

/// Schema source backed by a directory of `<TypeName>.json` files.
///
/// Files are read on demand; nothing is cached here. Put a
/// [`SchemaRegistry`](crate::SchemaRegistry) in front for memoization.
#[derive(Clone, Debug)]
pub struct DirectorySchemaSource {
    root: PathBuf,
}

impl DirectorySchemaSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Storage key for a type name.
    pub fn path_for(&self, type_name: &str) -> PathBuf {
        self.root.join(format!("{type_name}.json"))
    }
}

#[async_trait]
impl SchemaSource for DirectorySchemaSource {
    async fn fetch_schema(&self, type_name: &str) -> SchemaResult<Option<Value>> {
        check_type_name(type_name)?;
        let path = self.path_for(type_name);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SchemaError::Io(e)),
        };
        tracing::debug!(type_name, path = %path.display(), "read schema file");
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| SchemaError::malformed(type_name, e.to_string()))
    }
}
