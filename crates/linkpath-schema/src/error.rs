/// Errors from schema lookup.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// No schema is stored for the type name.
    #[error("schema not found: {0}")]
    NotFound(String),

    /// The stored document does not describe a schema.
    #[error("malformed schema {type_name}: {reason}")]
    Malformed { type_name: String, reason: String },

    /// The type name cannot be used as a storage key.
    #[error("invalid type name: {0:?}")]
    InvalidTypeName(String),

    /// The remote schema store failed.
    #[error("schema transport error: {0}")]
    Transport(String),

    /// I/O error from a local schema store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SchemaError {
    pub(crate) fn malformed(type_name: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            type_name: type_name.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for [`SchemaError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<reqwest::Error> for SchemaError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Result alias for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;
