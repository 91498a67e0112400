use linkpath_client::ClientError;
use linkpath_schema::SchemaError;
use linkpath_types::PathError;

/// Errors from path resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The start id or path was rejected before any I/O.
    #[error("invalid path: {0}")]
    InvalidPath(#[from] PathError),

    /// The schema in scope declares no such field.
    #[error("type {type_name} has no field `{field}`")]
    UnknownField { type_name: String, field: String },

    /// The path continues past a scalar field.
    #[error("path continues past scalar field `{field}`")]
    PathTooLong { field: String },

    /// The schema declares the field but the document has no value for it.
    #[error("object {object} has no value for `{field}`")]
    MissingField { object: String, field: String },

    /// The value's JSON shape contradicts its declared kind.
    #[error("value of `{field}` is not {expected}")]
    ShapeMismatch {
        field: String,
        expected: &'static str,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Object(#[from] ClientError),
}

impl ResolveError {
    /// Returns `true` when a schema or object could not be found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Schema(e) => e.is_not_found(),
            Self::Object(e) => e.is_not_found(),
            _ => false,
        }
    }
}

/// Result alias for resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;
