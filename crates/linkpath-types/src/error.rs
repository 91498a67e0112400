use thiserror::Error;

/// Errors produced while validating resolver input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("path is empty")]
    Empty,

    #[error("path segment {position} is empty")]
    EmptySegment { position: usize },

    #[error("object identifier is empty")]
    EmptyId,
}

/// Errors produced while interpreting a raw document as an object record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("document is not a JSON object")]
    NotAnObject,

    #[error("document has no string `{field}` field")]
    MissingReserved { field: &'static str },
}
