use std::time::Duration;

use linkpath_types::RecordError;

/// Errors from object fetches.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// No object has the requested identifier.
    #[error("object not found: {0}")]
    NotFound(String),

    /// The fetched document is not a valid object record.
    #[error("malformed object {id}: {reason}")]
    Malformed { id: String, reason: String },

    /// The fetch did not complete in time.
    #[error("fetch of {id} timed out after {after:?}")]
    Timeout { id: String, after: Duration },

    /// The remote object store failed.
    #[error("object transport error: {0}")]
    Transport(String),

    /// I/O error from a local object store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub(crate) fn malformed(id: &str, reason: impl ToString) -> Self {
        Self::Malformed {
            id: id.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn from_record(id: &str, err: RecordError) -> Self {
        Self::malformed(id, err)
    }

    /// Returns `true` for [`ClientError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Result alias for object client operations.
pub type ClientResult<T> = Result<T, ClientError>;
