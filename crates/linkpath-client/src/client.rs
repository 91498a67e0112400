use std::sync::Arc;
use std::time::Duration;

use linkpath_types::ObjectRecord;

use crate::error::{ClientError, ClientResult};
use crate::traits::ObjectSource;

/// Default per-fetch timeout.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches and validates object records.
///
/// Each call goes to the source; there is no cache. Callers that want one
/// wrap the source or memoize results themselves.
#[derive(Clone)]
pub struct ObjectClient {
    source: Arc<dyn ObjectSource>,
    timeout: Duration,
}

impl ObjectClient {
    pub fn new(source: Arc<dyn ObjectSource>) -> Self {
        Self {
            source,
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Override the per-fetch timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch the object with identifier `id`.
    pub async fn get(&self, id: &str) -> ClientResult<Arc<ObjectRecord>> {
        let fetched = tokio::time::timeout(self.timeout, self.source.fetch(id))
            .await
            .map_err(|_| ClientError::Timeout {
                id: id.to_string(),
                after: self.timeout,
            })??;
        let document = fetched.ok_or_else(|| ClientError::NotFound(id.to_string()))?;
        let record =
            ObjectRecord::from_value(document).map_err(|e| ClientError::from_record(id, e))?;
        if record.id() != id {
            tracing::debug!(
                requested = id,
                returned = record.id(),
                "object returned under a different @id"
            );
        }
        Ok(Arc::new(record))
    }
}

impl std::fmt::Debug for ObjectClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectClient")
            .field("timeout", &self.timeout)
            .finish()
    }
}
