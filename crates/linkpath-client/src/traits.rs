use async_trait::async_trait;
use serde_json::Value;

use crate::error::ClientResult;

/// Raw object storage addressed by `@id`.
///
/// Returns `Ok(None)` if the identifier does not resolve and `Err` on
/// transport failure. Implementations are stateless per call and safe to
/// use from many concurrent fetches.
#[async_trait]
pub trait ObjectSource: Send + Sync {
    async fn fetch(&self, id: &str) -> ClientResult<Option<Value>>;
}
