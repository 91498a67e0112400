use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use crate::traits::ObjectSource;

/// Object source that fetches `GET <base><id>`.
///
/// Identifiers are path-like (`/x/1`) and are appended to the base URL as
/// they are. A `/` is inserted when the identifier does not start with one.
#[derive(Clone, Debug)]
pub struct HttpObjectSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpObjectSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the document for an identifier.
    pub fn url_for(&self, id: &str) -> String {
        if id.starts_with('/') {
            format!("{}{}", self.base_url, id)
        } else {
            format!("{}/{}", self.base_url, id)
        }
    }
}

#[async_trait]
impl ObjectSource for HttpObjectSource {
    async fn fetch(&self, id: &str) -> ClientResult<Option<Value>> {
        let url = self.url_for(id);
        tracing::debug!(id, %url, "fetching object");

        let response = self.client.get(&url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => return Ok(None),
            status if !status.is_success() => {
                return Err(ClientError::Transport(format!("GET {url} returned {status}")));
            }
            _ => {}
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| ClientError::malformed(id, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_ids_are_appended() {
        let source = HttpObjectSource::new("http://localhost:9999/");
        assert_eq!(source.base_url(), "http://localhost:9999");
        assert_eq!(source.url_for("/x/1"), "http://localhost:9999/x/1");
    }

    #[test]
    fn relative_ids_get_a_separator() {
        let source = HttpObjectSource::new("http://localhost:9999/api");
        assert_eq!(source.url_for("x/1"), "http://localhost:9999/api/x/1");
    }
}
