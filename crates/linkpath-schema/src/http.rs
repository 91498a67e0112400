use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{SchemaError, SchemaResult};
use crate::traits::{check_type_name, SchemaSource};

/// Schema source that fetches `GET <base>/<TypeName>.json`.
#[derive(Clone, Debug)]
pub struct HttpSchemaSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSchemaSource {
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

    /// URL of the schema document for a type name.
    pub fn url_for(&self, type_name: &str) -> String {
        format!("{}/{}.json", self.base_url, type_name)
    }
}

#[async_trait]
impl SchemaSource for HttpSchemaSource {
    async fn fetch_schema(&self, type_name: &str) -> SchemaResult<Option<Value>> {
        check_type_name(type_name)?;
        let url = self.url_for(type_name);
        tracing::debug!(type_name, %url, "fetching schema");

        let response = self.client.get(&url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => return Ok(None),
            status if !status.is_success() => {
                return Err(SchemaError::Transport(format!("GET {url} returned {status}")));
            }
            _ => {}
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| SchemaError::malformed(type_name, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_type() {
        let source = HttpSchemaSource::new("http://localhost:9999/_schemas/");
        assert_eq!(source.base_url(), "http://localhost:9999/_schemas");
        assert_eq!(
            source.url_for("User"),
            "http://localhost:9999/_schemas/User.json"
        );
    }

    #[tokio::test]
    async fn invalid_type_name_fails_before_any_request() {
        let source = HttpSchemaSource::new("http://127.0.0.1:9");
        let err = source.fetch_schema("a/b").await.unwrap_err();
        assert!(matches!(err, SchemaError::InvalidTypeName(_)));
    }
}
