//! HTTP server for linked objects.
//!
//! Serves any [`ObjectSource`](linkpath_client::ObjectSource) at the path
//! equal to each object's `@id`, and any
//! [`SchemaSource`](linkpath_schema::SchemaSource) under `/_schemas/`, so
//! the HTTP sources in `linkpath-client` and `linkpath-schema` can crawl it.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::{ApiError, AppState};
pub use server::LinkpathServer;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use linkpath_client::InMemoryObjectSource;
    use linkpath_schema::InMemorySchemaSource;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn app() -> axum::Router {
        let objects = InMemoryObjectSource::new();
        objects
            .insert(json!({ "@id": "/u/9", "@type": "User", "name": "Ada" }))
            .unwrap();
        let schemas = InMemorySchemaSource::new();
        schemas.insert("User", json!({ "name": {} }));
        router::build_router(AppState::new(Arc::new(objects), Arc::new(schemas)))
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        request(Method::GET, uri).await
    }

    async fn request(method: Method, uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (status, body) = get("/v1/health").await;
        assert_eq!(status, 200);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn info_endpoint() {
        let (status, body) = get("/v1/info").await;
        assert_eq!(status, 200);
        assert_eq!(body["name"], "linkpath-server");
    }

    #[tokio::test]
    async fn object_at_its_id() {
        let (status, body) = get("/u/9").await;
        assert_eq!(status, 200);
        assert_eq!(body["name"], "Ada");
    }

    #[tokio::test]
    async fn unknown_object_is_404_json() {
        let (status, body) = get("/u/404").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("/u/404"));
    }

    #[tokio::test]
    async fn schema_document() {
        let (status, body) = get("/_schemas/User.json").await;
        assert_eq!(status, 200);
        assert_eq!(body, json!({ "name": {} }));

        let (status, _) = get("/_schemas/Ghost.json").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = get("/_schemas/User").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_type_name_is_bad_request() {
        let (status, _) = get("/_schemas/...json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_get_is_rejected() {
        let (status, _) = request(Method::POST, "/u/9").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
