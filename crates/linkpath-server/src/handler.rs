use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Json, Response};
use serde_json::{json, Value};

use linkpath_client::{ClientError, ObjectSource};
use linkpath_schema::{SchemaError, SchemaSource};

/// Sources served by the router.
#[derive(Clone)]
pub struct AppState {
    pub objects: Arc<dyn ObjectSource>,
    pub schemas: Arc<dyn SchemaSource>,
}

impl AppState {
    pub fn new(objects: Arc<dyn ObjectSource>, schemas: Arc<dyn SchemaSource>) -> Self {
        Self { objects, schemas }
    }
}

/// Error response with a JSON body `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(what: impl std::fmt::Display) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("not found: {what}"))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        let status = match err {
            ClientError::NotFound(_) => StatusCode::NOT_FOUND,
            ClientError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl From<SchemaError> for ApiError {
    fn from(err: SchemaError) -> Self {
        let status = match err {
            SchemaError::NotFound(_) => StatusCode::NOT_FOUND,
            SchemaError::InvalidTypeName(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

/// Health check handler.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Info handler.
pub async fn info_handler() -> Json<Value> {
    Json(json!({
        "name": "linkpath-server",
        "version": env!("CARGO_PKG_VERSION"),
        "schemas": "/_schemas/<Type>.json",
    }))
}

/// `GET /_schemas/<Type>.json`.
pub async fn schema_handler(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let type_name = file
        .strip_suffix(".json")
        .ok_or_else(|| ApiError::not_found(&file))?;
    match state.schemas.fetch_schema(type_name).await? {
        Some(document) => Ok(Json(document)),
        None => Err(ApiError::not_found(format!("schema {type_name}"))),
    }
}

/// Any other path: the object whose `@id` is the request path.
pub async fn object_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Json<Value>, ApiError> {
    if method != Method::GET {
        return Err(ApiError::new(
            StatusCode::METHOD_NOT_ALLOWED,
            format!("{method} is not supported"),
        ));
    }
    let id = uri.path();
    tracing::debug!(id, "serving object");
    match state.objects.fetch(id).await? {
        Some(document) => Ok(Json(document)),
        None => Err(ApiError::not_found(id)),
    }
}
