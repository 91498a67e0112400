use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handler::{self, AppState};

/// Build the axum router over the given sources.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .route("/_schemas/:file", get(handler::schema_handler))
        .fallback(handler::object_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
