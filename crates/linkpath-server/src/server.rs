use std::sync::Arc;

use tokio::net::TcpListener;

use linkpath_client::InMemoryObjectSource;
use linkpath_schema::DirectorySchemaSource;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::router::build_router;

/// Object and schema server.
pub struct LinkpathServer {
    config: ServerConfig,
    state: AppState,
}

impl LinkpathServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Serve objects loaded from `<data_root>/objects` and schemas read
    /// on demand from `<data_root>/schemas`.
    pub fn from_data_root(config: ServerConfig) -> ServerResult<Self> {
        let schemas_dir = config.schemas_dir();
        if !schemas_dir.is_dir() {
            return Err(ServerError::Config(format!(
                "schema directory {} does not exist",
                schemas_dir.display()
            )));
        }
        let objects = InMemoryObjectSource::load_dir(&config.objects_dir())?;
        tracing::info!(objects = objects.len(), data_root = %config.data_root.display(), "loaded data root");
        let state = AppState::new(
            Arc::new(objects),
            Arc::new(DirectorySchemaSource::new(schemas_dir)),
        );
        Ok(Self::new(config, state))
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Bind the configured address and serve until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("linkpath server listening on {}", self.config.bind_addr);
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::warn!(error = %e, "failed to listen for shutdown signal");
                }
            })
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }

    /// Serve on an already bound listener until the task is dropped.
    pub async fn serve_on(self, listener: TcpListener) -> ServerResult<()> {
        axum::serve(listener, self.router())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
