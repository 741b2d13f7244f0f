use std::sync::Arc;

use tokio::net::TcpListener;

use flavorhub_service::RecipeService;
use flavorhub_store::{InMemoryRecipeStore, JsonFileRecipeStore, RecipeStore};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::{build_router, build_router_with_cors};

/// FlavorHub HTTP server.
pub struct FlavorHubServer {
    config: ServerConfig,
    service: Arc<RecipeService>,
}

impl FlavorHubServer {
    pub fn new(config: ServerConfig, service: Arc<RecipeService>) -> Self {
        Self { config, service }
    }

    /// Open the store named by `config` and build a server around it.
    pub fn from_config(config: ServerConfig) -> ServerResult<Self> {
        let store: Arc<dyn RecipeStore> = match &config.data_file {
            Some(path) => {
                tracing::info!(path = %path.display(), "using JSON file store");
                Arc::new(JsonFileRecipeStore::open(path)?)
            }
            None => {
                tracing::info!("using in-memory store");
                Arc::new(InMemoryRecipeStore::new())
            }
        };
        let service = Arc::new(RecipeService::with_config(store, config.service_config()));
        Ok(Self::new(config, service))
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn service(&self) -> &Arc<RecipeService> {
        &self.service
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        let state = Arc::clone(&self.service);
        if self.config.allow_cors {
            build_router_with_cors(state)
        } else {
            build_router(state)
        }
    }

    /// Start serving requests until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("FlavorHub server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
