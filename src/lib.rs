pub mod api;
pub mod config;
pub mod logic;
pub mod model;
pub mod store;

// Export API types
pub use api::handlers::{AppContext, AppState};
pub use api::routes::create_router;

// Export logic types
pub use logic::{BodyError, InvalidUrl, ResolvedRoute, UrlMap, ValidationError};

// Export all model types
pub use model::*;

// Export store types
pub use store::{MemoryStore, PostgresStore, Store};

use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::AppConfig;

/// Build the application router around an already-opened store.
pub fn build_app<S: Store + 'static>(store: S, urls: UrlMap) -> axum::Router {
    create_router().with_state(Arc::new(AppContext::new(store, urls)))
}

/// Serve until the listener fails.
pub async fn serve<S: Store + 'static>(
    listener: TcpListener,
    store: S,
    urls: UrlMap,
) -> anyhow::Result<()> {
    axum::serve(listener, build_app(store, urls)).await?;
    Ok(())
}

/// Open the configured store and serve on the configured address.
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    let urls = config.url_map()?;
    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    log::info!("Ownership registry listening on http://{}", bind_address);

    if config.database.in_memory {
        log::warn!("Using the in-memory store; data is lost on shutdown");
        return serve(listener, MemoryStore::new(), urls).await;
    }

    log::info!("Connecting to PostgreSQL...");
    let database_url = config.database_url()?;
    let postgres_store = PostgresStore::new(&database_url, config.max_connections()).await?;

    log::info!("Running database migrations...");
    postgres_store.migrate().await?;

    serve(listener, postgres_store, urls).await
}
