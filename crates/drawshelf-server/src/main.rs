//! Drawshelf drawing repository server.
//!
//! Configured through the environment:
//! - `DRAWSHELF_ADDR`: listen address (default `0.0.0.0:3030`)
//! - `DRAWSHELF_DATA_DIR`: drawing directory, or `memory` (default: the
//!   platform data directory)
//! - `DRAWSHELF_REPOSITORIES`: `name=Label,...` (default `drawings=Drawings`)

use drawshelf_server::config::ServerConfig;
use drawshelf_server::storage::DrawingStorage;
use drawshelf_server::{open_storage, router};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drawshelf_server=info,drawshelf_core=info,tower_http=info".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let storage = open_storage(&config)?;
    let names: Vec<&str> = storage.repositories().iter().map(|r| r.name.as_str()).collect();
    info!("Serving repositories: {}", names.join(", "));
    info!("Storage: {:?}", config.storage);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("Drawshelf server listening on {}", config.addr);
    axum::serve(listener, router(storage)).await?;
    Ok(())
}
