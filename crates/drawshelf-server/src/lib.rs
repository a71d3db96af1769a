//! Drawshelf drawing repository server.
//!
//! ## API
//!
//! Repository names and drawing ids are base64url keys (no padding) in
//! paths and bodies.
//!
//! ```text
//! GET    /api/repositories                      -> [{name, label}]
//! GET    /api/repositories/{repo}/drawings      -> [{id, title}]
//! POST   /api/repositories/{repo}/drawings      {title, elements} -> 201 {id}
//! GET    /api/repositories/{repo}/drawings/{id} -> {id, title, elements}
//! PUT    /api/repositories/{repo}/drawings/{id} {title, elements} -> 204
//! PATCH  /api/repositories/{repo}/drawings/{id} {title} -> 204
//! DELETE /api/repositories/{repo}/drawings/{id} -> 204
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod storage;

use axum::Router;
use axum::routing::get;
use config::{ServerConfig, StorageConfig};
use std::sync::Arc;
use storage::{DrawingStorage, FileStorage, MemoryStorage, StorageResult};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the application router over a storage backend.
pub fn router(storage: Arc<dyn DrawingStorage>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/repositories", get(routes::list_repositories))
        .route(
            "/api/repositories/{repo}/drawings",
            get(routes::list_drawings).post(routes::create_drawing),
        )
        .route(
            "/api/repositories/{repo}/drawings/{id}",
            get(routes::get_drawing)
                .put(routes::replace_drawing)
                .patch(routes::rename_drawing)
                .delete(routes::delete_drawing),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(storage)
}

/// Create the storage backend the configuration asks for.
pub fn open_storage(config: &ServerConfig) -> StorageResult<Arc<dyn DrawingStorage>> {
    let repositories = config.repositories.clone();
    Ok(match &config.storage {
        StorageConfig::Memory => Arc::new(MemoryStorage::new(repositories)),
        StorageConfig::Directory(path) => Arc::new(FileStorage::new(path.clone(), repositories)?),
        StorageConfig::Default => Arc::new(FileStorage::default_location(repositories)?),
    })
}
