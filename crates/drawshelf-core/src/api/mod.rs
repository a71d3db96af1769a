//! Repository client: the HTTP API the drawing store talks to.

mod config;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod http;

#[cfg(target_arch = "wasm32")]
mod fetch;

pub use config::{ClientConfig, ConfigError, Endpoints, API_URL_ENV, DEFAULT_API_URL};
pub use memory::MemoryApi;

#[cfg(not(target_arch = "wasm32"))]
pub use http::HttpClient;

#[cfg(target_arch = "wasm32")]
pub use fetch::FetchClient;

use crate::model::{Drawing, DrawingId, DrawingSummary, RepositoryRef, SceneElement};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Repository client errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    /// The response body could not be understood.
    #[error("Decode error: {0}")]
    Decode(String),
    /// A full replace was requested for a drawing without an id.
    #[error("Drawing \"{0}\" has not been created yet")]
    NotCreated(String),
}

impl ApiError {
    /// Whether the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Http { status: 404, .. })
    }
}

/// Result type for repository client operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Client for the drawing repositories API.
///
/// Every operation is a single request without retry (deleting several
/// drawings issues one request per id and stops at the first failure).
///
/// Note: On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait DrawingApi: Send + Sync {
    /// List the repositories the server exposes.
    fn list_repositories(&self) -> BoxFuture<'_, ApiResult<Vec<RepositoryRef>>>;

    /// List the drawings of one repository.
    fn list_drawings(&self, repo: &str) -> BoxFuture<'_, ApiResult<Vec<DrawingSummary>>>;

    /// Fetch a drawing's content.
    fn fetch_drawing(&self, repo: &str, id: &DrawingId) -> BoxFuture<'_, ApiResult<Drawing>>;

    /// Create a drawing and return its new id.
    fn create_drawing(
        &self,
        repo: &str,
        title: &str,
        elements: &[SceneElement],
    ) -> BoxFuture<'_, ApiResult<DrawingId>>;

    /// Replace a persisted drawing's title and content.
    fn save_drawing(&self, drawing: &Drawing) -> BoxFuture<'_, ApiResult<()>>;

    /// Change a drawing's title.
    fn rename_drawing(&self, repo: &str, id: &DrawingId, title: &str) -> BoxFuture<'_, ApiResult<()>>;

    /// Delete drawings from a repository.
    fn delete_drawings(&self, repo: &str, ids: &[DrawingId]) -> BoxFuture<'_, ApiResult<()>>;
}

/// Client for the drawing repositories API (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait DrawingApi {
    /// List the repositories the server exposes.
    fn list_repositories(&self) -> BoxFuture<'_, ApiResult<Vec<RepositoryRef>>>;

    /// List the drawings of one repository.
    fn list_drawings(&self, repo: &str) -> BoxFuture<'_, ApiResult<Vec<DrawingSummary>>>;

    /// Fetch a drawing's content.
    fn fetch_drawing(&self, repo: &str, id: &DrawingId) -> BoxFuture<'_, ApiResult<Drawing>>;

    /// Create a drawing and return its new id.
    fn create_drawing(
        &self,
        repo: &str,
        title: &str,
        elements: &[SceneElement],
    ) -> BoxFuture<'_, ApiResult<DrawingId>>;

    /// Replace a persisted drawing's title and content.
    fn save_drawing(&self, drawing: &Drawing) -> BoxFuture<'_, ApiResult<()>>;

    /// Change a drawing's title.
    fn rename_drawing(&self, repo: &str, id: &DrawingId, title: &str) -> BoxFuture<'_, ApiResult<()>>;

    /// Delete drawings from a repository.
    fn delete_drawings(&self, repo: &str, ids: &[DrawingId]) -> BoxFuture<'_, ApiResult<()>>;
}
