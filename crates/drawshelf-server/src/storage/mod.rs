//! Drawing persistence behind the HTTP API.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use drawshelf_core::model::{DrawingId, DrawingSummary, RepositoryRef};
use drawshelf_core::wire::DrawingContent;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Drawing not found: {0}")]
    NotFound(String),
    #[error("Unknown repository: {0}")]
    UnknownRepository(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future that can cross threads, as axum handlers require.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Repositories of drawings.
///
/// The set of repositories is fixed at construction; every call naming
/// another repository fails with [`StorageError::UnknownRepository`].
pub trait DrawingStorage: Send + Sync {
    /// The configured repositories, in display order.
    fn repositories(&self) -> &[RepositoryRef];

    /// Listing of one repository, ordered by title then id.
    fn list(&self, repo: &str) -> BoxFuture<'_, StorageResult<Vec<DrawingSummary>>>;

    fn load(&self, repo: &str, id: &DrawingId) -> BoxFuture<'_, StorageResult<DrawingContent>>;

    /// Store a new drawing under a fresh id.
    fn create(&self, repo: &str, content: DrawingContent) -> BoxFuture<'_, StorageResult<DrawingId>>;

    /// Replace an existing drawing.
    fn replace(
        &self,
        repo: &str,
        id: &DrawingId,
        content: DrawingContent,
    ) -> BoxFuture<'_, StorageResult<()>>;

    /// Change the title, keeping the elements.
    fn rename(&self, repo: &str, id: &DrawingId, title: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// Remove a drawing. Removing a missing drawing succeeds.
    fn delete(&self, repo: &str, id: &DrawingId) -> BoxFuture<'_, StorageResult<()>>;
}

fn sort_listing(listing: &mut [DrawingSummary]) {
    listing.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
}

fn new_id() -> DrawingId {
    DrawingId::new(uuid::Uuid::new_v4().to_string())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use serde_json::json;

    pub fn content(title: &str) -> DrawingContent {
        DrawingContent {
            title: title.to_string(),
            elements: vec![json!({"type": "rectangle", "x": 1})],
        }
    }

    /// Behavior every backend shares.
    pub async fn exercise(storage: &dyn DrawingStorage) {
        let id = storage.create("work", content("Sketch")).await.unwrap();
        let other = storage.create("work", content("Alpha")).await.unwrap();
        assert_ne!(id, other);

        let titles: Vec<String> = storage
            .list("work")
            .await
            .unwrap()
            .into_iter()
            .map(|entry| entry.title)
            .collect();
        assert_eq!(titles, vec!["Alpha", "Sketch"]);

        let mut replacement = content("Sketch");
        replacement.elements.push(json!({"type": "text"}));
        storage.replace("work", &id, replacement.clone()).await.unwrap();
        assert_eq!(storage.load("work", &id).await.unwrap(), replacement);

        storage.rename("work", &id, "Renamed").await.unwrap();
        let loaded = storage.load("work", &id).await.unwrap();
        assert_eq!(loaded.title, "Renamed");
        assert_eq!(loaded.elements, replacement.elements);

        storage.delete("work", &id).await.unwrap();
        storage.delete("work", &id).await.unwrap();
        assert!(matches!(
            storage.load("work", &id).await,
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(
            storage.replace("work", &id, content("Ghost")).await,
            Err(StorageError::NotFound(_))
        ));

        assert!(matches!(
            storage.list("nope").await,
            Err(StorageError::UnknownRepository(_))
        ));
    }
}
