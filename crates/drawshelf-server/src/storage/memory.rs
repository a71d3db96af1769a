//! In-memory storage.

use super::{BoxFuture, DrawingStorage, StorageError, StorageResult, new_id, sort_listing};
use dashmap::DashMap;
use drawshelf_core::model::{DrawingId, DrawingSummary, RepositoryRef};
use drawshelf_core::wire::DrawingContent;
use std::collections::HashMap;

/// Volatile storage, lost on restart.
pub struct MemoryStorage {
    repositories: Vec<RepositoryRef>,
    drawings: DashMap<String, HashMap<DrawingId, DrawingContent>>,
}

impl MemoryStorage {
    pub fn new(repositories: Vec<RepositoryRef>) -> Self {
        let drawings = DashMap::new();
        for repo in &repositories {
            drawings.insert(repo.name.clone(), HashMap::new());
        }
        Self {
            repositories,
            drawings,
        }
    }

    fn with_repo<T>(
        &self,
        repo: &str,
        f: impl FnOnce(&mut HashMap<DrawingId, DrawingContent>) -> StorageResult<T>,
    ) -> StorageResult<T> {
        let mut drawings = self
            .drawings
            .get_mut(repo)
            .ok_or_else(|| StorageError::UnknownRepository(repo.to_string()))?;
        f(drawings.value_mut())
    }
}

impl DrawingStorage for MemoryStorage {
    fn repositories(&self) -> &[RepositoryRef] {
        &self.repositories
    }

    fn list(&self, repo: &str) -> BoxFuture<'_, StorageResult<Vec<DrawingSummary>>> {
        let result = self.with_repo(repo, |drawings| {
            let mut listing: Vec<DrawingSummary> = drawings
                .iter()
                .map(|(id, content)| DrawingSummary::new(id.clone(), content.title.clone()))
                .collect();
            sort_listing(&mut listing);
            Ok(listing)
        });
        Box::pin(async move { result })
    }

    fn load(&self, repo: &str, id: &DrawingId) -> BoxFuture<'_, StorageResult<DrawingContent>> {
        let result = self.with_repo(repo, |drawings| {
            drawings
                .get(id)
                .cloned()
                .ok_or_else(|| StorageError::NotFound(id.to_string()))
        });
        Box::pin(async move { result })
    }

    fn create(&self, repo: &str, content: DrawingContent) -> BoxFuture<'_, StorageResult<DrawingId>> {
        let result = self.with_repo(repo, |drawings| {
            let id = new_id();
            drawings.insert(id.clone(), content);
            Ok(id)
        });
        Box::pin(async move { result })
    }

    fn replace(
        &self,
        repo: &str,
        id: &DrawingId,
        content: DrawingContent,
    ) -> BoxFuture<'_, StorageResult<()>> {
        let result = self.with_repo(repo, |drawings| {
            let slot = drawings
                .get_mut(id)
                .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
            *slot = content;
            Ok(())
        });
        Box::pin(async move { result })
    }

    fn rename(&self, repo: &str, id: &DrawingId, title: &str) -> BoxFuture<'_, StorageResult<()>> {
        let result = self.with_repo(repo, |drawings| {
            let slot = drawings
                .get_mut(id)
                .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
            slot.title = title.to_string();
            Ok(())
        });
        Box::pin(async move { result })
    }

    fn delete(&self, repo: &str, id: &DrawingId) -> BoxFuture<'_, StorageResult<()>> {
        let result = self.with_repo(repo, |drawings| {
            drawings.remove(id);
            Ok(())
        });
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_support::exercise;

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryStorage::new(vec![RepositoryRef::new("work", "Work")]);
        exercise(&storage).await;
    }

    #[tokio::test]
    async fn test_repositories_are_isolated() {
        let storage = MemoryStorage::new(vec![
            RepositoryRef::new("work", "Work"),
            RepositoryRef::new("play", "Play"),
        ]);
        let id = storage
            .create("work", crate::storage::test_support::content("Sketch"))
            .await
            .unwrap();

        assert!(storage.list("play").await.unwrap().is_empty());
        assert!(matches!(
            storage.load("play", &id).await,
            Err(StorageError::NotFound(_))
        ));
    }
}
