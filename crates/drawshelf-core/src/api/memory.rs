//! In-memory repository client.

use super::{ApiError, ApiResult, BoxFuture, DrawingApi};
use crate::model::{Drawing, DrawingId, DrawingSummary, RepositoryRef, SceneElement};
use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct StoredDrawing {
    title: String,
    elements: Vec<SceneElement>,
}

#[derive(Debug, Default)]
struct Repository {
    label: String,
    drawings: BTreeMap<DrawingId, StoredDrawing>,
}

/// In-memory repositories for testing and ephemeral use.
///
/// Mirrors the server's semantics: unknown repositories and drawings answer
/// 404, deletes are idempotent, listings are ordered by title.
#[derive(Default)]
pub struct MemoryApi {
    repositories: RwLock<Vec<(String, Repository)>>,
    offline: AtomicBool,
}

impl MemoryApi {
    /// Create an API with no repositories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty repository.
    pub fn with_repository(self, name: &str, label: &str) -> Self {
        if let Ok(mut repos) = self.repositories.write() {
            if !repos.iter().any(|(n, _)| n == name) {
                repos.push((
                    name.to_string(),
                    Repository {
                        label: label.to_string(),
                        drawings: BTreeMap::new(),
                    },
                ));
            }
        }
        self
    }

    /// Add a drawing with a known id, creating the repository if needed.
    pub fn with_drawing(
        self,
        repo: &str,
        id: &str,
        title: &str,
        elements: Vec<SceneElement>,
    ) -> Self {
        let this = self.with_repository(repo, repo);
        if let Ok(mut repos) = this.repositories.write() {
            if let Some((_, repository)) = repos.iter_mut().find(|(n, _)| n == repo) {
                repository.drawings.insert(
                    DrawingId::new(id),
                    StoredDrawing {
                        title: title.to_string(),
                        elements,
                    },
                );
            }
        }
        this
    }

    /// Make every request fail with a transport error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> ApiResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(ApiError::Transport("Connection refused".to_string()))
        } else {
            Ok(())
        }
    }

    fn with_repo<T>(&self, repo: &str, f: impl FnOnce(&mut Repository) -> ApiResult<T>) -> ApiResult<T> {
        self.check_online()?;
        let mut repos = self
            .repositories
            .write()
            .map_err(|e| ApiError::Transport(format!("Lock error: {}", e)))?;
        let (_, repository) = repos
            .iter_mut()
            .find(|(name, _)| name == repo)
            .ok_or_else(|| not_found(format!("Unknown repository: {}", repo)))?;
        f(repository)
    }
}

fn not_found(body: String) -> ApiError {
    ApiError::Http { status: 404, body }
}

impl DrawingApi for MemoryApi {
    fn list_repositories(&self) -> BoxFuture<'_, ApiResult<Vec<RepositoryRef>>> {
        Box::pin(async move {
            self.check_online()?;
            let repos = self
                .repositories
                .read()
                .map_err(|e| ApiError::Transport(format!("Lock error: {}", e)))?;
            Ok(repos
                .iter()
                .map(|(name, repo)| RepositoryRef::new(name.clone(), repo.label.clone()))
                .collect())
        })
    }

    fn list_drawings(&self, repo: &str) -> BoxFuture<'_, ApiResult<Vec<DrawingSummary>>> {
        let repo = repo.to_string();
        Box::pin(async move {
            self.with_repo(&repo, |repository| {
                let mut listing: Vec<DrawingSummary> = repository
                    .drawings
                    .iter()
                    .map(|(id, drawing)| DrawingSummary::new(id.clone(), drawing.title.clone()))
                    .collect();
                listing.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
                Ok(listing)
            })
        })
    }

    fn fetch_drawing(&self, repo: &str, id: &DrawingId) -> BoxFuture<'_, ApiResult<Drawing>> {
        let repo = repo.to_string();
        let id = id.clone();
        Box::pin(async move {
            self.with_repo(&repo, |repository| {
                let stored = repository
                    .drawings
                    .get(&id)
                    .ok_or_else(|| not_found(format!("Drawing not found: {}", id)))?;
                Ok(Drawing {
                    repo: repo.clone(),
                    id: Some(id.clone()),
                    title: stored.title.clone(),
                    elements: stored.elements.clone(),
                })
            })
        })
    }

    fn create_drawing(
        &self,
        repo: &str,
        title: &str,
        elements: &[SceneElement],
    ) -> BoxFuture<'_, ApiResult<DrawingId>> {
        let repo = repo.to_string();
        let stored = StoredDrawing {
            title: title.to_string(),
            elements: elements.to_vec(),
        };
        Box::pin(async move {
            self.with_repo(&repo, |repository| {
                let id = DrawingId::new(Uuid::new_v4().to_string());
                repository.drawings.insert(id.clone(), stored);
                Ok(id)
            })
        })
    }

    fn save_drawing(&self, drawing: &Drawing) -> BoxFuture<'_, ApiResult<()>> {
        let drawing = drawing.clone();
        Box::pin(async move {
            let id = drawing
                .id
                .clone()
                .ok_or_else(|| ApiError::NotCreated(drawing.title.clone()))?;
            self.with_repo(&drawing.repo, |repository| {
                let stored = repository
                    .drawings
                    .get_mut(&id)
                    .ok_or_else(|| not_found(format!("Drawing not found: {}", id)))?;
                stored.title = drawing.title.clone();
                stored.elements = drawing.elements.clone();
                Ok(())
            })
        })
    }

    fn rename_drawing(&self, repo: &str, id: &DrawingId, title: &str) -> BoxFuture<'_, ApiResult<()>> {
        let repo = repo.to_string();
        let id = id.clone();
        let title = title.to_string();
        Box::pin(async move {
            self.with_repo(&repo, |repository| {
                let stored = repository
                    .drawings
                    .get_mut(&id)
                    .ok_or_else(|| not_found(format!("Drawing not found: {}", id)))?;
                stored.title = title;
                Ok(())
            })
        })
    }

    fn delete_drawings(&self, repo: &str, ids: &[DrawingId]) -> BoxFuture<'_, ApiResult<()>> {
        let repo = repo.to_string();
        let ids = ids.to_vec();
        Box::pin(async move {
            self.with_repo(&repo, |repository| {
                for id in &ids {
                    repository.drawings.remove(id);
                }
                Ok(())
            })
        })
    }
}
