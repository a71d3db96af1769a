//! File-based storage.

use super::{BoxFuture, DrawingStorage, StorageError, StorageResult, new_id, sort_listing};
use drawshelf_core::codec::{decode_key, encode_key};
use drawshelf_core::model::{DrawingId, DrawingSummary, RepositoryRef};
use drawshelf_core::wire::DrawingContent;
use std::fs;
use std::path::{Path, PathBuf};

/// Stores each drawing as a JSON file.
///
/// Layout: `<base>/<repo key>/<id key>.json`, where keys are the base64url
/// encodings used on the wire, so any name is a safe file name.
pub struct FileStorage {
    base_path: PathBuf,
    repositories: Vec<RepositoryRef>,
}

impl FileStorage {
    /// Create storage under `base_path`, creating one directory per
    /// repository.
    pub fn new(base_path: PathBuf, repositories: Vec<RepositoryRef>) -> StorageResult<Self> {
        for repo in &repositories {
            let dir = base_path.join(encode_key(&repo.name));
            fs::create_dir_all(&dir).map_err(|e| {
                StorageError::Io(format!("Failed to create {}: {}", dir.display(), e))
            })?;
        }
        Ok(Self {
            base_path,
            repositories,
        })
    }

    /// Storage in the platform data directory.
    ///
    /// On Linux: `~/.local/share/drawshelf/drawings/`
    pub fn default_location(repositories: Vec<RepositoryRef>) -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;
        Self::new(base.join("drawshelf").join("drawings"), repositories)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn repo_dir(&self, repo: &str) -> StorageResult<PathBuf> {
        if !self.repositories.iter().any(|r| r.name == repo) {
            return Err(StorageError::UnknownRepository(repo.to_string()));
        }
        Ok(self.base_path.join(encode_key(repo)))
    }

    fn drawing_path(&self, repo: &str, id: &DrawingId) -> StorageResult<PathBuf> {
        Ok(self
            .repo_dir(repo)?
            .join(format!("{}.json", encode_key(id.as_str()))))
    }
}

fn read_content(path: &Path, id: &DrawingId) -> StorageResult<DrawingContent> {
    if !path.exists() {
        return Err(StorageError::NotFound(id.to_string()));
    }
    let json = fs::read_to_string(path)
        .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&json).map_err(|e| {
        StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
    })
}

fn write_content(path: &Path, content: &DrawingContent) -> StorageResult<()> {
    let json = serde_json::to_string(content)
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    fs::write(path, json)
        .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))
}

impl DrawingStorage for FileStorage {
    fn repositories(&self) -> &[RepositoryRef] {
        &self.repositories
    }

    fn list(&self, repo: &str) -> BoxFuture<'_, StorageResult<Vec<DrawingSummary>>> {
        let dir = self.repo_dir(repo);
        Box::pin(async move {
            let dir = dir?;
            let entries = fs::read_dir(&dir).map_err(|e| {
                StorageError::Io(format!("Failed to read {}: {}", dir.display(), e))
            })?;

            let mut listing = Vec::new();
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_none_or(|ext| ext != "json") {
                    continue;
                }
                let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                let id = match decode_key(stem) {
                    Ok(id) => DrawingId::new(id),
                    Err(e) => {
                        tracing::warn!("Skipping {}: {}", path.display(), e);
                        continue;
                    }
                };
                match read_content(&path, &id) {
                    Ok(content) => listing.push(DrawingSummary::new(id, content.title)),
                    Err(e) => tracing::warn!("Skipping {}: {}", path.display(), e),
                }
            }
            sort_listing(&mut listing);
            Ok(listing)
        })
    }

    fn load(&self, repo: &str, id: &DrawingId) -> BoxFuture<'_, StorageResult<DrawingContent>> {
        let path = self.drawing_path(repo, id);
        let id = id.clone();
        Box::pin(async move { read_content(&path?, &id) })
    }

    fn create(&self, repo: &str, content: DrawingContent) -> BoxFuture<'_, StorageResult<DrawingId>> {
        let id = new_id();
        let path = self.drawing_path(repo, &id);
        Box::pin(async move {
            write_content(&path?, &content)?;
            Ok(id)
        })
    }

    fn replace(
        &self,
        repo: &str,
        id: &DrawingId,
        content: DrawingContent,
    ) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.drawing_path(repo, id);
        let id = id.clone();
        Box::pin(async move {
            let path = path?;
            if !path.exists() {
                return Err(StorageError::NotFound(id.to_string()));
            }
            write_content(&path, &content)
        })
    }

    fn rename(&self, repo: &str, id: &DrawingId, title: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.drawing_path(repo, id);
        let id = id.clone();
        let title = title.to_string();
        Box::pin(async move {
            let path = path?;
            let mut content = read_content(&path, &id)?;
            content.title = title;
            write_content(&path, &content)
        })
    }

    fn delete(&self, repo: &str, id: &DrawingId) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.drawing_path(repo, id);
        Box::pin(async move {
            let path = path?;
            if path.exists() {
                fs::remove_file(&path).map_err(|e| {
                    StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
                })?;
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_support::{content, exercise};
    use tempfile::tempdir;

    fn repos() -> Vec<RepositoryRef> {
        vec![RepositoryRef::new("work", "Work")]
    }

    #[tokio::test]
    async fn test_file_storage() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf(), repos()).unwrap();
        exercise(&storage).await;
    }

    #[tokio::test]
    async fn test_drawings_survive_reopen() {
        let dir = tempdir().unwrap();
        let id = {
            let storage = FileStorage::new(dir.path().to_path_buf(), repos()).unwrap();
            storage.create("work", content("Sketch")).await.unwrap()
        };

        let storage = FileStorage::new(dir.path().to_path_buf(), repos()).unwrap();
        assert_eq!(storage.load("work", &id).await.unwrap().title, "Sketch");
    }

    #[tokio::test]
    async fn test_foreign_files_are_skipped() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf(), repos()).unwrap();
        storage.create("work", content("Sketch")).await.unwrap();

        let repo_dir = dir.path().join(encode_key("work"));
        fs::write(repo_dir.join("notes.txt"), "hello").unwrap();
        fs::write(repo_dir.join("!!!.json"), "{}").unwrap();
        fs::write(repo_dir.join(format!("{}.json", encode_key("broken"))), "not json").unwrap();

        let listing = storage.list("work").await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].title, "Sketch");
    }
}
