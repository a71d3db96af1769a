//! HTTP handlers.
//!
//! Path segments and JSON keys are base64url keys; they are decoded here so
//! storage only ever sees plain names and ids.

use crate::error::ServerError;
use crate::storage::{DrawingStorage, StorageError};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use drawshelf_core::codec::{decode_key, encode_key};
use drawshelf_core::model::DrawingId;
use drawshelf_core::wire::{
    CreatedDrawing, DrawingContent, RenameRequest, WireDrawing, WireDrawingSummary, WireRepository,
};
use std::sync::Arc;
use tracing::info;

pub type AppState = Arc<dyn DrawingStorage>;

type HandlerResult<T> = Result<T, ServerError>;

/// Decode the repository segment and check that it is configured.
fn repo_param(storage: &dyn DrawingStorage, encoded: &str) -> HandlerResult<String> {
    let repo = decode_key(encoded)?;
    if !storage.repositories().iter().any(|r| r.name == repo) {
        return Err(StorageError::UnknownRepository(repo).into());
    }
    Ok(repo)
}

fn drawing_params(storage: &dyn DrawingStorage, repo: &str, id: &str) -> HandlerResult<(String, DrawingId)> {
    Ok((repo_param(storage, repo)?, DrawingId::new(decode_key(id)?)))
}

/// Health check
pub async fn health() -> &'static str {
    "ok"
}

pub async fn list_repositories(State(storage): State<AppState>) -> Json<Vec<WireRepository>> {
    Json(storage.repositories().iter().map(WireRepository::encode).collect())
}

pub async fn list_drawings(
    State(storage): State<AppState>,
    Path(repo): Path<String>,
) -> HandlerResult<Json<Vec<WireDrawingSummary>>> {
    let repo = repo_param(storage.as_ref(), &repo)?;
    let listing = storage.list(&repo).await?;
    Ok(Json(listing.iter().map(WireDrawingSummary::encode).collect()))
}

pub async fn create_drawing(
    State(storage): State<AppState>,
    Path(repo): Path<String>,
    Json(content): Json<DrawingContent>,
) -> HandlerResult<(StatusCode, Json<CreatedDrawing>)> {
    let repo = repo_param(storage.as_ref(), &repo)?;
    let title = content.title.clone();
    let id = storage.create(&repo, content).await?;
    info!("Created drawing {} \"{}\" in {}", id, title, repo);
    Ok((
        StatusCode::CREATED,
        Json(CreatedDrawing {
            id: encode_key(id.as_str()),
        }),
    ))
}

pub async fn get_drawing(
    State(storage): State<AppState>,
    Path((repo, id)): Path<(String, String)>,
) -> HandlerResult<Json<WireDrawing>> {
    let (repo, id) = drawing_params(storage.as_ref(), &repo, &id)?;
    let content = storage.load(&repo, &id).await?;
    Ok(Json(WireDrawing {
        id: encode_key(id.as_str()),
        title: content.title,
        elements: content.elements,
    }))
}

pub async fn replace_drawing(
    State(storage): State<AppState>,
    Path((repo, id)): Path<(String, String)>,
    Json(content): Json<DrawingContent>,
) -> HandlerResult<StatusCode> {
    let (repo, id) = drawing_params(storage.as_ref(), &repo, &id)?;
    let elements = content.elements.len();
    storage.replace(&repo, &id, content).await?;
    info!("Saved drawing {} in {} ({} elements)", id, repo, elements);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn rename_drawing(
    State(storage): State<AppState>,
    Path((repo, id)): Path<(String, String)>,
    Json(request): Json<RenameRequest>,
) -> HandlerResult<StatusCode> {
    let (repo, id) = drawing_params(storage.as_ref(), &repo, &id)?;
    storage.rename(&repo, &id, &request.title).await?;
    info!("Renamed drawing {} in {} to \"{}\"", id, repo, request.title);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_drawing(
    State(storage): State<AppState>,
    Path((repo, id)): Path<(String, String)>,
) -> HandlerResult<StatusCode> {
    let (repo, id) = drawing_params(storage.as_ref(), &repo, &id)?;
    storage.delete(&repo, &id).await?;
    info!("Deleted drawing {} from {}", id, repo);
    Ok(StatusCode::NO_CONTENT)
}
