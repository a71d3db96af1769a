//! JSON bodies exchanged with the drawing server.
//!
//! Repository names and drawing ids are always base64url keys on the wire
//! (see [`crate::codec`]). Conversion to the plain model happens here, on
//! both sides of the connection.

use crate::codec::{CodecError, decode_key, encode_key};
use crate::model::{DrawingId, DrawingSummary, RepositoryRef, SceneElement};
use serde::{Deserialize, Serialize};

/// Repository entry of `GET /api/repositories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireRepository {
    pub name: String,
    pub label: String,
}

/// Listing entry of `GET /api/repositories/{repo}/drawings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireDrawingSummary {
    pub id: String,
    pub title: String,
}

/// Body of `GET /api/repositories/{repo}/drawings/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireDrawing {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub elements: Vec<SceneElement>,
}

/// Body of `POST` (create) and `PUT` (full replace).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingContent {
    pub title: String,
    #[serde(default)]
    pub elements: Vec<SceneElement>,
}

/// Response of `POST /api/repositories/{repo}/drawings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedDrawing {
    pub id: String,
}

/// Body of `PATCH /api/repositories/{repo}/drawings/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenameRequest {
    pub title: String,
}

/// Error body returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl WireRepository {
    pub fn encode(repo: &RepositoryRef) -> Self {
        Self {
            name: encode_key(&repo.name),
            label: repo.label.clone(),
        }
    }

    pub fn decode(&self) -> Result<RepositoryRef, CodecError> {
        Ok(RepositoryRef {
            name: decode_key(&self.name)?,
            label: self.label.clone(),
        })
    }
}

impl WireDrawingSummary {
    pub fn encode(summary: &DrawingSummary) -> Self {
        Self {
            id: encode_key(summary.id.as_str()),
            title: summary.title.clone(),
        }
    }

    pub fn decode(&self) -> Result<DrawingSummary, CodecError> {
        Ok(DrawingSummary {
            id: DrawingId::new(decode_key(&self.id)?),
            title: self.title.clone(),
        })
    }
}

/// Decode a repository listing, dropping entries whose key is corrupt.
pub fn decode_repositories(entries: &[WireRepository]) -> Vec<RepositoryRef> {
    entries
        .iter()
        .filter_map(|entry| match entry.decode() {
            Ok(repo) => Some(repo),
            Err(e) => {
                log::warn!("Discarding repository with undecodable name: {}", e);
                None
            }
        })
        .collect()
}

/// Decode a drawing listing, dropping entries whose id is corrupt.
pub fn decode_listing(entries: &[WireDrawingSummary]) -> Vec<DrawingSummary> {
    entries
        .iter()
        .filter_map(|entry| match entry.decode() {
            Ok(summary) => Some(summary),
            Err(e) => {
                log::warn!("Discarding listing entry with undecodable id: {}", e);
                None
            }
        })
        .collect()
}
