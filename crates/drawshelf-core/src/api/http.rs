//! Blocking HTTP client for native platforms.

use super::{ApiError, ApiResult, BoxFuture, ClientConfig, DrawingApi, Endpoints};
use crate::codec::decode_key;
use crate::model::{Drawing, DrawingId, DrawingSummary, RepositoryRef, SceneElement};
use crate::wire::{
    CreatedDrawing, DrawingContent, RenameRequest, WireDrawing, WireDrawingSummary,
    WireRepository, decode_listing, decode_repositories,
};
use serde::de::DeserializeOwned;

/// HTTP repository client for native platforms.
///
/// Requests run on the calling thread inside the returned future; the
/// transport's default timeouts apply.
pub struct HttpClient {
    agent: ureq::Agent,
    endpoints: Endpoints,
}

impl HttpClient {
    /// Create a client for the given configuration.
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            endpoints: config.endpoints(),
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        log::debug!("GET {}", url);
        let response = self.agent.get(url).call().map_err(ApiError::from)?;
        response
            .into_json::<T>()
            .map_err(|e| ApiError::Decode(format!("{}: {}", url, e)))
    }
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => ApiError::Http {
                status,
                body: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => ApiError::Transport(transport.to_string()),
        }
    }
}

impl DrawingApi for HttpClient {
    fn list_repositories(&self) -> BoxFuture<'_, ApiResult<Vec<RepositoryRef>>> {
        let url = self.endpoints.repositories();
        Box::pin(async move {
            let entries: Vec<WireRepository> = self.get_json(&url)?;
            Ok(decode_repositories(&entries))
        })
    }

    fn list_drawings(&self, repo: &str) -> BoxFuture<'_, ApiResult<Vec<DrawingSummary>>> {
        let url = self.endpoints.drawings(repo);
        Box::pin(async move {
            let entries: Vec<WireDrawingSummary> = self.get_json(&url)?;
            Ok(decode_listing(&entries))
        })
    }

    fn fetch_drawing(&self, repo: &str, id: &DrawingId) -> BoxFuture<'_, ApiResult<Drawing>> {
        let url = self.endpoints.drawing(repo, id);
        let repo = repo.to_string();
        Box::pin(async move {
            log::info!("Fetching drawing {}", url);
            let wire: WireDrawing = self.get_json(&url)?;
            let id = decode_key(&wire.id).map_err(|e| ApiError::Decode(e.to_string()))?;
            Ok(Drawing {
                repo,
                id: Some(DrawingId::new(id)),
                title: wire.title,
                elements: wire.elements,
            })
        })
    }

    fn create_drawing(
        &self,
        repo: &str,
        title: &str,
        elements: &[SceneElement],
    ) -> BoxFuture<'_, ApiResult<DrawingId>> {
        let url = self.endpoints.drawings(repo);
        let body = DrawingContent {
            title: title.to_string(),
            elements: elements.to_vec(),
        };
        Box::pin(async move {
            log::info!("Creating drawing \"{}\" with {} elements", body.title, body.elements.len());
            let response = self.agent.post(&url).send_json(&body).map_err(ApiError::from)?;
            let created: CreatedDrawing = response
                .into_json()
                .map_err(|e| ApiError::Decode(e.to_string()))?;
            let id = decode_key(&created.id).map_err(|e| ApiError::Decode(e.to_string()))?;
            Ok(DrawingId::new(id))
        })
    }

    fn save_drawing(&self, drawing: &Drawing) -> BoxFuture<'_, ApiResult<()>> {
        let Some(id) = drawing.id.as_ref() else {
            let err = ApiError::NotCreated(drawing.title.clone());
            return Box::pin(async move { Err(err) });
        };
        let url = self.endpoints.drawing(&drawing.repo, id);
        let body = DrawingContent {
            title: drawing.title.clone(),
            elements: drawing.elements.clone(),
        };
        Box::pin(async move {
            log::info!("Saving drawing \"{}\" with {} elements", body.title, body.elements.len());
            self.agent.put(&url).send_json(&body).map_err(ApiError::from)?;
            Ok(())
        })
    }

    fn rename_drawing(&self, repo: &str, id: &DrawingId, title: &str) -> BoxFuture<'_, ApiResult<()>> {
        let url = self.endpoints.drawing(repo, id);
        let body = RenameRequest {
            title: title.to_string(),
        };
        Box::pin(async move {
            self.agent
                .request("PATCH", &url)
                .send_json(&body)
                .map_err(ApiError::from)?;
            Ok(())
        })
    }

    fn delete_drawings(&self, repo: &str, ids: &[DrawingId]) -> BoxFuture<'_, ApiResult<()>> {
        let urls: Vec<String> = ids.iter().map(|id| self.endpoints.drawing(repo, id)).collect();
        Box::pin(async move {
            for url in urls {
                log::debug!("DELETE {}", url);
                self.agent.delete(&url).call().map_err(ApiError::from)?;
            }
            Ok(())
        })
    }
}
