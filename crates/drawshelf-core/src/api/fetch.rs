//! Browser `fetch` client for WebAssembly.

use super::{ApiError, ApiResult, BoxFuture, ClientConfig, DrawingApi, Endpoints};
use crate::codec::decode_key;
use crate::model::{Drawing, DrawingId, DrawingSummary, RepositoryRef, SceneElement};
use crate::wire::{
    CreatedDrawing, DrawingContent, RenameRequest, WireDrawing, WireDrawingSummary,
    WireRepository, decode_listing, decode_repositories,
};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Repository client backed by the browser's `fetch`.
///
/// Note: This is intentionally not Send/Sync since WASM is single-threaded.
pub struct FetchClient {
    endpoints: Endpoints,
}

impl FetchClient {
    /// Create a client for the given configuration.
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            endpoints: config.endpoints(),
        }
    }
}

/// Issue a request and return the response body text.
async fn send(method: &str, url: &str, body: Option<String>) -> ApiResult<String> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = body.as_deref() {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| ApiError::Transport(format!("Invalid request: {:?}", e)))?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| ApiError::Transport(format!("Header error: {:?}", e)))?;
    }

    let window = web_sys::window()
        .ok_or_else(|| ApiError::Transport("No window object".to_string()))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| ApiError::Transport(format!("{:?}", e)))?
        .dyn_into()
        .map_err(|_| ApiError::Transport("Type conversion failed".to_string()))?;

    let text_promise = response
        .text()
        .map_err(|e| ApiError::Transport(format!("{:?}", e)))?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|e| ApiError::Transport(format!("{:?}", e)))?
        .as_string()
        .unwrap_or_default();

    if !response.ok() {
        return Err(ApiError::Http {
            status: response.status(),
            body: text,
        });
    }
    Ok(text)
}

fn parse<T: DeserializeOwned>(text: &str) -> ApiResult<T> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

fn to_json<T: serde::Serialize>(value: &T) -> ApiResult<String> {
    serde_json::to_string(value).map_err(|e| ApiError::Decode(e.to_string()))
}

impl DrawingApi for FetchClient {
    fn list_repositories(&self) -> BoxFuture<'_, ApiResult<Vec<RepositoryRef>>> {
        let url = self.endpoints.repositories();
        Box::pin(async move {
            let entries: Vec<WireRepository> = parse(&send("GET", &url, None).await?)?;
            Ok(decode_repositories(&entries))
        })
    }

    fn list_drawings(&self, repo: &str) -> BoxFuture<'_, ApiResult<Vec<DrawingSummary>>> {
        let url = self.endpoints.drawings(repo);
        Box::pin(async move {
            let entries: Vec<WireDrawingSummary> = parse(&send("GET", &url, None).await?)?;
            Ok(decode_listing(&entries))
        })
    }

    fn fetch_drawing(&self, repo: &str, id: &DrawingId) -> BoxFuture<'_, ApiResult<Drawing>> {
        let url = self.endpoints.drawing(repo, id);
        let repo = repo.to_string();
        Box::pin(async move {
            log::info!("Fetching drawing {}", url);
            let wire: WireDrawing = parse(&send("GET", &url, None).await?)?;
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
            let created: CreatedDrawing = parse(&send("POST", &url, Some(to_json(&body)?)).await?)?;
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
            send("PUT", &url, Some(to_json(&body)?)).await?;
            Ok(())
        })
    }

    fn rename_drawing(&self, repo: &str, id: &DrawingId, title: &str) -> BoxFuture<'_, ApiResult<()>> {
        let url = self.endpoints.drawing(repo, id);
        let body = RenameRequest {
            title: title.to_string(),
        };
        Box::pin(async move {
            send("PATCH", &url, Some(to_json(&body)?)).await?;
            Ok(())
        })
    }

    fn delete_drawings(&self, repo: &str, ids: &[DrawingId]) -> BoxFuture<'_, ApiResult<()>> {
        let urls: Vec<String> = ids.iter().map(|id| self.endpoints.drawing(repo, id)).collect();
        Box::pin(async move {
            for url in urls {
                send("DELETE", &url, None).await?;
            }
            Ok(())
        })
    }
}
