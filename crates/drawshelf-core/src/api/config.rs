//! Client configuration and endpoint construction.

use crate::codec::encode_key;
use crate::model::DrawingId;
use thiserror::Error;

/// Environment variable overriding the API base URL (native only).
pub const API_URL_ENV: &str = "DRAWSHELF_API_URL";

/// Default API base URL for native clients.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3030";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid API URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Repository client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL prepended to `/api/...` paths. Empty means same origin.
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        #[cfg(target_arch = "wasm32")]
        let base_url = String::new();
        #[cfg(not(target_arch = "wasm32"))]
        let base_url = DEFAULT_API_URL.to_string();

        Self { base_url }
    }
}

impl ClientConfig {
    /// Create a configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        validate(&base_url)?;
        Ok(Self { base_url })
    }

    /// Read the base URL from `DRAWSHELF_API_URL`, falling back to the default.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Ok(Self::default()),
        }
    }

    /// Endpoint builder for this configuration.
    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            base: self.base_url.clone(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn validate(base_url: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        url: base_url.to_string(),
        reason,
    };
    let parsed = url::Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(invalid(format!("unsupported scheme {}", parsed.scheme())));
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn validate(_base_url: &str) -> Result<(), ConfigError> {
    // Relative and absolute URLs are both resolved by the browser.
    Ok(())
}

/// Builds request URLs for the repository API.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// `GET /api/repositories`
    pub fn repositories(&self) -> String {
        format!("{}/api/repositories", self.base)
    }

    /// `GET|POST /api/repositories/{repo}/drawings`
    pub fn drawings(&self, repo: &str) -> String {
        format!("{}/api/repositories/{}/drawings", self.base, encode_key(repo))
    }

    /// `GET|PUT|PATCH|DELETE /api/repositories/{repo}/drawings/{id}`
    pub fn drawing(&self, repo: &str, id: &DrawingId) -> String {
        format!("{}/{}", self.drawings(repo), encode_key(id.as_str()))
    }
}
