//! Drawshelf Core Library
//!
//! Platform-agnostic drawing store, repository client and editor
//! synchronization for the Drawshelf editor.

pub mod api;
pub mod codec;
pub mod command;
pub mod dialogs;
pub mod editor;
pub mod location;
pub mod model;
pub mod notifications;
pub mod state;
pub mod store;
pub mod wire;

pub use api::{ApiError, ApiResult, ClientConfig, DrawingApi, MemoryApi};
pub use command::Command;
pub use editor::{EditorSurface, EditorSync};
pub use location::{Location, MemoryLocation};
pub use model::{Drawing, DrawingId, DrawingKey, DrawingSummary, RepositoryRef, SceneElement};
pub use notifications::{Notification, NotificationQueue, Severity};
pub use state::{AsyncStatus, DrawingState, OperationKind};
pub use store::Store;

#[cfg(not(target_arch = "wasm32"))]
pub use api::HttpClient;

#[cfg(target_arch = "wasm32")]
pub use api::FetchClient;

#[cfg(target_arch = "wasm32")]
pub use location::BrowserLocation;
