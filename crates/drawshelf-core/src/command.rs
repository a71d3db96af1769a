//! Commands produced by menus and dialogs and run by the store.

use crate::model::{Drawing, DrawingId, DrawingKey, SceneElement};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Re-fetch repositories and every listing.
    Refresh,
    /// Open a drawing for editing.
    Open(DrawingKey),
    /// Create a new drawing and make it the open one.
    Create {
        repo: String,
        title: String,
        elements: Vec<SceneElement>,
    },
    /// Overwrite a persisted drawing.
    Save(Drawing),
    Rename {
        repo: String,
        id: DrawingId,
        title: String,
    },
    Delete {
        repo: String,
        ids: Vec<DrawingId>,
    },
    /// Discard the open drawing and start an empty one.
    New,
}
