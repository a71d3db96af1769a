//! Repository, drawing and listing types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One opaque scene element, owned by the embedded editor.
///
/// This layer stores and transmits elements without interpreting them.
pub type SceneElement = serde_json::Value;

/// A named collection of drawings on the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryRef {
    /// Opaque identifier.
    pub name: String,
    /// Display label.
    pub label: String,
}

impl RepositoryRef {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

/// Server-assigned drawing identifier. Stable across renames.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawingId(String);

impl DrawingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DrawingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DrawingId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Fully qualified drawing identity: repository plus id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DrawingKey {
    pub repo: String,
    pub id: DrawingId,
}

impl DrawingKey {
    pub fn new(repo: impl Into<String>, id: impl Into<DrawingId>) -> Self {
        Self {
            repo: repo.into(),
            id: id.into(),
        }
    }
}

impl From<String> for DrawingId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingSummary {
    pub id: DrawingId,
    pub title: String,
}

impl DrawingSummary {
    pub fn new(id: impl Into<DrawingId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// A drawing document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Drawing {
    /// Repository name; empty for a drawing that was never saved.
    pub repo: String,
    /// `None` until the server assigns an id.
    pub id: Option<DrawingId>,
    pub title: String,
    pub elements: Vec<SceneElement>,
}

impl Drawing {
    /// Create the empty "New" drawing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the server knows this drawing.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Repository and id, if persisted.
    pub fn key(&self) -> Option<DrawingKey> {
        self.id.as_ref().map(|id| DrawingKey {
            repo: self.repo.clone(),
            id: id.clone(),
        })
    }

    /// Whether this drawing is the one identified by `repo`/`id`.
    pub fn is(&self, repo: &str, id: &DrawingId) -> bool {
        self.repo == repo && self.id.as_ref() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_drawing_is_not_persisted() {
        let drawing = Drawing::empty();
        assert!(!drawing.is_persisted());
        assert!(drawing.key().is_none());
        assert!(drawing.elements.is_empty());
    }

    #[test]
    fn test_key_of_persisted_drawing() {
        let drawing = Drawing {
            repo: "work".to_string(),
            id: Some(DrawingId::new("42")),
            title: "Plan".to_string(),
            elements: vec![json!({"type": "rectangle"})],
        };
        assert_eq!(drawing.key(), Some(DrawingKey::new("work", "42")));
        assert!(drawing.is("work", &DrawingId::new("42")));
        assert!(!drawing.is("home", &DrawingId::new("42")));
    }

    #[test]
    fn test_drawing_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&DrawingId::new("abc")).unwrap();
        assert_eq!(json, "\"abc\"");
    }
}
