//! Browser location: which drawing the address bar points at.
//!
//! Paths have the form `/drawings/{repo}/{id}` with both segments encoded by
//! [`encode_key`]. The older single-segment form `/drawings/{id}` is still
//! understood when reading.

use crate::codec::{decode_key, encode_key};
use crate::model::{DrawingId, DrawingKey};
use std::cell::RefCell;

/// Root path, shown for a new unsaved drawing.
pub const ROOT_PATH: &str = "/";

const DRAWINGS_PREFIX: &str = "/drawings/";

/// Access to the current location.
pub trait Location {
    /// Current path, without query or fragment.
    fn pathname(&self) -> String;

    /// Push a new history entry.
    fn push(&self, path: &str, title: &str);
}

/// What a location path refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationTarget {
    /// A fully qualified drawing.
    Drawing(DrawingKey),
    /// A drawing id without its repository.
    Legacy(DrawingId),
}

/// Path for a drawing.
pub fn drawing_path(key: &DrawingKey) -> String {
    format!(
        "{}{}/{}",
        DRAWINGS_PREFIX,
        encode_key(&key.repo),
        encode_key(key.id.as_str())
    )
}

/// Parse a location path. Returns `None` for the root, foreign paths and
/// segments that do not decode.
pub fn parse_path(path: &str) -> Option<LocationTarget> {
    let rest = path.strip_prefix(DRAWINGS_PREFIX)?.trim_end_matches('/');
    let segments: Vec<&str> = rest.split('/').collect();
    match segments.as_slice() {
        [repo, id] if !repo.is_empty() && !id.is_empty() => {
            let repo = decode_segment(repo)?;
            let id = decode_segment(id)?;
            Some(LocationTarget::Drawing(DrawingKey::new(repo, id)))
        }
        [id] if !id.is_empty() => Some(LocationTarget::Legacy(DrawingId::new(decode_segment(id)?))),
        _ => None,
    }
}

fn decode_segment(segment: &str) -> Option<String> {
    match decode_key(segment) {
        Ok(plain) => Some(plain),
        Err(e) => {
            log::warn!("Ignoring location segment: {}", e);
            None
        }
    }
}

/// In-memory history for tests and native shells.
#[derive(Debug)]
pub struct MemoryLocation {
    history: RefCell<Vec<(String, String)>>,
}

impl MemoryLocation {
    /// Start at the given path.
    pub fn new(path: &str) -> Self {
        Self {
            history: RefCell::new(vec![(path.to_string(), String::new())]),
        }
    }

    /// All pushed paths, oldest first, including the starting one.
    pub fn paths(&self) -> Vec<String> {
        self.history.borrow().iter().map(|(path, _)| path.clone()).collect()
    }

    /// Title of the latest entry.
    pub fn title(&self) -> String {
        self.history
            .borrow()
            .last()
            .map(|(_, title)| title.clone())
            .unwrap_or_default()
    }
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::new(ROOT_PATH)
    }
}

impl Location for MemoryLocation {
    fn pathname(&self) -> String {
        self.history
            .borrow()
            .last()
            .map(|(path, _)| path.clone())
            .unwrap_or_else(|| ROOT_PATH.to_string())
    }

    fn push(&self, path: &str, title: &str) {
        self.history.borrow_mut().push((path.to_string(), title.to_string()));
    }
}

/// The browser's `window.location` and `window.history`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct BrowserLocation;

#[cfg(target_arch = "wasm32")]
impl Location for BrowserLocation {
    fn pathname(&self) -> String {
        web_sys::window()
            .and_then(|window| window.location().pathname().ok())
            .unwrap_or_else(|| ROOT_PATH.to_string())
    }

    fn push(&self, path: &str, title: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(document) = window.document() {
            document.set_title(title);
        }
        match window.history() {
            Ok(history) => {
                if let Err(e) =
                    history.push_state_with_url(&wasm_bindgen::JsValue::NULL, title, Some(path))
                {
                    log::warn!("Failed to push location {}: {:?}", path, e);
                }
            }
            Err(e) => log::warn!("No history object: {:?}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drawing_path_round_trip() {
        let key = DrawingKey::new("team sketches", "id/with?chars");
        let path = drawing_path(&key);

        assert!(path.starts_with("/drawings/"));
        assert!(!path.contains(' '));
        assert_eq!(parse_path(&path), Some(LocationTarget::Drawing(key)));
    }

    #[test]
    fn test_legacy_path() {
        let path = format!("/drawings/{}", encode_key("42"));
        assert_eq!(parse_path(&path), Some(LocationTarget::Legacy(DrawingId::new("42"))));
    }

    #[test]
    fn test_foreign_and_root_paths() {
        assert_eq!(parse_path("/"), None);
        assert_eq!(parse_path("/drawings/"), None);
        assert_eq!(parse_path("/settings"), None);
        assert_eq!(parse_path("/drawings/a/b/c"), None);
    }

    #[test]
    fn test_undecodable_segment_is_ignored() {
        assert_eq!(parse_path("/drawings/!!!/abc"), None);
    }

    #[test]
    fn test_memory_location_history() {
        let location = MemoryLocation::default();
        assert_eq!(location.pathname(), "/");

        location.push("/drawings/a/b", "Sketch");
        assert_eq!(location.pathname(), "/drawings/a/b");
        assert_eq!(location.title(), "Sketch");
        assert_eq!(location.paths(), vec!["/", "/drawings/a/b"]);
    }
}
