//! Keeping the embedded editor in step with the store.

use crate::model::SceneElement;
use crate::state::DrawingState;

/// The embedded drawing editor, seen from the store.
pub trait EditorSurface {
    /// Replace every element of the scene.
    fn replace_scene(&mut self, elements: &[SceneElement]);

    /// Show a new document title.
    fn set_title(&mut self, title: &str);
}

/// Pushes store changes into an [`EditorSurface`].
///
/// The scene is only replaced when the open drawing itself was replaced
/// (tracked by [`DrawingState::revision`]), so local edits that have not been
/// saved are never clobbered by unrelated state changes.
#[derive(Debug, Default)]
pub struct EditorSync {
    last_revision: Option<u64>,
    last_title: Option<String>,
}

/// What [`EditorSync::reconcile`] pushed to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    Nothing,
    Title,
    Scene,
}

impl EditorSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reconcile(&mut self, state: &DrawingState, surface: &mut impl EditorSurface) -> Reconciled {
        let drawing = state.saved_drawing();

        if self.last_revision != Some(state.revision()) {
            log::debug!(
                "Replacing editor scene with \"{}\" ({} elements)",
                drawing.title,
                drawing.elements.len()
            );
            surface.replace_scene(&drawing.elements);
            surface.set_title(&drawing.title);
            self.last_revision = Some(state.revision());
            self.last_title = Some(drawing.title.clone());
            return Reconciled::Scene;
        }

        if self.last_title.as_deref() != Some(drawing.title.as_str()) {
            surface.set_title(&drawing.title);
            self.last_title = Some(drawing.title.clone());
            return Reconciled::Title;
        }

        Reconciled::Nothing
    }
}
