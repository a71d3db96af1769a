use super::{DialogError, effective_repo};
use crate::command::Command;
use crate::model::{DrawingId, DrawingKey, DrawingSummary, RepositoryRef};
use crate::state::DrawingState;

/// The Open dialog: pick a repository, then a drawing in it.
///
/// Until the user picks, the first repository and its first drawing are
/// selected.
#[derive(Debug, Clone, Default)]
pub struct OpenDialog {
    repo: Option<String>,
    drawing: Option<DrawingId>,
}

impl OpenDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_repo<'a>(&self, state: &'a DrawingState) -> Option<&'a RepositoryRef> {
        effective_repo(state, self.repo.as_deref())
    }

    /// Switching repositories resets the drawing to that repository's first.
    pub fn select_repo(&mut self, name: &str) {
        if self.repo.as_deref() != Some(name) {
            self.repo = Some(name.to_string());
            self.drawing = None;
        }
    }

    pub fn selected_drawing<'a>(&self, state: &'a DrawingState) -> Option<&'a DrawingSummary> {
        let repo = self.selected_repo(state)?;
        let listing = state.listing(&repo.name);
        self.drawing
            .as_ref()
            .and_then(|id| listing.iter().find(|entry| &entry.id == id))
            .or_else(|| listing.first())
    }

    pub fn select_drawing(&mut self, id: DrawingId) {
        self.drawing = Some(id);
    }

    pub fn confirm(&self, state: &DrawingState) -> Result<Command, DialogError> {
        let repo = self.selected_repo(state).ok_or(DialogError::NoRepository)?;
        let drawing = self.selected_drawing(state).ok_or(DialogError::NoDrawing)?;
        Ok(Command::Open(DrawingKey::new(repo.name.clone(), drawing.id.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Action, OperationKind};

    fn state() -> DrawingState {
        let mut state = DrawingState::new();
        let generation = state.start(OperationKind::Repositories);
        state.apply(Action::RepositoriesLoaded {
            generation,
            repositories: vec![RepositoryRef::new("work", "Work"), RepositoryRef::new("play", "Play")],
        });
        let generation = state.start(OperationKind::Listing);
        state.apply(Action::ListingsLoaded {
            generation,
            listings: vec![
                (
                    "work".to_string(),
                    vec![DrawingSummary::new("1", "Alpha"), DrawingSummary::new("2", "Beta")],
                ),
                ("play".to_string(), vec![DrawingSummary::new("9", "Doodle")]),
            ],
            replace_all: true,
        });
        state
    }

    #[test]
    fn test_defaults_to_first_entries() {
        let state = state();
        let dialog = OpenDialog::new();

        assert_eq!(dialog.selected_repo(&state).unwrap().name, "work");
        assert_eq!(dialog.selected_drawing(&state).unwrap().title, "Alpha");
        assert_eq!(
            dialog.confirm(&state),
            Ok(Command::Open(DrawingKey::new("work", "1")))
        );
    }

    #[test]
    fn test_switching_repo_resets_drawing() {
        let state = state();
        let mut dialog = OpenDialog::new();
        dialog.select_drawing(DrawingId::new("2"));
        assert_eq!(dialog.selected_drawing(&state).unwrap().title, "Beta");

        dialog.select_repo("play");
        assert_eq!(
            dialog.confirm(&state),
            Ok(Command::Open(DrawingKey::new("play", "9")))
        );
    }

    #[test]
    fn test_empty_state_cannot_confirm() {
        let dialog = OpenDialog::new();
        assert_eq!(dialog.confirm(&DrawingState::new()), Err(DialogError::NoRepository));

        let mut state = state();
        let generation = state.start(OperationKind::Listing);
        state.apply(Action::ListingsLoaded {
            generation,
            listings: vec![],
            replace_all: true,
        });
        assert_eq!(dialog.confirm(&state), Err(DialogError::NoDrawing));
    }
}
