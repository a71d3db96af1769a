use super::{DialogError, effective_repo};
use crate::command::Command;
use crate::model::{Drawing, RepositoryRef, SceneElement};
use crate::state::DrawingState;

/// The Save dialog.
///
/// Keeping the open drawing's title updates it in place; any other title
/// creates a new drawing in the selected repository.
#[derive(Debug, Clone)]
pub struct SaveDialog {
    repo: Option<String>,
    title: String,
}

impl SaveDialog {
    /// Start from the open drawing's repository and title.
    pub fn new(state: &DrawingState) -> Self {
        let drawing = state.saved_drawing();
        Self {
            repo: (!drawing.repo.is_empty()).then(|| drawing.repo.clone()),
            title: drawing.title.clone(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Ignored while the dialog would update the open drawing.
    pub fn select_repo(&mut self, name: &str, state: &DrawingState) {
        if !self.updates_existing(state) {
            self.repo = Some(name.to_string());
        }
    }

    pub fn selected_repo<'a>(&self, state: &'a DrawingState) -> Option<&'a RepositoryRef> {
        if self.updates_existing(state) {
            return state.repository(&state.saved_drawing().repo);
        }
        effective_repo(state, self.repo.as_deref())
    }

    /// Whether confirming overwrites the open drawing. The repository
    /// selector is disabled in that case.
    pub fn updates_existing(&self, state: &DrawingState) -> bool {
        let drawing = state.saved_drawing();
        drawing.is_persisted() && self.title == drawing.title
    }

    /// Another drawing in the target repository already has this title.
    /// Only a hint: titles need not be unique.
    pub fn title_conflict(&self, state: &DrawingState) -> bool {
        if self.updates_existing(state) {
            return false;
        }
        self.selected_repo(state).is_some_and(|repo| {
            state
                .listing(&repo.name)
                .iter()
                .any(|entry| entry.title == self.title)
        })
    }

    pub fn validate(&self, state: &DrawingState) -> Result<(), DialogError> {
        if self.title.trim().is_empty() {
            return Err(DialogError::EmptyTitle);
        }
        self.selected_repo(state).ok_or(DialogError::NoRepository)?;
        Ok(())
    }

    /// Build the save or create command for the editor's current content.
    pub fn confirm(&self, state: &DrawingState, content: &[SceneElement]) -> Result<Command, DialogError> {
        self.validate(state)?;
        if self.updates_existing(state) {
            return Ok(Command::Save(Drawing {
                elements: content.to_vec(),
                ..state.saved_drawing().clone()
            }));
        }
        let repo = self.selected_repo(state).ok_or(DialogError::NoRepository)?;
        Ok(Command::Create {
            repo: repo.name.clone(),
            title: self.title.clone(),
            elements: content.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DrawingId, DrawingSummary};
    use crate::state::{Action, OperationKind};
    use serde_json::json;

    fn state_with_open_drawing() -> DrawingState {
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
                ("play".to_string(), vec![DrawingSummary::new("3", "Taken")]),
                ("work".to_string(), vec![DrawingSummary::new("1", "Sketch")]),
            ],
            replace_all: true,
        });
        let generation = state.start(OperationKind::Open);
        state.apply(Action::DrawingOpened {
            generation,
            drawing: Drawing {
                repo: "play".to_string(),
                id: Some(DrawingId::new("7")),
                title: "Sketch".to_string(),
                elements: vec![],
            },
        });
        state
    }

    #[test]
    fn test_same_title_updates_in_place() {
        let state = state_with_open_drawing();
        let mut dialog = SaveDialog::new(&state);
        assert!(dialog.updates_existing(&state));

        dialog.select_repo("work", &state);
        assert_eq!(dialog.selected_repo(&state).unwrap().name, "play");

        let content = vec![json!({"type": "line"})];
        match dialog.confirm(&state, &content).unwrap() {
            Command::Save(drawing) => {
                assert_eq!(drawing.id, Some(DrawingId::new("7")));
                assert_eq!(drawing.elements, content);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_new_title_creates() {
        let state = state_with_open_drawing();
        let mut dialog = SaveDialog::new(&state);
        dialog.set_title("Copy");
        dialog.select_repo("work", &state);

        assert!(!dialog.updates_existing(&state));
        assert_eq!(
            dialog.confirm(&state, &[]),
            Ok(Command::Create {
                repo: "work".to_string(),
                title: "Copy".to_string(),
                elements: vec![],
            })
        );
    }

    #[test]
    fn test_unsaved_drawing_defaults_to_first_repo() {
        let mut state = state_with_open_drawing();
        state.apply(Action::Cleared);
        let mut dialog = SaveDialog::new(&state);
        assert_eq!(dialog.validate(&state), Err(DialogError::EmptyTitle));

        dialog.set_title("First");
        assert!(!dialog.updates_existing(&state));
        assert_eq!(dialog.selected_repo(&state).unwrap().name, "work");
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let state = state_with_open_drawing();
        let mut dialog = SaveDialog::new(&state);
        dialog.set_title("   ");
        assert_eq!(dialog.confirm(&state, &[]), Err(DialogError::EmptyTitle));
    }

    #[test]
    fn test_duplicate_title_is_only_a_hint() {
        let state = state_with_open_drawing();
        let mut dialog = SaveDialog::new(&state);
        assert!(!dialog.title_conflict(&state));

        dialog.set_title("Taken");
        assert!(dialog.title_conflict(&state));
        assert!(dialog.confirm(&state, &[]).is_ok());
    }
}
