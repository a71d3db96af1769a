use super::{DialogError, effective_repo};
use crate::command::Command;
use crate::model::{DrawingId, DrawingSummary, RepositoryRef};
use crate::state::DrawingState;

/// Actions offered for the checked drawings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManageAction {
    Rename,
    Delete,
}

/// Rename sub-dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameDraft {
    pub repo: String,
    pub id: DrawingId,
    pub current_title: String,
    pub new_title: String,
}

impl RenameDraft {
    /// Renaming is only offered once the title actually changes.
    pub fn can_confirm(&self) -> bool {
        !self.new_title.trim().is_empty() && self.new_title != self.current_title
    }
}

/// Delete confirmation sub-dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub repo: String,
    pub drawings: Vec<DrawingSummary>,
}

/// Sub-dialog currently shown on top of the Manage dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManageStep {
    Renaming(RenameDraft),
    ConfirmingDelete(DeleteConfirmation),
}

/// The Manage dialog: check drawings of one repository, then rename or
/// delete them.
#[derive(Debug, Clone, Default)]
pub struct ManageDialog {
    repo: Option<String>,
    checked: Vec<DrawingId>,
    step: Option<ManageStep>,
}

impl ManageDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_repo<'a>(&self, state: &'a DrawingState) -> Option<&'a RepositoryRef> {
        effective_repo(state, self.repo.as_deref())
    }

    /// Switching repositories clears the checked drawings.
    pub fn select_repo(&mut self, name: &str) {
        if self.repo.as_deref() != Some(name) {
            self.repo = Some(name.to_string());
            self.checked.clear();
        }
    }

    pub fn set_checked(&mut self, id: &DrawingId, checked: bool) {
        let present = self.checked.contains(id);
        if checked && !present {
            self.checked.push(id.clone());
        } else if !checked {
            self.checked.retain(|other| other != id);
        }
    }

    pub fn is_checked(&self, id: &DrawingId) -> bool {
        self.checked.contains(id)
    }

    /// Checked drawings still present in the listing, in listing order.
    pub fn selection<'a>(&self, state: &'a DrawingState) -> Vec<&'a DrawingSummary> {
        let Some(repo) = self.selected_repo(state) else {
            return Vec::new();
        };
        state
            .listing(&repo.name)
            .iter()
            .filter(|entry| self.checked.contains(&entry.id))
            .collect()
    }

    pub fn enabled_actions(&self, state: &DrawingState) -> Vec<ManageAction> {
        match self.selection(state).len() {
            0 => Vec::new(),
            1 => vec![ManageAction::Rename, ManageAction::Delete],
            _ => vec![ManageAction::Delete],
        }
    }

    /// Open the sub-dialog for `action`. Returns false if the action is not
    /// enabled for the current selection.
    pub fn begin(&mut self, action: ManageAction, state: &DrawingState) -> bool {
        if !self.enabled_actions(state).contains(&action) {
            return false;
        }
        let Some(repo) = self.selected_repo(state) else {
            return false;
        };
        let selection = self.selection(state);
        self.step = match action {
            ManageAction::Rename => selection.first().map(|entry| {
                ManageStep::Renaming(RenameDraft {
                    repo: repo.name.clone(),
                    id: entry.id.clone(),
                    current_title: entry.title.clone(),
                    new_title: entry.title.clone(),
                })
            }),
            ManageAction::Delete => Some(ManageStep::ConfirmingDelete(DeleteConfirmation {
                repo: repo.name.clone(),
                drawings: selection.into_iter().cloned().collect(),
            })),
        };
        self.step.is_some()
    }

    pub fn step(&self) -> Option<&ManageStep> {
        self.step.as_ref()
    }

    pub fn step_mut(&mut self) -> Option<&mut ManageStep> {
        self.step.as_mut()
    }

    /// Close the sub-dialog, keeping the selection.
    pub fn cancel_step(&mut self) {
        self.step = None;
    }

    /// Confirm the sub-dialog. The selection is cleared on success.
    pub fn confirm_step(&mut self) -> Result<Command, DialogError> {
        let command = match &self.step {
            None => return Err(DialogError::NoDrawing),
            Some(ManageStep::Renaming(draft)) => {
                if draft.new_title.trim().is_empty() {
                    return Err(DialogError::EmptyTitle);
                }
                if !draft.can_confirm() {
                    return Err(DialogError::Unchanged);
                }
                Command::Rename {
                    repo: draft.repo.clone(),
                    id: draft.id.clone(),
                    title: draft.new_title.clone(),
                }
            }
            Some(ManageStep::ConfirmingDelete(confirmation)) => Command::Delete {
                repo: confirmation.repo.clone(),
                ids: confirmation.drawings.iter().map(|entry| entry.id.clone()).collect(),
            },
        };
        self.step = None;
        self.checked.clear();
        Ok(command)
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
            listings: vec![(
                "work".to_string(),
                vec![
                    DrawingSummary::new("1", "Alpha"),
                    DrawingSummary::new("2", "Beta"),
                    DrawingSummary::new("3", "Gamma"),
                ],
            )],
            replace_all: true,
        });
        state
    }

    #[test]
    fn test_enabled_actions_follow_selection() {
        let state = state();
        let mut dialog = ManageDialog::new();
        assert!(dialog.enabled_actions(&state).is_empty());

        dialog.set_checked(&DrawingId::new("2"), true);
        assert_eq!(
            dialog.enabled_actions(&state),
            vec![ManageAction::Rename, ManageAction::Delete]
        );

        dialog.set_checked(&DrawingId::new("3"), true);
        assert_eq!(dialog.enabled_actions(&state), vec![ManageAction::Delete]);
        assert!(!dialog.begin(ManageAction::Rename, &state));

        dialog.set_checked(&DrawingId::new("3"), false);
        assert_eq!(dialog.selection(&state).len(), 1);
    }

    #[test]
    fn test_rename_requires_a_changed_title() {
        let state = state();
        let mut dialog = ManageDialog::new();
        dialog.set_checked(&DrawingId::new("1"), true);
        assert!(dialog.begin(ManageAction::Rename, &state));

        let Some(ManageStep::Renaming(draft)) = dialog.step_mut() else {
            panic!("expected rename step");
        };
        assert!(!draft.can_confirm());
        draft.new_title = "Omega".to_string();
        assert!(draft.can_confirm());

        assert_eq!(
            dialog.confirm_step(),
            Ok(Command::Rename {
                repo: "work".to_string(),
                id: DrawingId::new("1"),
                title: "Omega".to_string(),
            })
        );
        assert!(dialog.selection(&state).is_empty());
        assert!(dialog.step().is_none());
    }

    #[test]
    fn test_delete_lists_selection_and_clears_it() {
        let state = state();
        let mut dialog = ManageDialog::new();
        dialog.set_checked(&DrawingId::new("3"), true);
        dialog.set_checked(&DrawingId::new("1"), true);
        assert!(dialog.begin(ManageAction::Delete, &state));

        match dialog.step() {
            Some(ManageStep::ConfirmingDelete(confirmation)) => {
                let titles: Vec<&str> = confirmation.drawings.iter().map(|d| d.title.as_str()).collect();
                assert_eq!(titles, vec!["Alpha", "Gamma"]);
            }
            other => panic!("unexpected step {:?}", other),
        }

        let command = dialog.confirm_step().unwrap();
        assert_eq!(
            command,
            Command::Delete {
                repo: "work".to_string(),
                ids: vec![DrawingId::new("1"), DrawingId::new("3")],
            }
        );
        assert!(dialog.enabled_actions(&state).is_empty());
    }

    #[test]
    fn test_cancel_keeps_selection() {
        let state = state();
        let mut dialog = ManageDialog::new();
        dialog.set_checked(&DrawingId::new("2"), true);
        dialog.begin(ManageAction::Delete, &state);
        dialog.cancel_step();

        assert!(dialog.step().is_none());
        assert!(dialog.is_checked(&DrawingId::new("2")));
    }

    #[test]
    fn test_switching_repo_clears_selection() {
        let state = state();
        let mut dialog = ManageDialog::new();
        dialog.set_checked(&DrawingId::new("2"), true);
        dialog.select_repo("play");

        assert_eq!(dialog.selected_repo(&state).unwrap().name, "play");
        assert!(!dialog.is_checked(&DrawingId::new("2")));
    }
}
