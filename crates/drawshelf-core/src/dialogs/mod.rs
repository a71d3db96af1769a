//! Dialog drafts.
//!
//! A draft holds what the user has picked so far in one dialog. It reads the
//! store state but never changes it; confirming yields a [`Command`] for the
//! store to run. Drafts are dropped when their dialog closes.
//!
//! [`Command`]: crate::command::Command

mod manage;
mod open;
mod save;

pub use manage::{DeleteConfirmation, ManageAction, ManageDialog, ManageStep, RenameDraft};
pub use open::OpenDialog;
pub use save::SaveDialog;

use crate::model::RepositoryRef;
use crate::state::DrawingState;
use thiserror::Error;

/// Reasons a dialog cannot be confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialogError {
    #[error("Title must not be empty")]
    EmptyTitle,
    #[error("No repository selected")]
    NoRepository,
    #[error("No drawing selected")]
    NoDrawing,
    #[error("Title is unchanged")]
    Unchanged,
}

/// The picked repository if it is still known, else the first one.
fn effective_repo<'a>(state: &'a DrawingState, picked: Option<&str>) -> Option<&'a RepositoryRef> {
    picked
        .and_then(|name| state.repository(name))
        .or_else(|| state.repositories().first())
}
