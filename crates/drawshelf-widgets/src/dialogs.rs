//! Open, Save and Manage dialogs.
//!
//! Each function draws one modal over its draft from `drawshelf_core::dialogs`
//! and returns a [`DialogResponse`]. The caller runs the command through the
//! store and drops the draft once `close` is set.

use drawshelf_core::dialogs::{ManageAction, ManageDialog, ManageStep, OpenDialog, SaveDialog};
use drawshelf_core::model::RepositoryRef;
use drawshelf_core::store::{LISTING_FAILED, REPOSITORIES_FAILED};
use drawshelf_core::{AsyncStatus, Command, DrawingState, OperationKind};
use egui::{Color32, Context, RichText, Stroke, Ui};

use crate::buttons::{ActionButton, ButtonKind, input_text, secondary_btn};
use crate::layout::{modal, section_label};
use crate::{sizing, theme};

/// What the user did in a dialog this frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialogResponse {
    /// Command to run, if the user confirmed.
    pub command: Option<Command>,
    /// The dialog should be closed and its draft dropped.
    pub close: bool,
}

impl DialogResponse {
    fn confirmed(command: Command) -> Self {
        Self {
            command: Some(command),
            close: true,
        }
    }

    fn closed() -> Self {
        Self {
            command: None,
            close: true,
        }
    }
}

/// Combo box styling shared by the dialogs.
fn combo_scope<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> R {
    ui.scope(|ui| {
        let visuals = ui.visuals_mut();
        visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, theme::BORDER);
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, Color32::from_gray(180));
        visuals.widgets.active.bg_stroke = Stroke::new(1.0, theme::ACCENT);
        visuals.widgets.inactive.weak_bg_fill = Color32::WHITE;
        visuals.widgets.hovered.weak_bg_fill = Color32::WHITE;
        add_contents(ui)
    })
    .inner
}

/// Repository picker. Returns the name the user clicked, if any.
fn repo_combo(
    ui: &mut Ui,
    id_salt: &str,
    state: &DrawingState,
    selected: Option<&RepositoryRef>,
) -> Option<String> {
    if state.repositories().is_empty() {
        status_line(ui, state.status(OperationKind::Repositories), REPOSITORIES_FAILED, "No repositories");
        return None;
    }

    let selected_name = selected.map(|repo| repo.name.as_str());
    let selected_text = selected.map_or("Select a repository", |repo| repo.label.as_str());
    let mut picked = None;
    combo_scope(ui, |ui| {
        egui::ComboBox::from_id_salt(id_salt)
            .selected_text(selected_text)
            .width(sizing::FIELD_WIDTH)
            .show_ui(ui, |ui| {
                for repo in state.repositories() {
                    let checked = selected_name == Some(repo.name.as_str());
                    if ui.selectable_label(checked, repo.label.as_str()).clicked() {
                        picked = Some(repo.name.clone());
                    }
                }
            });
    });
    picked
}

/// Spinner while loading, error text on failure, `empty` otherwise.
fn status_line(ui: &mut Ui, status: AsyncStatus, failed: &str, empty: &str) {
    match status {
        AsyncStatus::InProgress => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new("Loading…").color(theme::TEXT_MUTED));
            });
        }
        AsyncStatus::Failed => {
            ui.label(RichText::new(failed).color(theme::DANGER));
        }
        AsyncStatus::Idle => {
            ui.label(RichText::new(empty).color(Color32::from_gray(150)));
        }
    }
}

/// The Open dialog.
pub fn open_dialog(ctx: &Context, draft: &mut OpenDialog, state: &DrawingState) -> DialogResponse {
    let (response, dismissed) = modal(ctx, "open_dialog", "Open drawing", sizing::DIALOG_WIDTH, |ui| {
        let mut response = DialogResponse::default();

        section_label(ui, "Repository:");
        ui.add_space(4.0);
        let repo = draft.selected_repo(state);
        if let Some(name) = repo_combo(ui, "open_repo", state, repo) {
            draft.select_repo(&name);
        }

        ui.add_space(12.0);
        section_label(ui, "Drawing:");
        ui.add_space(4.0);
        let listing = draft
            .selected_repo(state)
            .map(|repo| state.listing(&repo.name))
            .unwrap_or_default();
        let listing_status = state.status(OperationKind::Listing);
        if listing.is_empty() || listing_status != AsyncStatus::Idle {
            status_line(ui, listing_status, LISTING_FAILED, "No drawings in this repository");
        } else {
            let selected = draft.selected_drawing(state);
            let selected_text = selected.map_or("Select a drawing", |entry| entry.title.as_str());
            let mut picked = None;
            combo_scope(ui, |ui| {
                egui::ComboBox::from_id_salt("open_drawing")
                    .selected_text(selected_text)
                    .width(sizing::FIELD_WIDTH)
                    .show_ui(ui, |ui| {
                        for entry in listing {
                            let checked = selected.is_some_and(|s| s.id == entry.id);
                            if ui.selectable_label(checked, entry.title.as_str()).clicked() {
                                picked = Some(entry.id.clone());
                            }
                        }
                    });
            });
            if let Some(id) = picked {
                draft.select_drawing(id);
            }
        }

        ui.add_space(16.0);
        let confirmation = draft.confirm(state);
        ui.horizontal(|ui| {
            if ActionButton::new("Open", ButtonKind::Primary)
                .enabled(confirmation.is_ok() && listing_status == AsyncStatus::Idle)
                .show(ui)
            {
                if let Ok(command) = confirmation {
                    response = DialogResponse::confirmed(command);
                }
            }
            if secondary_btn(ui, "Cancel") {
                response = DialogResponse::closed();
            }
        });
        response
    });

    if dismissed {
        return DialogResponse::closed();
    }
    response
}

/// The Save dialog. Saves the editor content held in `state`.
pub fn save_dialog(ctx: &Context, draft: &mut SaveDialog, state: &DrawingState) -> DialogResponse {
    let (response, dismissed) = modal(ctx, "save_dialog", "Save drawing", sizing::DIALOG_WIDTH, |ui| {
        let mut response = DialogResponse::default();

        section_label(ui, "Title:");
        ui.add_space(4.0);
        let mut title = draft.title().to_string();
        if input_text(ui, &mut title, sizing::FIELD_WIDTH, "Untitled").changed() {
            draft.set_title(title);
        }

        ui.add_space(12.0);
        section_label(ui, "Repository:");
        ui.add_space(4.0);
        let updates_existing = draft.updates_existing(state);
        let repo = draft.selected_repo(state);
        let picked = ui
            .add_enabled_ui(!updates_existing, |ui| repo_combo(ui, "save_repo", state, repo))
            .inner;
        if let Some(name) = picked {
            draft.select_repo(&name, state);
        }

        ui.add_space(8.0);
        if updates_existing {
            ui.label(
                RichText::new("Saves over the open drawing")
                    .size(11.0)
                    .color(theme::TEXT_MUTED),
            );
        } else if draft.title_conflict(state) {
            ui.label(
                RichText::new("Another drawing in this repository has the same title")
                    .size(11.0)
                    .color(theme::WARNING),
            );
        }
        let validation = draft.validate(state);
        if let Err(err) = &validation {
            ui.label(RichText::new(err.to_string()).size(11.0).color(theme::DANGER));
        }

        ui.add_space(16.0);
        let saving = state.status(OperationKind::Save) == AsyncStatus::InProgress;
        ui.horizontal(|ui| {
            if ActionButton::new("Save", ButtonKind::Primary)
                .enabled(validation.is_ok() && !saving)
                .show(ui)
            {
                match draft.confirm(state, state.current_content()) {
                    Ok(command) => response = DialogResponse::confirmed(command),
                    Err(err) => log::warn!("Save dialog not confirmed: {}", err),
                }
            }
            if secondary_btn(ui, "Cancel") {
                response = DialogResponse::closed();
            }
            if saving {
                ui.spinner();
            }
        });
        response
    });

    if dismissed {
        return DialogResponse::closed();
    }
    response
}

/// The Manage dialog, or its rename/delete sub-dialog while one is open.
pub fn manage_dialog(ctx: &Context, draft: &mut ManageDialog, state: &DrawingState) -> DialogResponse {
    if draft.step().is_some() {
        return manage_step(ctx, draft);
    }

    let (response, dismissed) = modal(ctx, "manage_dialog", "Manage drawings", sizing::DIALOG_WIDTH, |ui| {
        let mut response = DialogResponse::default();

        section_label(ui, "Repository:");
        ui.add_space(4.0);
        let repo = draft.selected_repo(state);
        if let Some(name) = repo_combo(ui, "manage_repo", state, repo) {
            draft.select_repo(&name);
        }

        ui.add_space(12.0);
        let listing = draft
            .selected_repo(state)
            .map(|repo| state.listing(&repo.name))
            .unwrap_or_default();
        let listing_status = state.status(OperationKind::Listing);
        if listing.is_empty() || listing_status == AsyncStatus::Failed {
            status_line(ui, listing_status, LISTING_FAILED, "No drawings in this repository");
        } else {
            egui::ScrollArea::vertical()
                .max_height(240.0)
                .show(ui, |ui| {
                    for entry in listing {
                        let mut checked = draft.is_checked(&entry.id);
                        if ui.checkbox(&mut checked, entry.title.as_str()).changed() {
                            draft.set_checked(&entry.id, checked);
                        }
                    }
                });
        }

        ui.add_space(16.0);
        let enabled = draft.enabled_actions(state);
        let busy = state.status(OperationKind::Manage) == AsyncStatus::InProgress;
        ui.horizontal(|ui| {
            if ActionButton::new("Rename", ButtonKind::Secondary)
                .enabled(!busy && enabled.contains(&ManageAction::Rename))
                .show(ui)
            {
                draft.begin(ManageAction::Rename, state);
            }
            if ActionButton::new("Delete", ButtonKind::Danger)
                .enabled(!busy && enabled.contains(&ManageAction::Delete))
                .show(ui)
            {
                draft.begin(ManageAction::Delete, state);
            }
            if secondary_btn(ui, "Close") {
                response = DialogResponse::closed();
            }
            if busy {
                ui.spinner();
            }
        });
        response
    });

    if dismissed {
        return DialogResponse::closed();
    }
    response
}

/// Rename or delete confirmation. Confirming keeps the Manage dialog open.
fn manage_step(ctx: &Context, draft: &mut ManageDialog) -> DialogResponse {
    let title = match draft.step() {
        Some(ManageStep::Renaming(_)) => "Rename drawing",
        Some(ManageStep::ConfirmingDelete(_)) => "Delete drawings",
        None => return DialogResponse::default(),
    };

    let mut confirm = false;
    let mut cancel = false;
    let (_, dismissed) = modal(ctx, "manage_step", title, sizing::DIALOG_WIDTH, |ui| match draft.step_mut() {
        Some(ManageStep::Renaming(rename)) => {
            section_label(ui, "New title:");
            ui.add_space(4.0);
            input_text(ui, &mut rename.new_title, sizing::FIELD_WIDTH, &rename.current_title);
            ui.add_space(16.0);
            ui.horizontal(|ui| {
                if ActionButton::new("Rename", ButtonKind::Primary)
                    .enabled(rename.can_confirm())
                    .show(ui)
                {
                    confirm = true;
                }
                if secondary_btn(ui, "Cancel") {
                    cancel = true;
                }
            });
        }
        Some(ManageStep::ConfirmingDelete(confirmation)) => {
            let count = confirmation.drawings.len();
            let noun = if count == 1 { "drawing" } else { "drawings" };
            ui.label(
                RichText::new(format!("Delete {} {}? This cannot be undone.", count, noun))
                    .color(theme::TEXT),
            );
            ui.add_space(8.0);
            for entry in &confirmation.drawings {
                ui.label(RichText::new(format!("• {}", entry.title)).color(theme::TEXT_MUTED));
            }
            ui.add_space(16.0);
            ui.horizontal(|ui| {
                if ActionButton::new("Delete", ButtonKind::Danger).show(ui) {
                    confirm = true;
                }
                if secondary_btn(ui, "Cancel") {
                    cancel = true;
                }
            });
        }
        None => {}
    });

    if cancel || dismissed {
        draft.cancel_step();
        return DialogResponse::default();
    }
    if confirm {
        match draft.confirm_step() {
            Ok(command) => {
                return DialogResponse {
                    command: Some(command),
                    close: false,
                };
            }
            Err(err) => log::warn!("Manage action not confirmed: {}", err),
        }
    }
    DialogResponse::default()
}
