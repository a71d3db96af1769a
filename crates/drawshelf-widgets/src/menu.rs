//! Main menu: New, Open, Save, Manage drawings.

use drawshelf_core::Command;
use egui::{Align2, Color32, CornerRadius, CursorIcon, FontId, Frame, Margin, Pos2, Sense, Stroke, Ui, vec2};

use crate::{sizing, theme};

/// Entries of the main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    New,
    Open,
    Save,
    Manage,
}

impl MenuAction {
    pub const ALL: [MenuAction; 4] = [Self::New, Self::Open, Self::Save, Self::Manage];

    pub fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Open => "Open…",
            Self::Save => "Save…",
            Self::Manage => "Manage drawings…",
        }
    }

    /// Store command to run as soon as the entry is picked.
    ///
    /// Open and Manage show listings, which are re-fetched every time either
    /// dialog opens. Save only opens its dialog.
    pub fn command(self) -> Option<Command> {
        match self {
            Self::New => Some(Command::New),
            Self::Open | Self::Manage => Some(Command::Refresh),
            Self::Save => None,
        }
    }

    /// Manage is drawn below a separator.
    fn starts_group(self) -> bool {
        self == Self::Manage
    }
}

/// An always-enabled menu row.
pub fn menu_item(ui: &mut Ui, label: &str) -> bool {
    menu_item_enabled(ui, label, true)
}

/// A menu row. Disabled rows are greyed out and ignore clicks.
pub fn menu_item_enabled(ui: &mut Ui, label: &str, enabled: bool) -> bool {
    let width = ui.available_width().max(sizing::MENU_WIDTH);
    let sense = if enabled { Sense::click() } else { Sense::hover() };
    let (rect, response) = ui.allocate_exact_size(vec2(width, sizing::MENU_ITEM_HEIGHT), sense);

    if ui.is_rect_visible(rect) {
        let hovered = enabled && response.hovered();
        if hovered {
            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), theme::HOVER_BG);
        }
        let color = match (enabled, hovered) {
            (false, _) => Color32::from_gray(180),
            (true, true) => theme::HEADING,
            (true, false) => theme::TEXT,
        };
        ui.painter().text(
            Pos2::new(rect.left() + 12.0, rect.center().y),
            Align2::LEFT_CENTER,
            label,
            FontId::proportional(13.0),
            color,
        );
    }

    if !enabled {
        return false;
    }
    response.on_hover_cursor(CursorIcon::PointingHand).clicked()
}

/// Thin rule between menu groups.
pub fn menu_separator(ui: &mut Ui) {
    ui.add_space(4.0);
    let rect = ui.available_rect_before_wrap();
    let (left, right) = (rect.left() + 8.0, rect.right() - 8.0);
    ui.painter().hline(left..=right, rect.top(), Stroke::new(1.0, Color32::from_gray(230)));
    ui.add_space(4.0);
}

/// Frame of floating panels such as the main menu.
pub fn panel_frame() -> Frame {
    Frame::new()
        .fill(theme::PANEL_BG)
        .corner_radius(CornerRadius::same(sizing::PANEL_RADIUS))
        .stroke(Stroke::new(1.0, theme::BORDER))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 8,
            offset: [0, 2],
            color: Color32::from_black_alpha(15),
        })
        .inner_margin(Margin::same(8))
}

/// The main menu. Save is only offered while the editor holds unsaved
/// changes; the other entries are always enabled.
pub fn main_menu(ui: &mut Ui, save_enabled: bool) -> Option<MenuAction> {
    panel_frame()
        .show(ui, |ui| {
            ui.set_width(sizing::MENU_WIDTH);
            let mut picked = None;
            for action in MenuAction::ALL {
                if action.starts_group() {
                    menu_separator(ui);
                }
                let enabled = action != MenuAction::Save || save_enabled;
                if menu_item_enabled(ui, action.label(), enabled) {
                    picked = Some(action);
                }
            }
            picked
        })
        .inner
}
