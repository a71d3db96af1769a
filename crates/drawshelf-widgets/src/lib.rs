//! egui front end for the drawshelf drawing store.
//!
//! The widgets here only render: they read [`DrawingState`] and the dialog
//! drafts from `drawshelf-core`, and hand back [`Command`]s for the store to
//! run. Nothing in this crate talks to the network.
//!
//! - **Buttons**: dialog buttons and text input
//! - **Menu**: main menu with New, Open, Save and Manage entries
//! - **Layout**: modal frame, section labels, separators
//! - **Dialogs**: Open, Save and Manage dialogs
//! - **Notifications**: toast stack for failed operations
//!
//! [`DrawingState`]: drawshelf_core::DrawingState
//! [`Command`]: drawshelf_core::Command

pub mod buttons;
pub mod dialogs;
pub mod layout;
pub mod menu;
pub mod notifications;

pub use buttons::{
    ActionButton, ButtonKind, danger_btn, default_btn, input_text, primary_btn, secondary_btn,
};
pub use dialogs::{DialogResponse, manage_dialog, open_dialog, save_dialog};
pub use layout::{modal, section_label, separator};
pub use menu::{MenuAction, main_menu, menu_item, menu_item_enabled, menu_separator, panel_frame};
pub use notifications::notification_stack;

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
    /// Modal dialog corner radius
    pub const MODAL_RADIUS: u8 = 12;
    /// Dialog button height
    pub const BUTTON_HEIGHT: f32 = 30.0;
    /// Dialog button corner radius
    pub const BUTTON_RADIUS: u8 = 6;
    /// Width of the dialog body
    pub const DIALOG_WIDTH: f32 = 300.0;
    /// Width of combo boxes and text fields inside dialogs
    pub const FIELD_WIDTH: f32 = 260.0;
    /// Menu width
    pub const MENU_WIDTH: f32 = 180.0;
    /// Menu item height
    pub const MENU_ITEM_HEIGHT: f32 = 28.0;
    /// Notification toast width
    pub const TOAST_WIDTH: f32 = 280.0;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Dialog heading color
    pub const HEADING: Color32 = Color32::from_gray(30);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Selection/active color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Primary button hover
    pub const ACCENT_HOVER: Color32 = Color32::from_rgb(37, 99, 235);
    /// Destructive actions and error text (red)
    pub const DANGER: Color32 = Color32::from_rgb(239, 68, 68);
    /// Danger button hover
    pub const DANGER_HOVER: Color32 = Color32::from_rgb(220, 38, 38);
    /// Warning hint text (amber)
    pub const WARNING: Color32 = Color32::from_rgb(217, 119, 6);
    /// Hover background
    pub const HOVER_BG: Color32 = Color32::from_rgb(245, 245, 245);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
    /// Modal backdrop
    pub const BACKDROP: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 80);
}
