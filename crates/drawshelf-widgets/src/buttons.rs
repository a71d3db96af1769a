//! Dialog buttons and text input.

use egui::{
    vec2, Align2, Color32, CornerRadius, CursorIcon, FontId, Margin, Response, Sense, Stroke,
    StrokeKind, TextEdit, Ui,
};

use crate::{sizing, theme};

/// Visual variants of [`ActionButton`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    /// Solid accent fill, for the confirming action.
    Primary,
    /// Outlined, for cancel and secondary actions.
    Secondary,
    /// Borderless, for icons such as the close cross.
    Default,
    /// Solid red fill, for destructive actions.
    Danger,
}

/// A text button in one of the dialog styles.
pub struct ActionButton<'a> {
    label: &'a str,
    kind: ButtonKind,
    enabled: bool,
}

impl<'a> ActionButton<'a> {
    pub fn new(label: &'a str, kind: ButtonKind) -> Self {
        Self {
            label,
            kind,
            enabled: true,
        }
    }

    /// A disabled button is drawn faded and never reports a click.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let font_id = FontId::proportional(13.0);
        let galley = ui.painter().layout_no_wrap(
            self.label.to_string(),
            font_id.clone(),
            Color32::PLACEHOLDER,
        );
        let padding = if self.kind == ButtonKind::Default { 8.0 } else { 24.0 };
        let size = vec2(galley.size().x + padding, sizing::BUTTON_HEIGHT);
        let sense = if self.enabled { Sense::click() } else { Sense::hover() };
        let (rect, response) = ui.allocate_exact_size(size, sense);

        if ui.is_rect_visible(rect) {
            let hovered = self.enabled && response.hovered();
            let (fill, text_color, stroke) = match self.kind {
                ButtonKind::Primary => (
                    if hovered { theme::ACCENT_HOVER } else { theme::ACCENT },
                    Color32::WHITE,
                    None,
                ),
                ButtonKind::Danger => (
                    if hovered { theme::DANGER_HOVER } else { theme::DANGER },
                    Color32::WHITE,
                    None,
                ),
                ButtonKind::Secondary => (
                    if hovered { theme::HOVER_BG } else { Color32::WHITE },
                    theme::TEXT,
                    Some(Stroke::new(1.0, theme::BORDER)),
                ),
                ButtonKind::Default => (
                    if hovered { theme::HOVER_BG } else { Color32::TRANSPARENT },
                    theme::TEXT_MUTED,
                    None,
                ),
            };
            let (fill, text_color) = if self.enabled {
                (fill, text_color)
            } else {
                (fill.gamma_multiply(0.4), text_color.gamma_multiply(0.6))
            };

            let radius = CornerRadius::same(sizing::BUTTON_RADIUS);
            ui.painter().rect_filled(rect, radius, fill);
            if let Some(stroke) = stroke {
                ui.painter().rect_stroke(rect, radius, stroke, StrokeKind::Inside);
            }
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                self.label,
                font_id,
                text_color,
            );
        }

        let clicked = self.enabled && response.clicked();
        if self.enabled {
            response.on_hover_cursor(CursorIcon::PointingHand);
        }
        clicked
    }
}

pub fn primary_btn(ui: &mut Ui, label: &str) -> bool {
    ActionButton::new(label, ButtonKind::Primary).show(ui)
}

pub fn secondary_btn(ui: &mut Ui, label: &str) -> bool {
    ActionButton::new(label, ButtonKind::Secondary).show(ui)
}

pub fn default_btn(ui: &mut Ui, label: &str) -> bool {
    ActionButton::new(label, ButtonKind::Default).show(ui)
}

pub fn danger_btn(ui: &mut Ui, label: &str) -> bool {
    ActionButton::new(label, ButtonKind::Danger).show(ui)
}

/// Single-line text field with the dialog look.
pub fn input_text(ui: &mut Ui, text: &mut String, width: f32, hint: &str) -> Response {
    ui.scope(|ui| {
        let visuals = ui.visuals_mut();
        visuals.extreme_bg_color = Color32::WHITE;
        visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, theme::BORDER);
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, Color32::from_gray(180));
        visuals.selection.stroke = Stroke::new(1.0, theme::ACCENT);

        ui.add(
            TextEdit::singleline(text)
                .hint_text(hint)
                .desired_width(width)
                .margin(Margin::symmetric(8, 6))
                .text_color(theme::TEXT),
        )
    })
    .inner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_without_input_are_not_clicked() {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                assert!(!primary_btn(ui, "Save"));
                assert!(!secondary_btn(ui, "Cancel"));
                assert!(!default_btn(ui, "✕"));
                assert!(!danger_btn(ui, "Delete"));
                assert!(!ActionButton::new("Rename", ButtonKind::Primary).enabled(false).show(ui));
            });
        });
    }

    #[test]
    fn test_input_text_keeps_value() {
        let ctx = egui::Context::default();
        let mut title = "Sketch".to_string();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let response = input_text(ui, &mut title, 200.0, "Title");
                assert!(!response.changed());
            });
        });
        assert_eq!(title, "Sketch");
    }
}
