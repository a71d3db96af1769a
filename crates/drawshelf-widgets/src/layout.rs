//! Layout helpers: modal frame, separators, section labels.

use egui::{
    Align, Align2, Color32, Context, CornerRadius, Frame, Id, Layout, Margin, Pos2, RichText,
    Sense, Stroke, Ui, Vec2,
};

use crate::buttons::default_btn;
use crate::{sizing, theme};

/// Draw a horizontal separator line.
pub fn separator(ui: &mut Ui) {
    let rect = ui.available_rect_before_wrap();
    let y = rect.top() + 4.0;
    ui.painter().line_segment(
        [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
        Stroke::new(1.0, Color32::from_gray(230)),
    );
    ui.add_space(8.0);
}

/// Draw a section label above a dialog field.
pub fn section_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(12.0).color(theme::TEXT));
}

/// Show a modal dialog: a dimmed backdrop plus a centered card with a title
/// row and a close cross.
///
/// Returns the body's output and whether the user dismissed the dialog by
/// clicking the backdrop or the cross.
pub fn modal<R>(
    ctx: &Context,
    id: &str,
    title: &str,
    width: f32,
    body: impl FnOnce(&mut Ui) -> R,
) -> (R, bool) {
    let mut dismissed = false;

    egui::Area::new(Id::new(id).with("backdrop"))
        .fixed_pos(Pos2::ZERO)
        .order(egui::Order::Background)
        .show(ctx, |ui| {
            let screen_rect = ctx.input(|i| i.content_rect());
            let response = ui.allocate_rect(screen_rect, Sense::click());
            ui.painter().rect_filled(screen_rect, 0.0, theme::BACKDROP);
            if response.clicked() {
                dismissed = true;
            }
        });

    let inner = egui::Area::new(Id::new(id))
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            Frame::new()
                .fill(Color32::WHITE)
                .corner_radius(CornerRadius::same(sizing::MODAL_RADIUS))
                .stroke(Stroke::new(1.0, Color32::from_gray(200)))
                .inner_margin(Margin::same(20))
                .show(ui, |ui| {
                    ui.set_width(width);
                    ui.vertical(|ui| {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(title).size(16.0).strong().color(theme::HEADING));
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                if default_btn(ui, "✕") {
                                    dismissed = true;
                                }
                            });
                        });
                        ui.add_space(12.0);
                        body(ui)
                    })
                    .inner
                })
                .inner
        });

    (inner.inner, dismissed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_runs_body_and_stays_open() {
        let ctx = egui::Context::default();
        let mut ran = 0;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            let (output, dismissed) = modal(ctx, "test_modal", "Title", sizing::DIALOG_WIDTH, |ui| {
                section_label(ui, "Repository:");
                separator(ui);
                ran += 1;
                42
            });
            assert_eq!(output, 42);
            assert!(!dismissed);
        });
        assert!(ran >= 1);
    }
}
