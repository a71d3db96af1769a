//! Toast stack for queued notifications.

use drawshelf_core::{NotificationQueue, Severity};
use egui::{Align, Align2, Color32, Context, CornerRadius, Frame, Id, Layout, Margin, RichText, Stroke, Vec2};

use crate::buttons::default_btn;
use crate::{sizing, theme};

/// Draw the visible notifications in the bottom right corner.
///
/// Returns the ids the user dismissed this frame; pass them to
/// `Store::dismiss_notification`.
pub fn notification_stack(ctx: &Context, notifications: &NotificationQueue) -> Vec<u64> {
    let mut dismissed = Vec::new();
    if notifications.is_empty() {
        return dismissed;
    }

    egui::Area::new(Id::new("notification_stack"))
        .anchor(Align2::RIGHT_BOTTOM, Vec2::new(-16.0, -16.0))
        .order(egui::Order::Tooltip)
        .show(ctx, |ui| {
            ui.set_width(sizing::TOAST_WIDTH);
            for notification in notifications.visible() {
                let accent = match notification.severity {
                    Severity::Error => theme::DANGER,
                    Severity::Info => theme::ACCENT,
                };
                Frame::new()
                    .fill(Color32::WHITE)
                    .corner_radius(CornerRadius::same(sizing::PANEL_RADIUS))
                    .stroke(Stroke::new(1.0, accent))
                    .inner_margin(Margin::same(12))
                    .show(ui, |ui| {
                        ui.set_width(sizing::TOAST_WIDTH - 24.0);
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(&notification.title).strong().color(accent));
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                if default_btn(ui, "✕") {
                                    dismissed.push(notification.id);
                                }
                            });
                        });
                        if let Some(detail) = &notification.detail {
                            ui.label(RichText::new(detail).size(11.0).color(theme::TEXT_MUTED));
                        }
                    });
                ui.add_space(8.0);
            }
        });

    dismissed
}

#[cfg(test)]
mod tests {
    use super::*;
    use drawshelf_core::notifications::MAX_VISIBLE;

    #[test]
    fn test_stack_renders_without_dismissals() {
        let mut queue = NotificationQueue::new();
        queue.error("Failed to save drawing", Some("connection refused".to_string()));
        queue.info("Saved");
        for _ in 0..MAX_VISIBLE {
            queue.error("Failed to load drawing list", None);
        }

        let ctx = Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            assert!(notification_stack(ctx, &queue).is_empty());
        });
        assert_eq!(queue.len(), MAX_VISIBLE + 2);
    }

    #[test]
    fn test_empty_queue_draws_nothing() {
        let ctx = Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            assert!(notification_stack(ctx, &NotificationQueue::new()).is_empty());
        });
    }
}
