//! User-facing notification queue.
//!
//! Failed operations end up here instead of crashing the UI. Notifications
//! stay queued until dismissed.

use std::collections::VecDeque;

/// How many notifications are shown at once.
pub const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// One queued notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub severity: Severity,
    /// Short summary, e.g. "Failed to save drawing".
    pub title: String,
    /// Optional detail, usually the underlying error.
    pub detail: Option<String>,
}

/// FIFO of pending notifications.
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    next_id: u64,
    items: VecDeque<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, severity: Severity, title: &str, detail: Option<String>) -> u64 {
        self.next_id += 1;
        self.items.push_back(Notification {
            id: self.next_id,
            severity,
            title: title.to_string(),
            detail,
        });
        self.next_id
    }

    /// Queue an error.
    pub fn error(&mut self, title: &str, detail: impl Into<Option<String>>) -> u64 {
        self.push(Severity::Error, title, detail.into())
    }

    /// Queue an informational message.
    pub fn info(&mut self, title: &str) -> u64 {
        self.push(Severity::Info, title, None)
    }

    /// Remove a notification. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    /// The oldest notifications, at most [`MAX_VISIBLE`].
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter().take(MAX_VISIBLE)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dismiss() {
        let mut queue = NotificationQueue::new();
        let id = queue.error("Failed to save drawing", None);
        assert_eq!(queue.len(), 1);

        assert!(queue.dismiss(id));
        assert!(!queue.dismiss(id));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_visible_is_capped_and_ordered() {
        let mut queue = NotificationQueue::new();
        for i in 0..5 {
            queue.error(&format!("error {}", i), None);
        }

        let visible: Vec<&str> = queue.visible().map(|n| n.title.as_str()).collect();
        assert_eq!(visible, vec!["error 0", "error 1", "error 2"]);

        let first = queue.visible().next().map(|n| n.id).unwrap();
        queue.dismiss(first);
        assert_eq!(queue.visible().last().unwrap().title, "error 3");
    }

    #[test]
    fn test_detail_is_kept() {
        let mut queue = NotificationQueue::new();
        queue.error("Failed to delete drawing(s)", Some("HTTP 500: disk full".to_string()));
        let n = queue.visible().next().unwrap();
        assert_eq!(n.severity, Severity::Error);
        assert_eq!(n.detail.as_deref(), Some("HTTP 500: disk full"));
    }
}
