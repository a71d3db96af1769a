//! Drawing store state and its reducer.
//!
//! Every network-backed operation kind has its own [`Tracker`]. Starting an
//! operation issues a fresh [`Generation`]; a completion carries the
//! generation it was started with and is applied only if no newer instance of
//! the same kind has been started since. Superseded responses are discarded,
//! so the latest request always wins.

use crate::model::{Drawing, DrawingId, DrawingSummary, RepositoryRef, SceneElement};
use std::collections::BTreeMap;

/// Status of one network-backed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AsyncStatus {
    #[default]
    Idle,
    InProgress,
    Failed,
}

/// Operation kinds tracked independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Listing repositories.
    Repositories,
    /// Listing drawings of one or all repositories.
    Listing,
    /// Fetching the drawing to edit.
    Open,
    /// Creating or saving the drawing in edit.
    Save,
    /// Renaming or deleting drawings.
    Manage,
}

/// Monotonically increasing tag of one operation instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Status plus latest issued generation of one operation kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tracker {
    status: AsyncStatus,
    latest: u64,
    in_flight: u32,
}

impl Tracker {
    /// Issue a new generation and mark the operation in progress.
    fn start(&mut self) -> Generation {
        self.latest += 1;
        self.in_flight += 1;
        self.status = AsyncStatus::InProgress;
        Generation(self.latest)
    }

    /// Invalidate any in-flight instance without starting a new one.
    fn supersede(&mut self) {
        self.latest += 1;
        self.in_flight = 0;
        self.status = AsyncStatus::Idle;
    }

    fn is_latest(&self, generation: Generation) -> bool {
        generation.0 == self.latest
    }

    /// Finish one of several independent instances. The tracker stays in
    /// progress while others are outstanding.
    fn settle(&mut self, status: AsyncStatus) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.status = match status {
            AsyncStatus::Failed => AsyncStatus::Failed,
            _ if self.in_flight > 0 => AsyncStatus::InProgress,
            _ => AsyncStatus::Idle,
        };
    }

    pub fn status(&self) -> AsyncStatus {
        self.status
    }
}

/// Completion events fed to [`DrawingState::apply`].
#[derive(Debug, Clone)]
pub enum Action {
    RepositoriesLoaded {
        generation: Generation,
        repositories: Vec<RepositoryRef>,
    },
    /// Listings for the given repositories. With `replace_all`, listings of
    /// repositories not mentioned are dropped from the cache.
    ListingsLoaded {
        generation: Generation,
        listings: Vec<(String, Vec<DrawingSummary>)>,
        replace_all: bool,
    },
    DrawingOpened {
        generation: Generation,
        drawing: Drawing,
    },
    /// Create or save succeeded; `drawing` is the payload that was sent,
    /// carrying the server-assigned id for a create.
    DrawingSaved {
        generation: Generation,
        drawing: Drawing,
    },
    DrawingRenamed {
        generation: Generation,
        repo: String,
        id: DrawingId,
        title: String,
    },
    DrawingsDeleted {
        generation: Generation,
        repo: String,
        ids: Vec<DrawingId>,
    },
    Failed {
        kind: OperationKind,
        generation: Generation,
    },
    /// The editor reported new content.
    ContentChanged(Vec<SceneElement>),
    /// "New": discard the open drawing.
    Cleared,
}

/// Result of applying an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// State changed.
    Yes,
    /// A newer operation of the same kind was started; the action was ignored.
    Stale,
}

/// The drawing store's state.
#[derive(Debug, Clone, Default)]
pub struct DrawingState {
    repositories: Vec<RepositoryRef>,
    listings: BTreeMap<String, Vec<DrawingSummary>>,
    saved_drawing: Drawing,
    current_content: Vec<SceneElement>,
    /// Bumped whenever `saved_drawing` is replaced wholesale.
    revision: u64,
    repositories_op: Tracker,
    listing_op: Tracker,
    open_op: Tracker,
    save_op: Tracker,
    manage_op: Tracker,
}

impl DrawingState {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Selectors ---

    pub fn repositories(&self) -> &[RepositoryRef] {
        &self.repositories
    }

    /// Find a known repository by name.
    pub fn repository(&self, name: &str) -> Option<&RepositoryRef> {
        self.repositories.iter().find(|repo| repo.name == name)
    }

    pub fn listings(&self) -> &BTreeMap<String, Vec<DrawingSummary>> {
        &self.listings
    }

    /// Cached listing of one repository (empty if never loaded).
    pub fn listing(&self, repo: &str) -> &[DrawingSummary] {
        self.listings.get(repo).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The last fetched or saved drawing.
    pub fn saved_drawing(&self) -> &Drawing {
        &self.saved_drawing
    }

    /// The editor's content, possibly ahead of the saved drawing.
    pub fn current_content(&self) -> &[SceneElement] {
        &self.current_content
    }

    /// Identity of the open drawing; changes whenever it is replaced.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn status(&self, kind: OperationKind) -> AsyncStatus {
        self.tracker(kind).status()
    }

    /// Saving is offered iff the editor content differs from the saved drawing.
    pub fn save_enabled(&self) -> bool {
        self.current_content != self.saved_drawing.elements
    }

    fn tracker(&self, kind: OperationKind) -> &Tracker {
        match kind {
            OperationKind::Repositories => &self.repositories_op,
            OperationKind::Listing => &self.listing_op,
            OperationKind::Open => &self.open_op,
            OperationKind::Save => &self.save_op,
            OperationKind::Manage => &self.manage_op,
        }
    }

    fn tracker_mut(&mut self, kind: OperationKind) -> &mut Tracker {
        match kind {
            OperationKind::Repositories => &mut self.repositories_op,
            OperationKind::Listing => &mut self.listing_op,
            OperationKind::Open => &mut self.open_op,
            OperationKind::Save => &mut self.save_op,
            OperationKind::Manage => &mut self.manage_op,
        }
    }

    // --- Transitions ---

    /// Start an operation: mark it in progress and tag it.
    pub fn start(&mut self, kind: OperationKind) -> Generation {
        self.tracker_mut(kind).start()
    }

    /// Finish the tracked operation if `generation` is still the latest.
    ///
    /// Renames and deletes target different drawings and never replace one
    /// another, so every Manage completion is applied.
    fn finish(&mut self, kind: OperationKind, generation: Generation, status: AsyncStatus) -> Applied {
        let tracker = self.tracker_mut(kind);
        if kind == OperationKind::Manage {
            tracker.settle(status);
            return Applied::Yes;
        }
        if !tracker.is_latest(generation) {
            log::debug!(
                "Discarding stale {:?} response (generation {}, latest {})",
                kind,
                generation.0,
                tracker.latest
            );
            return Applied::Stale;
        }
        tracker.status = status;
        Applied::Yes
    }

    fn replace_drawing(&mut self, drawing: Drawing) {
        self.saved_drawing = drawing;
        self.revision += 1;
    }

    /// Apply a completion or local event.
    pub fn apply(&mut self, action: Action) -> Applied {
        match action {
            Action::RepositoriesLoaded {
                generation,
                repositories,
            } => {
                let applied = self.finish(OperationKind::Repositories, generation, AsyncStatus::Idle);
                if applied == Applied::Yes {
                    self.listings
                        .retain(|name, _| repositories.iter().any(|repo| &repo.name == name));
                    self.repositories = repositories;
                }
                applied
            }
            Action::ListingsLoaded {
                generation,
                listings,
                replace_all,
            } => {
                let applied = self.finish(OperationKind::Listing, generation, AsyncStatus::Idle);
                if applied == Applied::Yes {
                    if replace_all {
                        self.listings.clear();
                    }
                    self.listings.extend(listings);
                }
                applied
            }
            Action::DrawingOpened { generation, drawing } => {
                let applied = self.finish(OperationKind::Open, generation, AsyncStatus::Idle);
                if applied == Applied::Yes {
                    self.current_content = drawing.elements.clone();
                    self.replace_drawing(drawing);
                }
                applied
            }
            Action::DrawingSaved { generation, drawing } => {
                let applied = self.finish(OperationKind::Save, generation, AsyncStatus::Idle);
                if applied == Applied::Yes {
                    self.replace_drawing(drawing);
                }
                applied
            }
            Action::DrawingRenamed {
                generation,
                repo,
                id,
                title,
            } => {
                let applied = self.finish(OperationKind::Manage, generation, AsyncStatus::Idle);
                if applied == Applied::Yes {
                    if let Some(entry) = self
                        .listings
                        .get_mut(&repo)
                        .and_then(|listing| listing.iter_mut().find(|entry| entry.id == id))
                    {
                        entry.title = title.clone();
                    }
                    if self.saved_drawing.is(&repo, &id) {
                        // Title-only change: the scene stays, so no new revision.
                        self.saved_drawing.title = title;
                    }
                }
                applied
            }
            Action::DrawingsDeleted {
                generation,
                repo,
                ids,
            } => {
                let applied = self.finish(OperationKind::Manage, generation, AsyncStatus::Idle);
                if applied == Applied::Yes {
                    if let Some(listing) = self.listings.get_mut(&repo) {
                        listing.retain(|entry| !ids.contains(&entry.id));
                    }
                }
                applied
            }
            Action::Failed { kind, generation } => {
                self.finish(kind, generation, AsyncStatus::Failed)
            }
            Action::ContentChanged(elements) => {
                self.current_content = elements;
                Applied::Yes
            }
            Action::Cleared => {
                // Responses still in flight for the old drawing must not land.
                self.open_op.supersede();
                self.save_op.supersede();
                self.current_content.clear();
                self.replace_drawing(Drawing::empty());
                Applied::Yes
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn drawing(id: &str, title: &str, elements: Vec<SceneElement>) -> Drawing {
        Drawing {
            repo: "work".to_string(),
            id: Some(DrawingId::new(id)),
            title: title.to_string(),
            elements,
        }
    }

    #[test]
    fn test_operation_lifecycle() {
        let mut state = DrawingState::new();
        assert_eq!(state.status(OperationKind::Open), AsyncStatus::Idle);

        let generation = state.start(OperationKind::Open);
        assert_eq!(state.status(OperationKind::Open), AsyncStatus::InProgress);

        state.apply(Action::Failed {
            kind: OperationKind::Open,
            generation,
        });
        assert_eq!(state.status(OperationKind::Open), AsyncStatus::Failed);

        let generation = state.start(OperationKind::Open);
        state.apply(Action::DrawingOpened {
            generation,
            drawing: drawing("1", "Sketch", vec![]),
        });
        assert_eq!(state.status(OperationKind::Open), AsyncStatus::Idle);
    }

    #[test]
    fn test_latest_open_wins() {
        let mut state = DrawingState::new();
        let first = state.start(OperationKind::Open);
        let second = state.start(OperationKind::Open);

        let applied = state.apply(Action::DrawingOpened {
            generation: second,
            drawing: drawing("b", "B", vec![]),
        });
        assert_eq!(applied, Applied::Yes);

        let applied = state.apply(Action::DrawingOpened {
            generation: first,
            drawing: drawing("a", "A", vec![]),
        });
        assert_eq!(applied, Applied::Stale);
        assert_eq!(state.saved_drawing().title, "B");
    }

    #[test]
    fn test_stale_failure_does_not_flip_status() {
        let mut state = DrawingState::new();
        let first = state.start(OperationKind::Save);
        let _second = state.start(OperationKind::Save);

        state.apply(Action::Failed {
            kind: OperationKind::Save,
            generation: first,
        });
        assert_eq!(state.status(OperationKind::Save), AsyncStatus::InProgress);
    }

    #[test]
    fn test_generations_are_per_kind() {
        let mut state = DrawingState::new();
        let open = state.start(OperationKind::Open);
        let _save = state.start(OperationKind::Save);

        let applied = state.apply(Action::DrawingOpened {
            generation: open,
            drawing: drawing("1", "Sketch", vec![]),
        });
        assert_eq!(applied, Applied::Yes);
    }

    #[test]
    fn test_save_enabled_tracks_content() {
        let mut state = DrawingState::new();
        assert!(!state.save_enabled());

        let generation = state.start(OperationKind::Open);
        state.apply(Action::DrawingOpened {
            generation,
            drawing: drawing("1", "Sketch", vec![json!({"id": "e1"})]),
        });
        assert!(!state.save_enabled());

        state.apply(Action::ContentChanged(vec![json!({"id": "e1"}), json!({"id": "e2"})]));
        assert!(state.save_enabled());
        assert_eq!(state.saved_drawing().elements.len(), 1);

        let mut sent = state.saved_drawing().clone();
        sent.elements = state.current_content().to_vec();
        let generation = state.start(OperationKind::Save);
        state.apply(Action::DrawingSaved {
            generation,
            drawing: sent,
        });
        assert!(!state.save_enabled());
    }

    #[test]
    fn test_revision_bumps_on_replacement_only() {
        let mut state = DrawingState::new();
        let generation = state.start(OperationKind::Open);
        state.apply(Action::DrawingOpened {
            generation,
            drawing: drawing("1", "Sketch", vec![]),
        });
        let revision = state.revision();

        state.apply(Action::ContentChanged(vec![json!({})]));
        assert_eq!(state.revision(), revision);

        let generation = state.start(OperationKind::Manage);
        state.apply(Action::DrawingRenamed {
            generation,
            repo: "work".to_string(),
            id: DrawingId::new("1"),
            title: "Renamed".to_string(),
        });
        assert_eq!(state.revision(), revision);
        assert_eq!(state.saved_drawing().title, "Renamed");
        assert_eq!(state.saved_drawing().id, Some(DrawingId::new("1")));

        state.apply(Action::Cleared);
        assert!(state.revision() > revision);
    }

    #[test]
    fn test_rename_of_other_drawing_leaves_open_one() {
        let mut state = DrawingState::new();
        let generation = state.start(OperationKind::Open);
        state.apply(Action::DrawingOpened {
            generation,
            drawing: drawing("1", "Sketch", vec![]),
        });

        let generation = state.start(OperationKind::Manage);
        state.apply(Action::DrawingRenamed {
            generation,
            repo: "work".to_string(),
            id: DrawingId::new("2"),
            title: "Other".to_string(),
        });
        assert_eq!(state.saved_drawing().title, "Sketch");
    }

    #[test]
    fn test_rename_lands_after_later_delete() {
        let mut state = DrawingState::new();
        let generation = state.start(OperationKind::Open);
        state.apply(Action::DrawingOpened {
            generation,
            drawing: drawing("1", "Sketch", vec![]),
        });

        let rename = state.start(OperationKind::Manage);
        let delete = state.start(OperationKind::Manage);
        let applied = state.apply(Action::DrawingsDeleted {
            generation: delete,
            repo: "work".to_string(),
            ids: vec![DrawingId::new("2")],
        });
        assert_eq!(applied, Applied::Yes);
        assert_eq!(state.status(OperationKind::Manage), AsyncStatus::InProgress);

        let applied = state.apply(Action::DrawingRenamed {
            generation: rename,
            repo: "work".to_string(),
            id: DrawingId::new("1"),
            title: "Renamed".to_string(),
        });
        assert_eq!(applied, Applied::Yes);
        assert_eq!(state.saved_drawing().title, "Renamed");
        assert_eq!(state.status(OperationKind::Manage), AsyncStatus::Idle);
    }

    #[test]
    fn test_clear_discards_in_flight_open() {
        let mut state = DrawingState::new();
        let generation = state.start(OperationKind::Open);
        state.apply(Action::Cleared);

        let applied = state.apply(Action::DrawingOpened {
            generation,
            drawing: drawing("1", "Sketch", vec![json!({})]),
        });
        assert_eq!(applied, Applied::Stale);
        assert_eq!(state.saved_drawing(), &Drawing::empty());
        assert_eq!(state.status(OperationKind::Open), AsyncStatus::Idle);
    }

    #[test]
    fn test_repository_refresh_prunes_listings() {
        let mut state = DrawingState::new();
        let generation = state.start(OperationKind::Listing);
        state.apply(Action::ListingsLoaded {
            generation,
            listings: vec![
                ("work".to_string(), vec![DrawingSummary::new("1", "Sketch")]),
                ("gone".to_string(), vec![]),
            ],
            replace_all: true,
        });

        let generation = state.start(OperationKind::Repositories);
        state.apply(Action::RepositoriesLoaded {
            generation,
            repositories: vec![RepositoryRef::new("work", "Work")],
        });

        assert_eq!(state.listings().len(), 1);
        assert_eq!(state.listing("work").len(), 1);
        assert!(state.listing("gone").is_empty());
    }
}
