//! The drawing store: state plus the async operations that change it.
//!
//! [`Store`] owns a [`DrawingState`] and drives the repository client. Each
//! operation tags itself with a fresh generation before its request goes out
//! and hands the response to the reducer with that tag, so a response that
//! was overtaken by a newer request of the same kind is dropped.
//!
//! State lives in `RefCell`s and is never borrowed across an `.await`;
//! several operations may be in flight on one event loop at a time.

use crate::api::{ApiError, ApiResult, DrawingApi};
use crate::command::Command;
use crate::location::{Location, LocationTarget, ROOT_PATH, drawing_path, parse_path};
use crate::model::{Drawing, DrawingId, DrawingKey, SceneElement};
use crate::notifications::NotificationQueue;
use crate::state::{Action, Applied, DrawingState, Generation, OperationKind};
use std::cell::{Ref, RefCell};

pub const REPOSITORIES_FAILED: &str = "Failed to load repositories";
pub const LISTING_FAILED: &str = "Failed to load drawing list";
pub const OPEN_FAILED: &str = "Failed to open drawing";
pub const SAVE_FAILED: &str = "Failed to save drawing";
pub const RENAME_FAILED: &str = "Failed to rename drawing(s)";
pub const DELETE_FAILED: &str = "Failed to delete drawing(s)";
pub const SAVED: &str = "Drawing saved";

/// Application state container.
pub struct Store<A: DrawingApi, L: Location> {
    api: A,
    location: L,
    state: RefCell<DrawingState>,
    notifications: RefCell<NotificationQueue>,
}

impl<A: DrawingApi, L: Location> Store<A, L> {
    pub fn new(api: A, location: L) -> Self {
        Self {
            api,
            location,
            state: RefCell::new(DrawingState::new()),
            notifications: RefCell::new(NotificationQueue::new()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    /// Borrow the current state. Do not hold the borrow across an `.await`.
    pub fn state(&self) -> Ref<'_, DrawingState> {
        self.state.borrow()
    }

    pub fn notifications(&self) -> Ref<'_, NotificationQueue> {
        self.notifications.borrow()
    }

    pub fn dismiss_notification(&self, id: u64) -> bool {
        self.notifications.borrow_mut().dismiss(id)
    }

    pub fn save_enabled(&self) -> bool {
        self.state.borrow().save_enabled()
    }

    fn start(&self, kind: OperationKind) -> Generation {
        self.state.borrow_mut().start(kind)
    }

    fn apply(&self, action: Action) -> Applied {
        self.state.borrow_mut().apply(action)
    }

    /// Record a failure and tell the user, unless a newer operation of the
    /// same kind already took over.
    fn fail(&self, kind: OperationKind, generation: Generation, title: &str, err: &ApiError) -> Applied {
        let applied = self.apply(Action::Failed { kind, generation });
        if applied == Applied::Yes {
            log::warn!("{}: {}", title, err);
            self.notifications.borrow_mut().error(title, Some(err.to_string()));
        }
        applied
    }

    fn navigate(&self, path: &str, title: &str) {
        if self.location.pathname() != path {
            self.location.push(path, title);
        }
    }

    // --- Listing ---

    /// Fetch the repository list.
    pub async fn load_repositories(&self) -> ApiResult<Applied> {
        let generation = self.start(OperationKind::Repositories);
        match self.api.list_repositories().await {
            Ok(repositories) => {
                log::debug!("Loaded {} repositories", repositories.len());
                Ok(self.apply(Action::RepositoriesLoaded {
                    generation,
                    repositories,
                }))
            }
            Err(err) => {
                self.fail(OperationKind::Repositories, generation, REPOSITORIES_FAILED, &err);
                Err(err)
            }
        }
    }

    /// Fetch the repository list, then every repository's listing.
    ///
    /// Run whenever the Open or Manage dialog is shown.
    pub async fn refresh_listings(&self) -> ApiResult<Applied> {
        let generation = self.start(OperationKind::Listing);
        if let Err(err) = self.load_repositories().await {
            // Already reported by the repositories tracker.
            self.apply(Action::Failed {
                kind: OperationKind::Listing,
                generation,
            });
            return Err(err);
        }

        let names: Vec<String> = self
            .state()
            .repositories()
            .iter()
            .map(|repo| repo.name.clone())
            .collect();

        let mut listings = Vec::with_capacity(names.len());
        for name in names {
            match self.api.list_drawings(&name).await {
                Ok(listing) => listings.push((name, listing)),
                Err(err) => {
                    self.fail(OperationKind::Listing, generation, LISTING_FAILED, &err);
                    return Err(err);
                }
            }
        }

        Ok(self.apply(Action::ListingsLoaded {
            generation,
            listings,
            replace_all: true,
        }))
    }

    /// Re-fetch one repository's listing.
    pub async fn load_listing(&self, repo: &str) -> ApiResult<Applied> {
        let generation = self.start(OperationKind::Listing);
        match self.api.list_drawings(repo).await {
            Ok(listing) => Ok(self.apply(Action::ListingsLoaded {
                generation,
                listings: vec![(repo.to_string(), listing)],
                replace_all: false,
            })),
            Err(err) => {
                self.fail(OperationKind::Listing, generation, LISTING_FAILED, &err);
                Err(err)
            }
        }
    }

    // --- Open / save ---

    /// Fetch a drawing and make it the open one.
    pub async fn open_drawing(&self, key: &DrawingKey) -> ApiResult<Applied> {
        let generation = self.start(OperationKind::Open);
        match self.api.fetch_drawing(&key.repo, &key.id).await {
            Ok(drawing) => {
                let title = drawing.title.clone();
                let applied = self.apply(Action::DrawingOpened { generation, drawing });
                if applied == Applied::Yes {
                    log::info!("Opened drawing \"{}\" ({}/{})", title, key.repo, key.id);
                    self.navigate(&drawing_path(key), &title);
                }
                Ok(applied)
            }
            Err(err) => {
                self.fail(OperationKind::Open, generation, OPEN_FAILED, &err);
                Err(err)
            }
        }
    }

    /// Create a drawing on the server and make it the open one.
    pub async fn create_drawing(
        &self,
        repo: &str,
        title: &str,
        elements: Vec<SceneElement>,
    ) -> ApiResult<Applied> {
        let generation = self.start(OperationKind::Save);
        match self.api.create_drawing(repo, title, &elements).await {
            Ok(id) => {
                let key = DrawingKey::new(repo, id.clone());
                let applied = self.apply(Action::DrawingSaved {
                    generation,
                    drawing: Drawing {
                        repo: repo.to_string(),
                        id: Some(id),
                        title: title.to_string(),
                        elements,
                    },
                });
                if applied == Applied::Yes {
                    log::info!("Created drawing \"{}\" ({}/{})", title, key.repo, key.id);
                    self.notifications.borrow_mut().info(SAVED);
                    self.navigate(&drawing_path(&key), title);
                }
                Ok(applied)
            }
            Err(err) => {
                self.fail(OperationKind::Save, generation, SAVE_FAILED, &err);
                Err(err)
            }
        }
    }

    /// Overwrite a persisted drawing. On success the open drawing becomes
    /// exactly what was sent.
    pub async fn save_drawing(&self, drawing: Drawing) -> ApiResult<Applied> {
        let generation = self.start(OperationKind::Save);
        match self.api.save_drawing(&drawing).await {
            Ok(()) => {
                let applied = self.apply(Action::DrawingSaved { generation, drawing });
                if applied == Applied::Yes {
                    self.notifications.borrow_mut().info(SAVED);
                }
                Ok(applied)
            }
            Err(err) => {
                self.fail(OperationKind::Save, generation, SAVE_FAILED, &err);
                Err(err)
            }
        }
    }

    // --- Manage ---

    pub async fn rename_drawing(&self, repo: &str, id: &DrawingId, title: &str) -> ApiResult<Applied> {
        let generation = self.start(OperationKind::Manage);
        match self.api.rename_drawing(repo, id, title).await {
            Ok(()) => {
                let applied = self.apply(Action::DrawingRenamed {
                    generation,
                    repo: repo.to_string(),
                    id: id.clone(),
                    title: title.to_string(),
                });
                // A failed refresh is reported by the listing tracker.
                let _ = self.load_listing(repo).await;
                Ok(applied)
            }
            Err(err) => {
                self.fail(OperationKind::Manage, generation, RENAME_FAILED, &err);
                Err(err)
            }
        }
    }

    /// Delete drawings. The open drawing is left alone even if it was one
    /// of them.
    pub async fn delete_drawings(&self, repo: &str, ids: &[DrawingId]) -> ApiResult<Applied> {
        let generation = self.start(OperationKind::Manage);
        match self.api.delete_drawings(repo, ids).await {
            Ok(()) => {
                log::info!("Deleted {} drawing(s) from {}", ids.len(), repo);
                let applied = self.apply(Action::DrawingsDeleted {
                    generation,
                    repo: repo.to_string(),
                    ids: ids.to_vec(),
                });
                let _ = self.load_listing(repo).await;
                Ok(applied)
            }
            Err(err) => {
                self.fail(OperationKind::Manage, generation, DELETE_FAILED, &err);
                Err(err)
            }
        }
    }

    // --- Local ---

    /// The editor reported new content.
    pub fn content_changed(&self, elements: Vec<SceneElement>) {
        self.apply(Action::ContentChanged(elements));
    }

    /// Start a new, empty drawing.
    pub fn clear(&self) {
        self.apply(Action::Cleared);
        self.navigate(ROOT_PATH, "");
    }

    /// Open whatever drawing the location points at. Returns the opened key.
    pub async fn restore_from_location(&self) -> ApiResult<Option<DrawingKey>> {
        let path = self.location.pathname();
        let key = match parse_path(&path) {
            None => return Ok(None),
            Some(LocationTarget::Drawing(key)) => key,
            Some(LocationTarget::Legacy(id)) => {
                self.refresh_listings().await?;
                let found = {
                    let state = self.state();
                    state
                        .repositories()
                        .iter()
                        .find(|repo| state.listing(&repo.name).iter().any(|entry| entry.id == id))
                        .map(|repo| DrawingKey::new(repo.name.clone(), id.clone()))
                };
                match found {
                    Some(key) => key,
                    None => {
                        log::warn!("No repository holds drawing {} from {}", id, path);
                        self.notifications
                            .borrow_mut()
                            .error(OPEN_FAILED, Some(format!("Drawing not found: {}", id)));
                        return Ok(None);
                    }
                }
            }
        };

        match self.open_drawing(&key).await? {
            Applied::Yes => Ok(Some(key)),
            Applied::Stale => Ok(None),
        }
    }

    /// Run a menu or dialog command.
    pub async fn execute(&self, command: Command) -> ApiResult<()> {
        match command {
            Command::Refresh => self.refresh_listings().await.map(|_| ()),
            Command::Open(key) => self.open_drawing(&key).await.map(|_| ()),
            Command::Create {
                repo,
                title,
                elements,
            } => self.create_drawing(&repo, &title, elements).await.map(|_| ()),
            Command::Save(drawing) => self.save_drawing(drawing).await.map(|_| ()),
            Command::Rename { repo, id, title } => {
                self.rename_drawing(&repo, &id, &title).await.map(|_| ())
            }
            Command::Delete { repo, ids } => self.delete_drawings(&repo, &ids).await.map(|_| ()),
            Command::New => {
                self.clear();
                Ok(())
            }
        }
    }
}
