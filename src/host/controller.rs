//! Single-session puzzle lifecycle.

use tracing::{debug, info, warn};

use super::catalog::{CatalogEntry, PuzzleCatalog};
use super::input::InputController;
use crate::core::{CatalogError, HostError};
use crate::puzzle::{CompletionListener, InputResult, Puzzle, PuzzleInput};

/// Invoked once when a session ends, with the host and the outcome.
///
/// The host has already cleared the session, so the callback may open
/// another puzzle.
pub type FinishedCallback = Box<dyn FnOnce(&mut PuzzleHost, bool)>;

/// The one open puzzle.
struct PuzzleSession {
    id: String,
    instance: Box<dyn Puzzle>,
    listener: CompletionListener,
}

/// Owns the catalog and at most one open puzzle.
///
/// ## Lifecycle
///
/// 1. `open_puzzle` instantiates a catalog entry, disables world input and
///    subscribes to the puzzle's completion.
/// 2. The presentation layer forwards events through `dispatch`.
/// 3. When the puzzle publishes its outcome (or `close_puzzle` is called),
///    the instance is dropped, input is re-enabled and the callback runs.
///
/// ## Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use puzzle_host::core::{PegId, PuzzleSettings};
/// use puzzle_host::games::standard_catalog;
/// use puzzle_host::host::PuzzleHost;
/// use puzzle_host::puzzle::PuzzleInput;
///
/// let mut host = PuzzleHost::new(None);
/// host.register_catalog(standard_catalog(&PuzzleSettings::default()));
///
/// let outcome = Rc::new(Cell::new(None));
/// let seen = Rc::clone(&outcome);
/// assert!(host.open_puzzle("hanoi", move |_, success| seen.set(Some(success))));
/// assert!(host.is_open());
///
/// host.dispatch(PuzzleInput::Cancel);
/// assert!(!host.is_open());
/// assert_eq!(outcome.get(), Some(false));
/// ```
pub struct PuzzleHost {
    catalog: PuzzleCatalog,
    input: Option<Box<dyn InputController>>,
    session: Option<PuzzleSession>,
    on_finished: Option<FinishedCallback>,
}

impl PuzzleHost {
    /// Create a host with an empty catalog.
    ///
    /// Without an input controller the host still works; input toggles are
    /// logged and skipped.
    #[must_use]
    pub fn new(input: Option<Box<dyn InputController>>) -> Self {
        Self {
            catalog: PuzzleCatalog::new(),
            input,
            session: None,
            on_finished: None,
        }
    }

    /// Create a host that toggles `input` around each session.
    #[must_use]
    pub fn with_input(input: impl InputController + 'static) -> Self {
        Self::new(Some(Box::new(input)))
    }

    /// Replace the catalog with `entries`.
    ///
    /// Invalid entries are logged and skipped; the rejected ones are returned.
    pub fn register_catalog(
        &mut self,
        entries: impl IntoIterator<Item = CatalogEntry>,
    ) -> Vec<CatalogError> {
        let (catalog, rejected) = PuzzleCatalog::from_entries(entries);
        info!(
            registered = catalog.len(),
            rejected = rejected.len(),
            "puzzle catalog registered"
        );
        self.catalog = catalog;
        rejected
    }

    #[must_use]
    pub fn catalog(&self) -> &PuzzleCatalog {
        &self.catalog
    }

    /// Whether a session is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Id of the open session, as requested by the caller (trimmed).
    #[must_use]
    pub fn current_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.id.as_str())
    }

    /// Open puzzle `id`. Returns `false` if it could not be opened.
    ///
    /// See `try_open_puzzle` for the failure cases.
    pub fn open_puzzle<F>(&mut self, id: &str, on_finished: F) -> bool
    where
        F: FnOnce(&mut PuzzleHost, bool) + 'static,
    {
        match self.try_open_puzzle(id, on_finished) {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, "failed to open puzzle");
                false
            }
        }
    }

    /// Open puzzle `id`, reporting why it could not be opened.
    ///
    /// Fails with no side effects if a session is already open, `id` is
    /// blank, `id` is unknown, or the factory fails. A puzzle that exposes no
    /// completion notification is created and immediately closed again:
    /// input is restored and `on_finished` receives `false`.
    pub fn try_open_puzzle<F>(&mut self, id: &str, on_finished: F) -> Result<(), HostError>
    where
        F: FnOnce(&mut PuzzleHost, bool) + 'static,
    {
        if let Some(session) = &self.session {
            return Err(HostError::AlreadyOpen(session.id.clone()));
        }
        let id = id.trim();
        if id.is_empty() {
            return Err(HostError::BlankId);
        }

        let mut instance = self
            .catalog
            .instantiate(id)
            .ok_or_else(|| HostError::UnknownPuzzle(id.to_string()))?
            .map_err(|source| HostError::Instantiation {
                id: id.to_string(),
                source,
            })?;

        self.on_finished = Some(Box::new(on_finished));
        self.set_input_enabled(false);

        let Some(listener) = instance.completion_listener() else {
            drop(instance);
            self.set_input_enabled(true);
            if let Some(callback) = self.on_finished.take() {
                callback(self, false);
            }
            return Err(HostError::MissingCompletion(id.to_string()));
        };

        info!(id, kind = instance.kind(), "puzzle opened");
        self.session = Some(PuzzleSession {
            id: id.to_string(),
            instance,
            listener,
        });
        Ok(())
    }

    /// End the open session with `success`. No-op if nothing is open.
    pub fn close_puzzle(&mut self, success: bool) {
        let Some(session) = self.session.take() else {
            return;
        };
        info!(id = %session.id, success, "puzzle closed");
        drop(session);

        self.set_input_enabled(true);

        if let Some(callback) = self.on_finished.take() {
            callback(self, success);
        }
    }

    /// Forward a presentation event to the open puzzle.
    ///
    /// Returns `None` if no puzzle is open. If the event finishes the
    /// puzzle, the session is closed before this returns.
    pub fn dispatch(&mut self, input: PuzzleInput) -> Option<InputResult> {
        let session = self.session.as_mut()?;
        let result = session.instance.handle_input(input);
        debug!(id = %session.id, ?input, ?result, "puzzle input");
        self.poll_completion();
        Some(result)
    }

    /// Close the session if its puzzle has published an outcome.
    ///
    /// Returns whether a session was closed.
    pub fn poll_completion(&mut self) -> bool {
        let outcome = self
            .session
            .as_ref()
            .and_then(|session| session.listener.try_take());
        match outcome {
            Some(success) => {
                self.close_puzzle(success);
                true
            }
            None => false,
        }
    }

    /// Read the open puzzle as its concrete type.
    pub fn with_puzzle<T: Puzzle, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let session = self.session.as_ref()?;
        session.instance.as_any().downcast_ref::<T>().map(f)
    }

    /// Mutate the open puzzle as its concrete type, then poll completion.
    pub fn with_puzzle_mut<T: Puzzle, R>(&mut self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let session = self.session.as_mut()?;
        let result = session.instance.as_any_mut().downcast_mut::<T>().map(f);
        self.poll_completion();
        result
    }

    /// Status line of the open puzzle.
    #[must_use]
    pub fn status_line(&self) -> Option<String> {
        self.session.as_ref().map(|s| s.instance.status_line())
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        match self.input.as_mut() {
            Some(controller) => controller.set_input_enabled(enabled),
            None => warn!(enabled, "no input controller attached, skipping input toggle"),
        }
    }
}

impl std::fmt::Debug for PuzzleHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PuzzleHost")
            .field("catalog", &self.catalog)
            .field("has_input", &self.input.is_some())
            .field("open", &self.current_id())
            .finish()
    }
}
