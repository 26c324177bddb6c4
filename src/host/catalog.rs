//! Puzzle catalog: id → factory.
//!
//! Ids are trimmed and compared case-insensitively. Registration never
//! fails as a whole: each bad entry is logged, reported back, and skipped.

use rustc_hash::FxHashMap;
use tracing::warn;

use crate::core::{CatalogError, ConfigError};
use crate::puzzle::Puzzle;

/// Creates a fresh puzzle instance for one session.
pub type PuzzleFactory = Box<dyn Fn() -> Result<Box<dyn Puzzle>, ConfigError>>;

/// One catalog row as supplied by the embedding application.
pub struct CatalogEntry {
    pub id: String,
    pub factory: Option<PuzzleFactory>,
}

impl CatalogEntry {
    /// Create an entry with a factory.
    pub fn new<F>(id: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn Puzzle>, ConfigError> + 'static,
    {
        Self {
            id: id.into(),
            factory: Some(Box::new(factory)),
        }
    }

    /// Create an entry with no factory (rejected at registration).
    pub fn without_factory(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            factory: None,
        }
    }
}

impl std::fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("id", &self.id)
            .field("has_factory", &self.factory.is_some())
            .finish()
    }
}

struct Registered {
    /// Id as first registered (trimmed, original case).
    id: String,
    factory: PuzzleFactory,
}

/// Registered puzzles, keyed by normalized id.
///
/// ## Example
///
/// ```
/// use puzzle_host::core::HanoiConfig;
/// use puzzle_host::games::hanoi::HanoiEngine;
/// use puzzle_host::host::{CatalogEntry, PuzzleCatalog};
/// use puzzle_host::puzzle::Puzzle;
///
/// let mut catalog = PuzzleCatalog::new();
/// catalog
///     .register(CatalogEntry::new("Hanoi", || {
///         let engine = HanoiEngine::new(HanoiConfig::default())?;
///         Ok(Box::new(engine) as Box<dyn Puzzle>)
///     }))
///     .unwrap();
///
/// assert!(catalog.contains("  hanoi "));
/// assert!(catalog.instantiate("HANOI").is_some());
/// ```
#[derive(Default)]
pub struct PuzzleCatalog {
    entries: FxHashMap<String, Registered>,
}

impl PuzzleCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from entries, returning the rejected ones.
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> (Self, Vec<CatalogError>) {
        let mut catalog = Self::new();
        let rejected = entries
            .into_iter()
            .filter_map(|entry| catalog.register(entry).err())
            .collect();
        (catalog, rejected)
    }

    /// Register one entry. The first registration of an id wins.
    pub fn register(&mut self, entry: CatalogEntry) -> Result<(), CatalogError> {
        let id = entry.id.trim();
        if id.is_empty() {
            warn!("catalog entry has an empty id, skipping");
            return Err(CatalogError::EmptyId);
        }
        let Some(factory) = entry.factory else {
            warn!(id, "catalog entry has no factory, skipping");
            return Err(CatalogError::MissingFactory(id.to_string()));
        };

        let key = normalize_id(id);
        if self.entries.contains_key(&key) {
            warn!(id, "duplicate puzzle id, keeping the first registration");
            return Err(CatalogError::DuplicateId(id.to_string()));
        }

        self.entries.insert(
            key,
            Registered {
                id: id.to_string(),
                factory,
            },
        );
        Ok(())
    }

    /// Check if an id is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(&normalize_id(id))
    }

    /// Run the factory for `id`. `None` if the id is not registered.
    #[must_use]
    pub fn instantiate(&self, id: &str) -> Option<Result<Box<dyn Puzzle>, ConfigError>> {
        self.entries
            .get(&normalize_id(id))
            .map(|registered| (registered.factory)())
    }

    /// Registered ids as first supplied (trimmed), in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|r| r.id.as_str())
    }

    /// Get the number of registered puzzles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for PuzzleCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.ids()).finish()
    }
}

/// Canonical form of a puzzle id: trimmed and lowercased.
#[must_use]
pub fn normalize_id(id: &str) -> String {
    id.trim().to_lowercase()
}
