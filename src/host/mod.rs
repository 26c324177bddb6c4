//! Puzzle host: catalog, single-session lifecycle, and the collaborators
//! around it.
//!
//! ## Design Philosophy
//!
//! The host never knows concrete puzzle types. It instantiates catalog
//! entries through factories, talks to them through the `Puzzle` trait, and
//! reaches the rest of the world only through capabilities it is handed at
//! construction (`InputController`). There is no global player or scene.
//!
//! - `PuzzleCatalog`: id → factory, case-insensitive, first registration wins
//! - `PuzzleHost`: at most one open session, one callback per session
//! - `InputController`: world input toggle around a session
//! - `PuzzleTerminal`: an interactable that opens one puzzle

mod catalog;
mod controller;
mod input;
mod terminal;

pub use catalog::{normalize_id, CatalogEntry, PuzzleCatalog, PuzzleFactory};
pub use controller::{FinishedCallback, PuzzleHost};
pub use input::InputController;
pub use terminal::PuzzleTerminal;
