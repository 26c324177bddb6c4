//! Core types shared by the host and every puzzle engine: identifiers,
//! configuration, errors, and RNG.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{
    CellId, HanoiConfig, PegId, PuzzleSettings, SequenceConfig, MAX_POOL_SIZE, MAX_SUPPORTED_DISKS,
};
pub use error::{
    CatalogError, ConfigError, GenerationError, HostError, MappingDefect, MoveError, UndoError,
};
pub use rng::PuzzleRng;
