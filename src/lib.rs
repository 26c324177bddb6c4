//! # puzzle-host
//!
//! A minigame subsystem: a host that runs one interchangeable puzzle at a
//! time, plus two puzzle engines.
//!
//! ## Design Principles
//!
//! 1. **Pure Engines**: Puzzles are state machines driven by discrete
//!    events. No rendering, no timers, no globals.
//!
//! 2. **One Session**: The host holds at most one open puzzle and invokes
//!    exactly one completion callback per session.
//!
//! 3. **Errors Are Values**: Nothing in the subsystem panics on bad input or
//!    bad configuration. Failures become `false`, a no-op, or a `Failed`
//!    state with a reason.
//!
//! ## Modules
//!
//! - `core`: Identifiers, configuration, errors, RNG
//! - `puzzle`: The `Puzzle` trait and the one-shot completion signal
//! - `host`: Catalog, session lifecycle, input capability, terminals
//! - `games`: Tower of Hanoi and sequence-memory engines

pub mod core;
pub mod puzzle;
pub mod host;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    CellId, PegId,
    HanoiConfig, SequenceConfig, PuzzleSettings,
    CatalogError, ConfigError, GenerationError, HostError, MoveError, UndoError,
    PuzzleRng,
};

pub use crate::puzzle::{CompletionListener, CompletionSignal, InputResult, Puzzle, PuzzleInput};

pub use crate::host::{
    CatalogEntry, FinishedCallback, InputController, PuzzleCatalog, PuzzleFactory,
    PuzzleHost, PuzzleTerminal,
};

pub use crate::games::{standard_catalog, HANOI_ID, SEQUENCE_ID};

pub use crate::games::hanoi::{BoardStatus, HanoiEngine, HanoiPhase, HanoiView, MoveRecord};

pub use crate::games::sequence::{
    CellFeedback, FailureReason, SequenceEngine, SequencePhase, SequenceView,
};
