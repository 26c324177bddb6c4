//! Error types for the puzzle subsystem.
//!
//! Nothing here is fatal. Every error is reported to the caller as a value
//! and the subsystem stays in a safe, inspectable state:
//!
//! - Configuration problems (`CatalogError`, `HostError`, `ConfigError`) abort
//!   the operation and leave the host unchanged.
//! - Hanoi move and undo errors (`MoveError`, `UndoError`) leave the board
//!   untouched, except for `UndoError::StateMismatch` which clears history.
//! - `GenerationError` fails the current sequence round but keeps the puzzle
//!   open for a restart.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::PegId;

/// A catalog entry rejected during registration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog entry has an empty id")]
    EmptyId,

    #[error("catalog entry '{0}' has no factory")]
    MissingFactory(String),

    #[error("duplicate puzzle id '{0}', keeping the first registration")]
    DuplicateId(String),
}

/// Why the host refused to open a puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("a puzzle session is already open ('{0}')")]
    AlreadyOpen(String),

    #[error("puzzle id is blank")]
    BlankId,

    #[error("no puzzle registered for id '{0}'")]
    UnknownPuzzle(String),

    #[error("puzzle '{id}' could not be created: {source}")]
    Instantiation {
        id: String,
        #[source]
        source: ConfigError,
    },

    #[error("puzzle '{0}' exposes no completion notification")]
    MissingCompletion(String),
}

/// Invalid engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name}: minimum {min} exceeds maximum {max}")]
    InvertedRange {
        name: &'static str,
        min: usize,
        max: usize,
    },

    #[error("{name} must be within {lower}..={upper}, got {value}")]
    OutOfBounds {
        name: &'static str,
        value: usize,
        lower: usize,
        upper: usize,
    },

    #[error("source and target peg are both {0}")]
    SameSourceAndTarget(PegId),
}

/// An illegal Hanoi move. The board is never mutated when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no disk to move on peg {0}")]
    NoDiskToMove(PegId),

    #[error("cannot place disk {disk} on smaller disk {top} (peg {peg})")]
    LargerOntoSmaller { disk: u8, top: u8, peg: PegId },

    #[error("disk is already on peg {0}")]
    SamePeg(PegId),

    #[error("puzzle is not in play")]
    NotPlaying,
}

/// Why an undo request did nothing (or had to discard history).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UndoError {
    #[error("puzzle is not in play")]
    NotPlaying,

    #[error("nothing to undo")]
    NothingToUndo,

    /// History disagreed with the board; history has been cleared.
    #[error("undo history out of sync on peg {peg} (expected disk {expected}, found {found:?}); reset recommended")]
    StateMismatch {
        peg: PegId,
        expected: u8,
        found: Option<u8>,
    },
}

/// The sequence mapping could not be generated within the retry budget.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("failed to generate a valid mapping for {n} cells after {attempts} attempts: {last}")]
pub struct GenerationError {
    pub n: u8,
    pub attempts: usize,
    pub last: MappingDefect,
}

/// A specific defect found while validating a generated mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MappingDefect {
    #[error("mapping count mismatch: expected {expected}, got {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("missing number {0} in mapping")]
    MissingNumber(u8),

    #[error("cell {0} is outside the pool")]
    CellOutOfPool(u16),
}
