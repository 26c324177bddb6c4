//! The contract between the host and an interchangeable puzzle module.
//!
//! Puzzles implement `Puzzle` so the host can drive them without knowing
//! their concrete type:
//! - forward presentation events (`handle_input`)
//! - subscribe once to the completion notification (`completion_listener`)
//! - hand the concrete engine back for display (`as_any`)
//!
//! Destroying a puzzle is dropping it; no other teardown is required.

mod completion;

pub use completion::{CompletionListener, CompletionSignal};

use std::any::Any;

use serde::{Deserialize, Serialize};

use crate::core::{CellId, PegId};

/// A discrete event forwarded by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzleInput {
    /// A Hanoi peg was clicked.
    PegActivated(PegId),
    /// A sequence grid cell was clicked.
    CellActivated(CellId),
    /// Undo the last move.
    Undo,
    /// Restart the puzzle from scratch.
    Reset,
    /// Close the puzzle without solving it.
    Cancel,
}

/// What a puzzle did with an input, as display text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputResult {
    /// The input does not apply in the current state.
    Ignored,
    /// The input changed the puzzle.
    Applied(String),
    /// The input was refused; the puzzle is unchanged.
    Rejected(String),
}

impl InputResult {
    /// Whether the input changed the puzzle.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, InputResult::Applied(_))
    }

    /// The message to show the player, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            InputResult::Ignored => None,
            InputResult::Applied(msg) | InputResult::Rejected(msg) => Some(msg),
        }
    }
}

/// A puzzle module the host can open.
///
/// ## Implementation Notes
///
/// - `completion_listener` must return `Some` exactly once per instance; a
///   puzzle that returns `None` on the first call is a configuration error
///   and the host refuses to open it.
/// - The outcome must be published at most once (see `CompletionSignal`).
/// - `handle_input` runs synchronously; all state changes for one event
///   happen inside that call.
pub trait Puzzle: Any {
    /// Short name of the puzzle kind, for logs.
    fn kind(&self) -> &'static str;

    /// Apply one presentation event.
    fn handle_input(&mut self, input: PuzzleInput) -> InputResult;

    /// Take the one-shot completion listener.
    fn completion_listener(&mut self) -> Option<CompletionListener>;

    /// One-line status for display.
    fn status_line(&self) -> String;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
