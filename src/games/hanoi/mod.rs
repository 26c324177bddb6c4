//! Tower-of-Hanoi puzzle.
//!
//! - Three pegs; the tower starts on the source peg, largest disk at the bottom
//! - Click a peg to pick its top disk, click another peg to place it
//! - A disk may never sit on a smaller disk
//! - Every move can be undone
//! - Solved only when the whole tower is on the target peg in `2^n - 1` moves

mod board;
mod engine;

pub use board::{min_moves, Board, Disk, MoveRecord, Peg};
pub use engine::{BoardStatus, HanoiEngine, HanoiPhase, HanoiView, PegFeedback, Selection};
