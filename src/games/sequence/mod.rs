//! Sequence-memory puzzle (a "chimp test").
//!
//! - Each round scatters the numbers `1..=n` over a grid of cells
//! - Click 1 while everything is visible; the other numbers then vanish
//! - Click the remaining numbers in ascending order from memory
//! - Clearing a round starts one with `n + 1` numbers, up to `max_n`
//! - A wrong click fails the puzzle until it is restarted

mod engine;
mod mapping;

pub use engine::{
    CellFeedback, CellState, FailureReason, SequenceEngine, SequencePhase, SequenceView,
};
pub use mapping::{generate_validated, validate_mapping, Mapping, MappingGenerator, ShuffleGenerator};
