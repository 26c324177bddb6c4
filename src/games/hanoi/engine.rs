//! Tower-of-Hanoi state machine.

use std::any::Any;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::board::{min_moves, Board, Disk, MoveRecord};
use crate::core::{ConfigError, HanoiConfig, MoveError, PegId, UndoError};
use crate::puzzle::{CompletionListener, CompletionSignal, InputResult, Puzzle, PuzzleInput};

/// Lifecycle phase of a Hanoi puzzle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HanoiPhase {
    #[default]
    Idle,
    Playing,
    /// Solved optimally. Terminal.
    Completed,
    /// Cancelled. Terminal.
    Failed,
}

/// How the board relates to the win condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardStatus {
    InProgress,
    /// Every disk is on the target peg, but in more than the minimum moves.
    SolvedNotOptimal { moves: u32, min_moves: u32 },
    /// Every disk is on the target peg in exactly the minimum moves.
    Solved,
}

/// A disk picked up by the first click of a two-click move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub disk: Disk,
    pub from: PegId,
}

/// Result of one peg activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PegFeedback {
    /// Not playing; nothing happened.
    Ignored,
    /// First click on an empty peg.
    EmptyPeg(PegId),
    Picked(Selection),
    /// Second click on the same peg.
    Deselected,
    Moved(MoveRecord),
    /// Second click produced an illegal move; selection was cleared.
    Illegal(MoveError),
}

/// Read-only snapshot for the presentation layer.
///
/// `history` is a persistent vector, so taking a view is cheap even with a
/// long move log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HanoiView {
    /// Disks per peg in board order, bottom first.
    pub pegs: [Vec<Disk>; 3],
    pub selection: Option<Selection>,
    pub disk_count: usize,
    pub move_count: u32,
    pub min_moves: u32,
    pub phase: HanoiPhase,
    pub status: BoardStatus,
    pub history: im::Vector<MoveRecord>,
    pub source_peg: PegId,
    pub target_peg: PegId,
}

impl HanoiView {
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.phase == HanoiPhase::Playing && !self.history.is_empty()
    }
}

/// Tower-of-Hanoi puzzle engine.
///
/// The puzzle is won only by moving the whole tower from the source peg to
/// the target peg in exactly `2^n - 1` moves. Reaching the target with more
/// moves leaves the puzzle in play so the player can undo or reset.
///
/// ## Example
///
/// ```
/// use puzzle_host::core::{HanoiConfig, PegId};
/// use puzzle_host::games::hanoi::{HanoiEngine, HanoiPhase};
///
/// let config = HanoiConfig::new().with_disk_range(1, 3).with_disk_count(1);
/// let mut engine = HanoiEngine::new(config).unwrap();
/// engine.start();
///
/// engine.try_move(PegId::A, PegId::C).unwrap();
/// assert_eq!(engine.phase(), HanoiPhase::Completed);
/// ```
#[derive(Debug)]
pub struct HanoiEngine {
    config: HanoiConfig,
    disk_count: usize,
    board: Board,
    move_count: u32,
    min_moves: u32,
    history: im::Vector<MoveRecord>,
    selection: Option<Selection>,
    phase: HanoiPhase,
    completion: CompletionSignal,
}

impl HanoiEngine {
    /// Create an idle engine. Call `start` to set up the board.
    pub fn new(config: HanoiConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let disk_count = config.effective_disk_count();
        Ok(Self {
            config,
            disk_count,
            board: Board::new(),
            move_count: 0,
            min_moves: min_moves(disk_count),
            history: im::Vector::new(),
            selection: None,
            phase: HanoiPhase::Idle,
            completion: CompletionSignal::new(),
        })
    }

    /// Set up a fresh tower on the source peg and begin play.
    ///
    /// Discards the board, history, counters and selection. Usable from any
    /// phase; a finished puzzle restarts rather than resumes.
    pub fn start(&mut self) {
        self.phase = HanoiPhase::Idle;
        self.disk_count = self.config.effective_disk_count();
        self.board = Board::tower(self.disk_count, self.config.source_peg);
        self.min_moves = min_moves(self.disk_count);
        self.move_count = 0;
        self.history.clear();
        self.selection = None;
        self.phase = HanoiPhase::Playing;

        debug!(
            disks = self.disk_count,
            min_moves = self.min_moves,
            "hanoi puzzle started"
        );
    }

    /// Same as `start`.
    pub fn reset(&mut self) {
        self.start();
    }

    /// Handle a click on a peg (two-click pick-then-place protocol).
    pub fn activate_peg(&mut self, peg: PegId) -> PegFeedback {
        if self.phase != HanoiPhase::Playing {
            return PegFeedback::Ignored;
        }

        match self.selection.take() {
            None => match self.board.top(peg) {
                None => PegFeedback::EmptyPeg(peg),
                Some(disk) => {
                    let selection = Selection { disk, from: peg };
                    self.selection = Some(selection);
                    debug!(disk, %peg, "picked disk");
                    PegFeedback::Picked(selection)
                }
            },
            Some(selection) if selection.from == peg => PegFeedback::Deselected,
            Some(selection) => match self.try_move(selection.from, peg) {
                Ok(record) => PegFeedback::Moved(record),
                Err(err) => PegFeedback::Illegal(err),
            },
        }
    }

    /// Move the top disk of `from` onto `to`.
    ///
    /// On failure nothing changes. On success the move is counted, recorded
    /// in history, and the win condition is evaluated.
    pub fn try_move(&mut self, from: PegId, to: PegId) -> Result<MoveRecord, MoveError> {
        if self.phase != HanoiPhase::Playing {
            return Err(MoveError::NotPlaying);
        }

        let record = self.board.apply_move(from, to).map_err(|err| {
            debug!(%from, %to, %err, "illegal move");
            err
        })?;

        self.move_count += 1;
        self.history.push_back(record);
        debug_assert!(self.board.check_invariants(self.disk_count));
        debug!(disk = record.disk, %from, %to, moves = self.move_count, "moved disk");

        self.evaluate_win();
        Ok(record)
    }

    /// Undo the most recent move.
    ///
    /// If the board no longer agrees with the history, the whole history is
    /// dropped and `UndoError::StateMismatch` is returned; further undo is
    /// unavailable until a reset.
    pub fn undo(&mut self) -> Result<MoveRecord, UndoError> {
        if self.phase != HanoiPhase::Playing {
            return Err(UndoError::NotPlaying);
        }
        let record = self.history.pop_back().ok_or(UndoError::NothingToUndo)?;
        self.selection = None;

        let found = self.board.top(record.to);
        if found != Some(record.disk) {
            self.history.clear();
            warn!(
                peg = %record.to,
                expected = record.disk,
                ?found,
                "undo history out of sync with board, history cleared"
            );
            return Err(UndoError::StateMismatch {
                peg: record.to,
                expected: record.disk,
                found,
            });
        }

        self.board.transfer(record.to, record.from);
        self.move_count = self.move_count.saturating_sub(1);
        debug!(disk = record.disk, from = %record.to, to = %record.from, "undid move");
        Ok(record)
    }

    /// Abandon the puzzle. Publishes `false` unless an outcome was already
    /// published; returns whether it did.
    pub fn cancel(&mut self) -> bool {
        self.selection = None;
        if self.completion.is_fired() {
            return false;
        }
        self.phase = HanoiPhase::Failed;
        info!(moves = self.move_count, "hanoi puzzle cancelled");
        self.completion.emit(false)
    }

    fn evaluate_win(&mut self) {
        match self.board_status() {
            BoardStatus::Solved => {
                self.phase = HanoiPhase::Completed;
                self.selection = None;
                info!(moves = self.move_count, "hanoi puzzle solved optimally");
                self.completion.emit(true);
            }
            BoardStatus::SolvedNotOptimal { moves, min_moves } => {
                info!(moves, min_moves, "hanoi tower rebuilt, but not in the minimum moves");
            }
            BoardStatus::InProgress => {}
        }
    }

    /// Current standing against the win condition.
    #[must_use]
    pub fn board_status(&self) -> BoardStatus {
        if !self.board.holds_tower(self.config.target_peg, self.disk_count) {
            return BoardStatus::InProgress;
        }
        if self.move_count == self.min_moves {
            BoardStatus::Solved
        } else {
            BoardStatus::SolvedNotOptimal {
                moves: self.move_count,
                min_moves: self.min_moves,
            }
        }
    }

    #[must_use]
    pub fn phase(&self) -> HanoiPhase {
        self.phase
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn disk_count(&self) -> usize {
        self.disk_count
    }

    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    #[must_use]
    pub fn min_moves(&self) -> u32 {
        self.min_moves
    }

    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Applied moves, oldest first.
    #[must_use]
    pub fn history(&self) -> &im::Vector<MoveRecord> {
        &self.history
    }

    #[must_use]
    pub fn config(&self) -> &HanoiConfig {
        &self.config
    }

    /// Check the board invariants and that history length matches the move
    /// counter (history may be shorter after a state-mismatch recovery).
    #[must_use]
    pub fn check_invariants(&self) -> bool {
        self.board.check_invariants(self.disk_count)
            && self.history.len() <= self.move_count as usize
    }

    /// Snapshot for display.
    #[must_use]
    pub fn view(&self) -> HanoiView {
        HanoiView {
            pegs: PegId::ALL.map(|peg| self.board.peg(peg).to_vec()),
            selection: self.selection,
            disk_count: self.disk_count,
            move_count: self.move_count,
            min_moves: self.min_moves,
            phase: self.phase,
            status: self.board_status(),
            history: self.history.clone(),
            source_peg: self.config.source_peg,
            target_peg: self.config.target_peg,
        }
    }

    fn describe_move(&self, record: MoveRecord) -> String {
        match self.board_status() {
            BoardStatus::Solved => format!("Solved in {} moves!", self.move_count),
            BoardStatus::SolvedNotOptimal { moves, min_moves } => format!(
                "Tower rebuilt in {moves} moves, but the target is {min_moves}. Undo or reset to try again."
            ),
            BoardStatus::InProgress => format!(
                "Moved disk {} from {} to {}. {}",
                record.disk,
                record.from,
                record.to,
                self.status_line()
            ),
        }
    }
}

impl Puzzle for HanoiEngine {
    fn kind(&self) -> &'static str {
        "hanoi"
    }

    fn handle_input(&mut self, input: PuzzleInput) -> InputResult {
        match input {
            PuzzleInput::PegActivated(peg) => match self.activate_peg(peg) {
                PegFeedback::Ignored => InputResult::Ignored,
                PegFeedback::EmptyPeg(peg) => InputResult::Rejected(format!("Peg {peg} is empty.")),
                PegFeedback::Picked(sel) => {
                    InputResult::Applied(format!("Picked disk {} from peg {}.", sel.disk, sel.from))
                }
                PegFeedback::Deselected => InputResult::Applied("Selection cleared.".to_string()),
                PegFeedback::Moved(record) => InputResult::Applied(self.describe_move(record)),
                PegFeedback::Illegal(err) => InputResult::Rejected(err.to_string()),
            },
            PuzzleInput::Undo => match self.undo() {
                Ok(record) => InputResult::Applied(format!(
                    "Undid disk {} ({} -> {}). {}",
                    record.disk,
                    record.from,
                    record.to,
                    self.status_line()
                )),
                Err(err @ UndoError::StateMismatch { .. }) => InputResult::Rejected(err.to_string()),
                Err(_) => InputResult::Ignored,
            },
            PuzzleInput::Reset => {
                self.reset();
                InputResult::Applied(self.status_line())
            }
            PuzzleInput::Cancel => {
                if self.cancel() {
                    InputResult::Applied("Puzzle closed.".to_string())
                } else {
                    InputResult::Ignored
                }
            }
            PuzzleInput::CellActivated(_) => InputResult::Ignored,
        }
    }

    fn completion_listener(&mut self) -> Option<CompletionListener> {
        self.completion.listen()
    }

    fn status_line(&self) -> String {
        format!("Moves: {} / Target: {}", self.move_count, self.min_moves)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
