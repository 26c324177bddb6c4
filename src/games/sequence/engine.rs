//! Sequence-memory state machine.

use std::any::Any;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::mapping::{generate_validated, Mapping, MappingGenerator, ShuffleGenerator};
use crate::core::{CellId, ConfigError, GenerationError, PuzzleRng, SequenceConfig};
use crate::puzzle::{CompletionListener, CompletionSignal, InputResult, Puzzle, PuzzleInput};

/// Phase of the sequence puzzle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequencePhase {
    #[default]
    Idle,
    /// Transient while a round is being laid out.
    ShowingNumbers,
    /// Numbers are visible; the player must click 1.
    WaitingFirstClick,
    /// Numbers are hidden; the player clicks 2, 3, ... in order.
    InSequence,
    /// Terminal until an explicit restart.
    Failed,
    /// Final round cleared. Terminal.
    Completed,
}

impl SequencePhase {
    /// Whether cell clicks are accepted.
    #[must_use]
    pub fn accepts_clicks(self) -> bool {
        matches!(self, SequencePhase::WaitingFirstClick | SequencePhase::InSequence)
    }
}

/// Why the puzzle entered `Failed`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    /// The player clicked the wrong number.
    WrongCell { expected: u8, got: u8 },
    /// The round could not be laid out.
    Generation(GenerationError),
    /// The player closed the puzzle.
    Cancelled,
}

impl FailureReason {
    /// Internal errors are not the player's fault.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, FailureReason::Generation(_))
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::WrongCell { expected: 1, .. } => f.write_str("Wrong start! You must click 1."),
            FailureReason::WrongCell { expected, .. } => write!(f, "Wrong! Expected {expected}."),
            FailureReason::Generation(_) => f.write_str("Internal error generating tiles."),
            FailureReason::Cancelled => f.write_str("Puzzle closed."),
        }
    }
}

/// Per-cell state, as the presentation layer should draw it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellState {
    /// Number assigned this round, if any.
    pub number: Option<u8>,
    /// Whether the number label is shown.
    pub label_visible: bool,
    /// Clicked correctly this round.
    pub consumed: bool,
    /// Whether clicks on this cell are accepted.
    pub enabled: bool,
}

impl CellState {
    /// The label text to display, if any.
    #[must_use]
    pub fn label(&self) -> Option<u8> {
        self.number.filter(|_| self.label_visible)
    }
}

/// Result of one cell activation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellFeedback {
    /// Not accepting clicks, or the cell has no live number.
    Ignored,
    /// Correct click; `next` is the number expected now.
    Correct { value: u8, next: u8 },
    /// Round cleared and the next, larger round has been laid out.
    RoundComplete { finished: u8, next_round: u8 },
    /// Final round cleared.
    PuzzleComplete,
    Failed(FailureReason),
}

/// Read-only snapshot for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceView {
    pub phase: SequencePhase,
    pub current_n: u8,
    pub max_n: u8,
    pub expected_next: u8,
    pub columns: u16,
    pub rows: u16,
    /// Every cell in the pool, row-major.
    pub cells: Vec<CellState>,
    pub failure: Option<FailureReason>,
    pub status: String,
}

/// Sequence-memory ("chimp test") puzzle engine.
///
/// Each round scatters `1..=n` over a grid. The player clicks 1 while all
/// numbers are visible; the rest are then hidden and must be clicked in
/// order from memory. Clearing a round starts the next with one more
/// number, until round `max_n` is cleared.
///
/// ## Example
///
/// ```
/// use puzzle_host::core::SequenceConfig;
/// use puzzle_host::games::sequence::{SequenceEngine, SequencePhase};
///
/// let config = SequenceConfig::new().with_rounds(2, 2).with_seed(1);
/// let mut engine = SequenceEngine::new(config).unwrap();
/// engine.restart().unwrap();
///
/// for number in 1..=2 {
///     let cell = engine.cell_with_number(number).unwrap();
///     engine.activate_cell(cell);
/// }
/// assert_eq!(engine.phase(), SequencePhase::Completed);
/// ```
#[derive(Debug)]
pub struct SequenceEngine {
    config: SequenceConfig,
    rng: PuzzleRng,
    generator: Box<dyn MappingGenerator>,
    current_n: u8,
    expected_next: u8,
    mapping: Mapping,
    cells: Vec<CellState>,
    phase: SequencePhase,
    failure: Option<FailureReason>,
    completion: CompletionSignal,
}

impl SequenceEngine {
    /// Create an idle engine using the shuffle generator.
    pub fn new(config: SequenceConfig) -> Result<Self, ConfigError> {
        Self::with_generator(config, Box::new(ShuffleGenerator))
    }

    /// Create an idle engine with a custom layout generator.
    pub fn with_generator(
        config: SequenceConfig,
        generator: Box<dyn MappingGenerator>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = PuzzleRng::seeded_or_entropy(config.seed);
        let cells = vec![CellState::default(); config.pool_size()];
        Ok(Self {
            current_n: config.start_n,
            config,
            rng,
            generator,
            expected_next: 1,
            mapping: Mapping::default(),
            cells,
            phase: SequencePhase::Idle,
            failure: None,
            completion: CompletionSignal::new(),
        })
    }

    /// Start over from the first round.
    pub fn restart(&mut self) -> Result<(), GenerationError> {
        self.start_round(self.config.start_n.max(2))
    }

    /// Lay out a round of size `n` (clamped into `[start_n, max_n]`).
    ///
    /// On a generation failure the puzzle moves to `Failed` with an internal
    /// reason and stays open for a restart.
    pub fn start_round(&mut self, n: u8) -> Result<(), GenerationError> {
        self.current_n = self.config.clamp_round(n);
        self.expected_next = 1;
        self.failure = None;
        self.phase = SequencePhase::ShowingNumbers;
        self.mapping.clear();
        self.cells.fill(CellState::default());

        let mapping = match generate_validated(
            self.generator.as_mut(),
            self.current_n,
            self.cells.len(),
            self.config.max_generation_attempts,
            &mut self.rng,
        ) {
            Ok(mapping) => mapping,
            Err(err) => {
                warn!(%err, "sequence round aborted");
                self.fail(FailureReason::Generation(err.clone()));
                return Err(err);
            }
        };

        for (&cell, &number) in &mapping {
            self.cells[usize::from(cell.raw())] = CellState {
                number: Some(number),
                label_visible: true,
                consumed: false,
                enabled: true,
            };
        }
        self.mapping = mapping;
        self.phase = SequencePhase::WaitingFirstClick;

        debug!(n = self.current_n, "sequence round started");
        Ok(())
    }

    /// Handle a click on a grid cell.
    pub fn activate_cell(&mut self, cell: CellId) -> CellFeedback {
        if !self.phase.accepts_clicks() {
            return CellFeedback::Ignored;
        }
        let Some(&value) = self.mapping.get(&cell) else {
            return CellFeedback::Ignored;
        };
        if !self.cells[usize::from(cell.raw())].enabled {
            return CellFeedback::Ignored;
        }

        if value != self.expected_next {
            let reason = FailureReason::WrongCell {
                expected: self.expected_next,
                got: value,
            };
            self.fail(reason.clone());
            return CellFeedback::Failed(reason);
        }

        self.consume(cell);
        if self.phase == SequencePhase::WaitingFirstClick {
            for state in &mut self.cells {
                state.label_visible = false;
            }
            self.phase = SequencePhase::InSequence;
        }

        debug!(value, n = self.current_n, "correct cell");
        if value >= self.current_n {
            return self.complete_round();
        }

        self.expected_next = value + 1;
        CellFeedback::Correct {
            value,
            next: self.expected_next,
        }
    }

    /// Abandon the puzzle. Publishes `false` unless an outcome was already
    /// published; returns whether it did.
    pub fn cancel(&mut self) -> bool {
        if self.completion.is_fired() {
            return false;
        }
        self.fail(FailureReason::Cancelled);
        self.completion.emit(false)
    }

    fn consume(&mut self, cell: CellId) {
        let state = &mut self.cells[usize::from(cell.raw())];
        state.consumed = true;
        state.enabled = false;
        state.label_visible = false;
    }

    fn complete_round(&mut self) -> CellFeedback {
        let finished = self.current_n;

        if finished >= self.config.max_n {
            self.phase = SequencePhase::Completed;
            for state in &mut self.cells {
                state.label_visible = state.number.is_some();
                state.enabled = false;
            }
            info!(final_round = finished, "sequence puzzle completed");
            self.completion.emit(true);
            return CellFeedback::PuzzleComplete;
        }

        match self.start_round(finished + 1) {
            Ok(()) => CellFeedback::RoundComplete {
                finished,
                next_round: self.current_n,
            },
            Err(err) => CellFeedback::Failed(FailureReason::Generation(err)),
        }
    }

    fn fail(&mut self, reason: FailureReason) {
        for state in &mut self.cells {
            state.enabled = false;
        }
        if reason.is_internal() {
            warn!(%reason, n = self.current_n, "sequence puzzle failed");
        } else {
            info!(%reason, n = self.current_n, "sequence puzzle failed");
        }
        self.phase = SequencePhase::Failed;
        self.failure = Some(reason);
    }

    #[must_use]
    pub fn phase(&self) -> SequencePhase {
        self.phase
    }

    /// Size of the current round.
    #[must_use]
    pub fn current_n(&self) -> u8 {
        self.current_n
    }

    #[must_use]
    pub fn expected_next(&self) -> u8 {
        self.expected_next
    }

    #[must_use]
    pub fn failure(&self) -> Option<&FailureReason> {
        self.failure.as_ref()
    }

    /// Current round layout.
    #[must_use]
    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    /// The cell carrying `number` this round.
    #[must_use]
    pub fn cell_with_number(&self, number: u8) -> Option<CellId> {
        self.mapping
            .iter()
            .find_map(|(&cell, &n)| (n == number).then_some(cell))
    }

    #[must_use]
    pub fn cell(&self, cell: CellId) -> Option<&CellState> {
        self.cells.get(usize::from(cell.raw()))
    }

    #[must_use]
    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }

    /// Snapshot for display.
    #[must_use]
    pub fn view(&self) -> SequenceView {
        SequenceView {
            phase: self.phase,
            current_n: self.current_n,
            max_n: self.config.max_n,
            expected_next: self.expected_next,
            columns: self.config.grid_columns,
            rows: self.config.grid_rows,
            cells: self.cells.clone(),
            failure: self.failure.clone(),
            status: self.status_line(),
        }
    }
}

impl Puzzle for SequenceEngine {
    fn kind(&self) -> &'static str {
        "sequence"
    }

    fn handle_input(&mut self, input: PuzzleInput) -> InputResult {
        match input {
            PuzzleInput::CellActivated(cell) => match self.activate_cell(cell) {
                CellFeedback::Ignored => InputResult::Ignored,
                CellFeedback::Failed(reason) => InputResult::Rejected(self.status_line_for(&reason)),
                CellFeedback::Correct { .. }
                | CellFeedback::RoundComplete { .. }
                | CellFeedback::PuzzleComplete => InputResult::Applied(self.status_line()),
            },
            PuzzleInput::Reset => match self.restart() {
                Ok(()) => InputResult::Applied(self.status_line()),
                Err(_) => InputResult::Rejected(self.status_line()),
            },
            PuzzleInput::Cancel => {
                if self.cancel() {
                    InputResult::Applied(FailureReason::Cancelled.to_string())
                } else {
                    InputResult::Ignored
                }
            }
            PuzzleInput::PegActivated(_) | PuzzleInput::Undo => InputResult::Ignored,
        }
    }

    fn completion_listener(&mut self) -> Option<CompletionListener> {
        self.completion.listen()
    }

    fn status_line(&self) -> String {
        match (&self.phase, &self.failure) {
            (SequencePhase::Failed, Some(reason)) => self.status_line_for(reason),
            (SequencePhase::Failed, None) => "Failed.".to_string(),
            (SequencePhase::Idle, _) => "Press start.".to_string(),
            (SequencePhase::ShowingNumbers, _) => format!("Memorize 1-{}.", self.current_n),
            (SequencePhase::WaitingFirstClick, _) => {
                format!("Memorize 1-{} and click 1.", self.current_n)
            }
            (SequencePhase::InSequence, _) => format!("Good. Now click {}.", self.expected_next),
            (SequencePhase::Completed, _) => "Sequence complete!".to_string(),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl SequenceEngine {
    fn status_line_for(&self, reason: &FailureReason) -> String {
        match reason {
            FailureReason::Cancelled => reason.to_string(),
            _ => format!("{reason} Press Restart to try again."),
        }
    }
}
