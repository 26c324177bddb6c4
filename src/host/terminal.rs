//! An in-world interactable that opens a puzzle through the host.

use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, info};

use super::controller::PuzzleHost;

#[derive(Debug, Default)]
struct TerminalState {
    busy: Cell<bool>,
    solved: Cell<bool>,
    solve_count: Cell<u32>,
}

/// A terminal the player walks up to and interacts with.
///
/// While its puzzle is open the terminal is busy and ignores interaction.
/// A one-time terminal stops responding once its puzzle has been solved.
///
/// ```
/// use puzzle_host::core::PuzzleSettings;
/// use puzzle_host::games::standard_catalog;
/// use puzzle_host::host::{PuzzleHost, PuzzleTerminal};
///
/// let mut host = PuzzleHost::new(None);
/// host.register_catalog(standard_catalog(&PuzzleSettings::default()));
///
/// let mut terminal = PuzzleTerminal::new("chimp");
/// assert!(!terminal.interact(&mut host));
///
/// terminal.player_entered();
/// assert!(terminal.interact(&mut host));
/// assert!(terminal.is_busy());
/// ```
#[derive(Debug)]
pub struct PuzzleTerminal {
    puzzle_id: String,
    hint_text: String,
    one_time: bool,
    player_inside: bool,
    state: Rc<TerminalState>,
}

impl PuzzleTerminal {
    /// A one-time terminal for `puzzle_id`.
    pub fn new(puzzle_id: impl Into<String>) -> Self {
        Self {
            puzzle_id: puzzle_id.into(),
            hint_text: "Press E".to_string(),
            one_time: true,
            player_inside: false,
            state: Rc::default(),
        }
    }

    /// Allow solving repeatedly.
    #[must_use]
    pub fn repeatable(mut self) -> Self {
        self.one_time = false;
        self
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint_text = hint.into();
        self
    }

    pub fn player_entered(&mut self) {
        self.player_inside = true;
    }

    pub fn player_exited(&mut self) {
        self.player_inside = false;
    }

    /// Open the puzzle if the terminal is usable. Returns whether it opened.
    pub fn interact(&mut self, host: &mut PuzzleHost) -> bool {
        if !self.player_inside || self.is_busy() || self.is_locked() {
            return false;
        }

        self.state.busy.set(true);
        let state = Rc::clone(&self.state);
        let id = self.puzzle_id.clone();
        let opened = host.open_puzzle(&self.puzzle_id, move |_, success| {
            state.busy.set(false);
            if success {
                state.solved.set(true);
                state.solve_count.set(state.solve_count.get() + 1);
                info!(id = %id, "terminal puzzle solved");
            }
        });

        if !opened {
            self.state.busy.set(false);
        }
        debug!(id = %self.puzzle_id, opened, "terminal interaction");
        opened
    }

    /// The hint to show, if the player could interact right now.
    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        let usable = self.player_inside && !self.is_busy() && !self.is_locked();
        usable.then_some(self.hint_text.as_str())
    }

    #[must_use]
    pub fn puzzle_id(&self) -> &str {
        &self.puzzle_id
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.state.busy.get()
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.state.solved.get()
    }

    #[must_use]
    pub fn solve_count(&self) -> u32 {
        self.state.solve_count.get()
    }

    fn is_locked(&self) -> bool {
        self.one_time && self.is_solved()
    }
}
