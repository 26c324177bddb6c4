//! One-shot completion notification between a puzzle and its host.
//!
//! The puzzle owns a `CompletionSignal`; the host takes the single
//! `CompletionListener` when it opens the puzzle. The signal latches before
//! publishing, so an outcome is delivered at most once per puzzle instance
//! and any later `emit` is inert.
//!
//! ```
//! use puzzle_host::puzzle::CompletionSignal;
//!
//! let mut signal = CompletionSignal::new();
//! let listener = signal.listen().unwrap();
//! assert!(signal.listen().is_none());
//!
//! assert!(signal.emit(true));
//! assert!(!signal.emit(false));
//!
//! assert_eq!(listener.try_take(), Some(true));
//! assert_eq!(listener.try_take(), None);
//! ```

use std::cell::Cell;
use std::rc::Rc;

/// Sending half, owned by the puzzle engine.
#[derive(Debug, Default)]
pub struct CompletionSignal {
    slot: Rc<Cell<Option<bool>>>,
    fired: bool,
    listener_taken: bool,
}

impl CompletionSignal {
    /// Create an unfired signal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the listener. Only the first call returns `Some`.
    pub fn listen(&mut self) -> Option<CompletionListener> {
        if self.listener_taken {
            return None;
        }
        self.listener_taken = true;
        Some(CompletionListener {
            slot: Rc::clone(&self.slot),
        })
    }

    /// Publish the outcome. Returns `false` if the signal already fired.
    pub fn emit(&mut self, success: bool) -> bool {
        if self.fired {
            return false;
        }
        self.fired = true;
        self.slot.set(Some(success));
        true
    }

    /// Whether an outcome has been published.
    #[must_use]
    pub fn is_fired(&self) -> bool {
        self.fired
    }
}

/// Receiving half, held by the host for the session's lifetime.
#[derive(Debug)]
pub struct CompletionListener {
    slot: Rc<Cell<Option<bool>>>,
}

impl CompletionListener {
    /// Take the published outcome, if any. Returns `Some` at most once.
    pub fn try_take(&self) -> Option<bool> {
        self.slot.take()
    }
}
