//! Host lifecycle integration tests.
//!
//! These drive the standard catalog end to end: open, play through
//! `dispatch`, and observe the callback and the input toggles.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use puzzle_host::core::{HanoiConfig, HostError, PegId, PuzzleSettings, SequenceConfig};
use puzzle_host::games::hanoi::HanoiEngine;
use puzzle_host::games::sequence::SequenceEngine;
use puzzle_host::games::{standard_catalog, HANOI_ID, SEQUENCE_ID};
use puzzle_host::host::{CatalogEntry, InputController, PuzzleHost};
use puzzle_host::puzzle::{CompletionListener, InputResult, Puzzle, PuzzleInput};

/// Records every input toggle.
#[derive(Debug, Default)]
struct Recorder {
    toggles: Vec<bool>,
}

impl InputController for Recorder {
    fn set_input_enabled(&mut self, enabled: bool) {
        self.toggles.push(enabled);
    }
}

/// A puzzle that never exposes a completion listener.
struct Silent;

impl Puzzle for Silent {
    fn kind(&self) -> &'static str {
        "silent"
    }

    fn handle_input(&mut self, _input: PuzzleInput) -> InputResult {
        InputResult::Ignored
    }

    fn completion_listener(&mut self) -> Option<CompletionListener> {
        None
    }

    fn status_line(&self) -> String {
        String::new()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn small_settings() -> PuzzleSettings {
    PuzzleSettings {
        hanoi: HanoiConfig::new().with_disk_range(3, 8).with_disk_count(3),
        sequence: SequenceConfig::new().with_rounds(2, 3).with_seed(7),
    }
}

fn host() -> (PuzzleHost, Rc<RefCell<Recorder>>) {
    let recorder = Rc::new(RefCell::new(Recorder::default()));
    let mut host = PuzzleHost::with_input(Rc::clone(&recorder));
    let rejected = host.register_catalog(standard_catalog(&small_settings()));
    assert!(rejected.is_empty());
    (host, recorder)
}

type Outcomes = Rc<RefCell<Vec<bool>>>;

fn recording() -> (Outcomes, impl FnOnce(&mut PuzzleHost, bool) + 'static) {
    let outcomes: Outcomes = Rc::default();
    let sink = Rc::clone(&outcomes);
    (outcomes, move |_: &mut PuzzleHost, success: bool| sink.borrow_mut().push(success))
}

fn click_pegs(host: &mut PuzzleHost, moves: &[(PegId, PegId)]) {
    for &(from, to) in moves {
        host.dispatch(PuzzleInput::PegActivated(from));
        host.dispatch(PuzzleInput::PegActivated(to));
    }
}

const OPTIMAL_THREE: [(PegId, PegId); 7] = [
    (PegId::A, PegId::C),
    (PegId::A, PegId::B),
    (PegId::C, PegId::B),
    (PegId::A, PegId::C),
    (PegId::B, PegId::A),
    (PegId::B, PegId::C),
    (PegId::A, PegId::C),
];

#[test]
fn test_hanoi_solved_through_host() {
    let (mut host, recorder) = host();
    let (outcomes, callback) = recording();

    assert!(host.open_puzzle(HANOI_ID, callback));
    assert_eq!(recorder.borrow().toggles, vec![false]);
    assert_eq!(host.status_line().as_deref(), Some("Moves: 0 / Target: 7"));

    click_pegs(&mut host, &OPTIMAL_THREE);

    assert!(!host.is_open());
    assert_eq!(*outcomes.borrow(), vec![true]);
    assert_eq!(recorder.borrow().toggles, vec![false, true]);
    assert_eq!(host.dispatch(PuzzleInput::Undo), None);
}

#[test]
fn test_sequence_solved_through_host() {
    let (mut host, _) = host();
    let (outcomes, callback) = recording();
    assert!(host.open_puzzle(SEQUENCE_ID, callback));

    // Rounds 2 and 3.
    for _ in 0..2 {
        let cells = host
            .with_puzzle(|engine: &SequenceEngine| {
                (1..=engine.current_n())
                    .map(|n| engine.cell_with_number(n).unwrap())
                    .collect::<Vec<_>>()
            })
            .unwrap();
        for cell in cells {
            let result = host.dispatch(PuzzleInput::CellActivated(cell)).unwrap();
            assert!(result.is_applied());
        }
    }

    assert!(!host.is_open());
    assert_eq!(*outcomes.borrow(), vec![true]);
}

/// A wrong click fails the round but keeps the session open.
#[test]
fn test_sequence_failure_keeps_session() {
    let (mut host, _) = host();
    let (outcomes, callback) = recording();
    host.open_puzzle(SEQUENCE_ID, callback);

    let two = host
        .with_puzzle(|engine: &SequenceEngine| engine.cell_with_number(2).unwrap())
        .unwrap();
    let result = host.dispatch(PuzzleInput::CellActivated(two)).unwrap();

    assert!(matches!(result, InputResult::Rejected(_)));
    assert!(host.is_open());
    assert!(outcomes.borrow().is_empty());

    host.dispatch(PuzzleInput::Reset);
    host.dispatch(PuzzleInput::Cancel);
    assert!(!host.is_open());
    assert_eq!(*outcomes.borrow(), vec![false]);
}

/// Opening while a session is open is refused without side effects.
#[test]
fn test_second_open_rejected() {
    let (mut host, recorder) = host();
    let (first, cb1) = recording();
    let (second, cb2) = recording();

    assert!(host.open_puzzle(HANOI_ID, cb1));
    click_pegs(&mut host, &OPTIMAL_THREE[..2]);

    assert!(!host.open_puzzle(SEQUENCE_ID, cb2));
    assert_eq!(host.current_id(), Some(HANOI_ID));
    assert_eq!(host.with_puzzle(|engine: &HanoiEngine| engine.move_count()), Some(2));
    assert_eq!(recorder.borrow().toggles, vec![false]);

    host.close_puzzle(false);
    assert_eq!(*first.borrow(), vec![false]);
    assert!(second.borrow().is_empty());
}

#[test]
fn test_close_is_idempotent() {
    let (mut host, recorder) = host();
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);

    host.open_puzzle(HANOI_ID, move |_, _| counter.set(counter.get() + 1));
    host.close_puzzle(true);
    host.close_puzzle(true);
    host.close_puzzle(false);

    assert_eq!(calls.get(), 1);
    assert_eq!(recorder.borrow().toggles, vec![false, true]);
}

/// The callback may immediately open another puzzle.
#[test]
fn test_reentrant_open_from_callback() {
    let (mut host, recorder) = host();
    let (chained, chained_cb) = recording();

    let opened = host.open_puzzle(HANOI_ID, move |host, success| {
        assert!(!success);
        assert!(!host.is_open());
        assert!(host.open_puzzle(SEQUENCE_ID, chained_cb));
    });
    assert!(opened);

    host.dispatch(PuzzleInput::Cancel);

    assert_eq!(host.current_id(), Some(SEQUENCE_ID));
    assert!(chained.borrow().is_empty());
    assert_eq!(recorder.borrow().toggles, vec![false, true, false]);

    host.close_puzzle(true);
    assert_eq!(*chained.borrow(), vec![true]);
}

#[test]
fn test_ids_are_case_insensitive() {
    let (mut host, _) = host();
    assert!(host.open_puzzle("  HaNoI ", |_, _| {}));
    assert_eq!(host.current_id(), Some("HaNoI"));
    assert!(host.with_puzzle(|_: &HanoiEngine| ()).is_some());
    assert!(host.with_puzzle(|_: &SequenceEngine| ()).is_none());
}

#[test]
fn test_open_failures() {
    let (mut host, recorder) = host();

    assert_eq!(host.try_open_puzzle("   ", |_, _| {}), Err(HostError::BlankId));
    assert_eq!(
        host.try_open_puzzle("maze", |_, _| {}),
        Err(HostError::UnknownPuzzle("maze".to_string()))
    );
    assert!(!host.is_open());
    assert!(recorder.borrow().toggles.is_empty());
}

#[test]
fn test_invalid_settings_fail_open() {
    let recorder = Rc::new(RefCell::new(Recorder::default()));
    let mut host = PuzzleHost::with_input(Rc::clone(&recorder));
    let settings = PuzzleSettings {
        sequence: SequenceConfig::new().with_rounds(9, 3),
        ..PuzzleSettings::default()
    };
    host.register_catalog(standard_catalog(&settings));

    let err = host.try_open_puzzle(SEQUENCE_ID, |_, _| {}).unwrap_err();
    assert!(matches!(err, HostError::Instantiation { .. }));
    assert!(!host.is_open());
    assert!(recorder.borrow().toggles.is_empty());

    assert!(host.open_puzzle(HANOI_ID, |_, _| {}));
}

/// A puzzle without a completion listener is torn down on the spot.
#[test]
fn test_missing_completion_reports_failure() {
    let recorder = Rc::new(RefCell::new(Recorder::default()));
    let mut host = PuzzleHost::with_input(Rc::clone(&recorder));
    host.register_catalog([CatalogEntry::new("silent", || Ok(Box::new(Silent) as Box<dyn Puzzle>))]);
    let (outcomes, callback) = recording();

    let err = host.try_open_puzzle("silent", callback).unwrap_err();

    assert_eq!(err, HostError::MissingCompletion("silent".to_string()));
    assert!(!host.is_open());
    assert_eq!(*outcomes.borrow(), vec![false]);
    assert_eq!(recorder.borrow().toggles, vec![false, true]);
}

#[test]
fn test_register_rejects_bad_entries() {
    let mut host = PuzzleHost::new(None);
    let mut entries = standard_catalog(&PuzzleSettings::default());
    entries.push(CatalogEntry::without_factory("broken"));
    entries.push(CatalogEntry::new("", || Ok(Box::new(Silent) as Box<dyn Puzzle>)));
    entries.push(CatalogEntry::new("HANOI", || Ok(Box::new(Silent) as Box<dyn Puzzle>)));

    let rejected = host.register_catalog(entries);

    assert_eq!(rejected.len(), 3);
    assert_eq!(host.catalog().len(), 2);

    // First registration wins.
    assert!(host.open_puzzle(HANOI_ID, |_, _| {}));
    assert!(host.with_puzzle(|_: &HanoiEngine| ()).is_some());
}

#[test]
fn test_host_without_input_controller() {
    let mut host = PuzzleHost::new(None);
    host.register_catalog(standard_catalog(&small_settings()));
    let (outcomes, callback) = recording();

    assert!(host.open_puzzle(HANOI_ID, callback));
    click_pegs(&mut host, &OPTIMAL_THREE);
    assert_eq!(*outcomes.borrow(), vec![true]);
}
