//! Built-in puzzle implementations.
//!
//! - `hanoi`: Tower of Hanoi with undo and an optimal-move win condition
//! - `sequence`: memorize-and-click number sequence with growing rounds

pub mod hanoi;
pub mod sequence;

use tracing::warn;

use crate::core::PuzzleSettings;
use crate::host::CatalogEntry;
use crate::puzzle::Puzzle;

use self::hanoi::HanoiEngine;
use self::sequence::SequenceEngine;

/// Catalog id of the Tower-of-Hanoi puzzle.
pub const HANOI_ID: &str = "hanoi";

/// Catalog id of the sequence-memory puzzle.
pub const SEQUENCE_ID: &str = "chimp";

/// Catalog entries for every built-in puzzle.
///
/// Each factory builds a started engine from a copy of `settings`. Invalid
/// settings surface when the puzzle is opened.
#[must_use]
pub fn standard_catalog(settings: &PuzzleSettings) -> Vec<CatalogEntry> {
    let hanoi = settings.hanoi.clone();
    let sequence = settings.sequence.clone();

    vec![
        CatalogEntry::new(HANOI_ID, move || {
            let mut engine = HanoiEngine::new(hanoi.clone())?;
            engine.start();
            Ok(Box::new(engine) as Box<dyn Puzzle>)
        }),
        CatalogEntry::new(SEQUENCE_ID, move || {
            let mut engine = SequenceEngine::new(sequence.clone())?;
            // A failed layout leaves the engine open in `Failed` for a restart.
            if let Err(err) = engine.restart() {
                warn!(%err, "sequence puzzle opened without a playable round");
            }
            Ok(Box::new(engine) as Box<dyn Puzzle>)
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{HanoiConfig, PegId};
    use crate::games::hanoi::HanoiPhase;
    use crate::games::sequence::SequencePhase;
    use crate::host::PuzzleCatalog;

    #[test]
    fn test_standard_catalog_ids() {
        let (catalog, rejected) = PuzzleCatalog::from_entries(standard_catalog(&PuzzleSettings::default()));
        assert!(rejected.is_empty());
        assert!(catalog.contains(HANOI_ID));
        assert!(catalog.contains(SEQUENCE_ID));
    }

    #[test]
    fn test_factories_start_engines() {
        let (catalog, _) = PuzzleCatalog::from_entries(standard_catalog(&PuzzleSettings::default()));

        let hanoi = catalog.instantiate(HANOI_ID).unwrap().unwrap();
        let hanoi = hanoi.as_any().downcast_ref::<HanoiEngine>().unwrap();
        assert_eq!(hanoi.phase(), HanoiPhase::Playing);

        let chimp = catalog.instantiate(SEQUENCE_ID).unwrap().unwrap();
        let chimp = chimp.as_any().downcast_ref::<SequenceEngine>().unwrap();
        assert_eq!(chimp.phase(), SequencePhase::WaitingFirstClick);
    }

    #[test]
    fn test_invalid_settings_fail_at_instantiation() {
        let settings = PuzzleSettings {
            hanoi: HanoiConfig::new().with_pegs(PegId::C, PegId::C),
            ..PuzzleSettings::default()
        };
        let (catalog, _) = PuzzleCatalog::from_entries(standard_catalog(&settings));

        assert!(matches!(catalog.instantiate(HANOI_ID), Some(Err(_))));
        assert!(matches!(catalog.instantiate(SEQUENCE_ID), Some(Ok(_))));
    }
}
