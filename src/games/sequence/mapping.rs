//! Round layout: which cells carry which numbers.
//!
//! A round of size `n` assigns `1..=n` to `n` distinct cells drawn from a
//! fixed pool. Generation is pluggable through `MappingGenerator`; whatever
//! a generator produces is validated before the round uses it, and rejected
//! layouts are regenerated up to the configured attempt budget.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::warn;

use crate::core::{CellId, GenerationError, MappingDefect, PuzzleRng};

/// Cell → assigned number.
pub type Mapping = FxHashMap<CellId, u8>;

/// Produces candidate round layouts.
pub trait MappingGenerator: std::fmt::Debug {
    /// Propose a mapping of `1..=n` onto cells of a pool of `pool_size`.
    fn generate(&mut self, n: u8, pool_size: usize, rng: &mut PuzzleRng) -> Mapping;
}

/// Shuffle the pool indices uniformly and number the first `n`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShuffleGenerator;

impl MappingGenerator for ShuffleGenerator {
    fn generate(&mut self, n: u8, pool_size: usize, rng: &mut PuzzleRng) -> Mapping {
        let mut indices: Vec<u16> = (0..=u16::MAX).take(pool_size).collect();
        rng.shuffle(&mut indices);

        indices
            .into_iter()
            .zip(1..=n)
            .map(|(index, number)| (CellId::new(index), number))
            .collect()
    }
}

/// Check that `mapping` holds exactly `n` entries, stays inside the pool,
/// and assigns every number `1..=n` once.
pub fn validate_mapping(mapping: &Mapping, n: u8, pool_size: usize) -> Result<(), MappingDefect> {
    if mapping.len() != usize::from(n) {
        return Err(MappingDefect::CountMismatch {
            expected: usize::from(n),
            actual: mapping.len(),
        });
    }

    if let Some(cell) = mapping.keys().find(|c| usize::from(c.raw()) >= pool_size) {
        return Err(MappingDefect::CellOutOfPool(cell.raw()));
    }

    let values: FxHashSet<u8> = mapping.values().copied().collect();
    match (1..=n).find(|number| !values.contains(number)) {
        Some(missing) => Err(MappingDefect::MissingNumber(missing)),
        None => Ok(()),
    }
}

/// Generate and validate, retrying up to `max_attempts` times in total.
pub fn generate_validated(
    generator: &mut dyn MappingGenerator,
    n: u8,
    pool_size: usize,
    max_attempts: usize,
    rng: &mut PuzzleRng,
) -> Result<Mapping, GenerationError> {
    let mut last = MappingDefect::CountMismatch {
        expected: usize::from(n),
        actual: 0,
    };

    for attempt in 1..=max_attempts {
        let mapping = generator.generate(n, pool_size, rng);
        match validate_mapping(&mapping, n, pool_size) {
            Ok(()) => return Ok(mapping),
            Err(defect) => {
                warn!(attempt, max_attempts, %defect, "invalid round mapping, regenerating");
                last = defect;
            }
        }
    }

    Err(GenerationError {
        n,
        attempts: max_attempts,
        last,
    })
}
