//! Puzzle configuration types.
//!
//! Puzzles are configured at catalog-registration time by providing:
//! - `HanoiConfig`: disk-count bounds and the source/target pegs
//! - `SequenceConfig`: round sizes, grid pool dimensions, retry budget
//! - `PuzzleSettings`: both of the above, as one deserializable block
//!
//! All configs carry serde derives with `#[serde(default)]`, so a partial
//! JSON/TOML document overrides only the fields it names.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Upper bound on disks the Hanoi engine accepts (keeps `2^n - 1` in `u32`).
pub const MAX_SUPPORTED_DISKS: usize = 16;

/// Upper bound on sequence cells; every cell must be addressable by a `CellId`.
pub const MAX_POOL_SIZE: usize = u16::MAX as usize + 1;

/// One of the three Hanoi pegs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PegId {
    A,
    B,
    C,
}

impl PegId {
    /// All pegs in board order.
    pub const ALL: [PegId; 3] = [PegId::A, PegId::B, PegId::C];

    /// Board index of this peg (0..3).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            PegId::A => 0,
            PegId::B => 1,
            PegId::C => 2,
        }
    }

}

impl std::fmt::Display for PegId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PegId::A => "A",
            PegId::B => "B",
            PegId::C => "C",
        };
        f.write_str(name)
    }
}

/// Cell identifier within the sequence puzzle's pool.
///
/// Cells are numbered row-major from 0 to `pool_size - 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(pub u16);

impl CellId {
    /// Create a new cell ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cell({})", self.0)
    }
}

/// Configuration for the Tower-of-Hanoi puzzle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HanoiConfig {
    /// Requested disk count. Clamped into `[min_disk_count, max_disk_count]`.
    pub disk_count: usize,

    pub min_disk_count: usize,

    pub max_disk_count: usize,

    /// Peg holding the tower at start.
    pub source_peg: PegId,

    /// Peg the tower must end on.
    pub target_peg: PegId,
}

impl Default for HanoiConfig {
    fn default() -> Self {
        Self {
            disk_count: 5,
            min_disk_count: 5,
            max_disk_count: 8,
            source_peg: PegId::A,
            target_peg: PegId::C,
        }
    }
}

impl HanoiConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the requested disk count.
    #[must_use]
    pub fn with_disk_count(mut self, count: usize) -> Self {
        self.disk_count = count;
        self
    }

    /// Set the allowed disk-count range.
    #[must_use]
    pub fn with_disk_range(mut self, min: usize, max: usize) -> Self {
        self.min_disk_count = min;
        self.max_disk_count = max;
        self
    }

    /// Set the source and target pegs.
    #[must_use]
    pub fn with_pegs(mut self, source: PegId, target: PegId) -> Self {
        self.source_peg = source;
        self.target_peg = target;
        self
    }

    /// Check the configuration for values the engine cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("min_disk_count", self.min_disk_count),
            ("max_disk_count", self.max_disk_count),
        ] {
            if !(1..=MAX_SUPPORTED_DISKS).contains(&value) {
                return Err(ConfigError::OutOfBounds {
                    name,
                    value,
                    lower: 1,
                    upper: MAX_SUPPORTED_DISKS,
                });
            }
        }
        if self.min_disk_count > self.max_disk_count {
            return Err(ConfigError::InvertedRange {
                name: "disk_count",
                min: self.min_disk_count,
                max: self.max_disk_count,
            });
        }
        if self.source_peg == self.target_peg {
            return Err(ConfigError::SameSourceAndTarget(self.source_peg));
        }
        Ok(())
    }

    /// The disk count the engine will actually use.
    #[must_use]
    pub fn effective_disk_count(&self) -> usize {
        self.disk_count
            .max(self.min_disk_count)
            .min(self.max_disk_count)
    }
}

/// Configuration for the sequence-memory puzzle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    /// First round size.
    pub start_n: u8,

    /// Final round size. Completing this round completes the puzzle.
    pub max_n: u8,

    pub grid_columns: u16,

    pub grid_rows: u16,

    /// Total generation attempts per round before giving up.
    pub max_generation_attempts: usize,

    /// Fixed RNG seed. `None` draws a seed from the OS.
    pub seed: Option<u64>,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            start_n: 4,
            max_n: 7,
            grid_columns: 5,
            grid_rows: 5,
            max_generation_attempts: 5,
            seed: None,
        }
    }
}

impl SequenceConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first and final round sizes.
    #[must_use]
    pub fn with_rounds(mut self, start_n: u8, max_n: u8) -> Self {
        self.start_n = start_n;
        self.max_n = max_n;
        self
    }

    /// Set the grid dimensions that make up the cell pool.
    #[must_use]
    pub fn with_grid(mut self, columns: u16, rows: u16) -> Self {
        self.grid_columns = columns;
        self.grid_rows = rows;
        self
    }

    /// Set the per-round generation retry budget.
    #[must_use]
    pub fn with_max_generation_attempts(mut self, attempts: usize) -> Self {
        self.max_generation_attempts = attempts;
        self
    }

    /// Use a fixed RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of candidate cells.
    #[must_use]
    pub fn pool_size(&self) -> usize {
        usize::from(self.grid_columns.max(1)) * usize::from(self.grid_rows.max(1))
    }

    /// Check the configuration for values the engine cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cells = usize::from(self.grid_columns) * usize::from(self.grid_rows);
        if cells == 0 || cells > MAX_POOL_SIZE {
            return Err(ConfigError::OutOfBounds {
                name: "grid",
                value: cells,
                lower: 1,
                upper: MAX_POOL_SIZE,
            });
        }
        if self.start_n == 0 {
            return Err(ConfigError::OutOfBounds {
                name: "start_n",
                value: 0,
                lower: 1,
                upper: usize::from(u8::MAX),
            });
        }
        if self.start_n > self.max_n {
            return Err(ConfigError::InvertedRange {
                name: "round size",
                min: usize::from(self.start_n),
                max: usize::from(self.max_n),
            });
        }
        let pool = self.pool_size();
        if usize::from(self.max_n) > pool {
            return Err(ConfigError::OutOfBounds {
                name: "max_n",
                value: usize::from(self.max_n),
                lower: 1,
                upper: pool,
            });
        }
        if self.max_generation_attempts == 0 {
            return Err(ConfigError::OutOfBounds {
                name: "max_generation_attempts",
                value: 0,
                lower: 1,
                upper: usize::MAX,
            });
        }
        Ok(())
    }

    /// Clamp a requested round size into `[start_n, max_n]`.
    #[must_use]
    pub fn clamp_round(&self, n: u8) -> u8 {
        n.max(self.start_n).min(self.max_n)
    }
}

/// Settings for every built-in puzzle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleSettings {
    pub hanoi: HanoiConfig,
    pub sequence: SequenceConfig,
}

impl PuzzleSettings {
    /// Validate both puzzle configurations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.hanoi.validate()?;
        self.sequence.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peg_index() {
        let indices: Vec<usize> = PegId::ALL.iter().map(|p| p.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(format!("{}", PegId::B), "B");
    }

    #[test]
    fn test_cell_id() {
        let id = CellId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(format!("{}", id), "Cell(7)");
    }

    #[test]
    fn test_hanoi_defaults() {
        let config = HanoiConfig::default();
        assert_eq!(config.disk_count, 5);
        assert_eq!(config.source_peg, PegId::A);
        assert_eq!(config.target_peg, PegId::C);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_hanoi_clamping() {
        let low = HanoiConfig::new().with_disk_count(1);
        assert_eq!(low.effective_disk_count(), 5);

        let high = HanoiConfig::new().with_disk_count(12);
        assert_eq!(high.effective_disk_count(), 8);

        let custom = HanoiConfig::new().with_disk_range(3, 4).with_disk_count(3);
        assert_eq!(custom.effective_disk_count(), 3);
    }

    #[test]
    fn test_hanoi_validation() {
        let inverted = HanoiConfig::new().with_disk_range(6, 4);
        assert!(matches!(
            inverted.validate(),
            Err(ConfigError::InvertedRange { .. })
        ));

        let same = HanoiConfig::new().with_pegs(PegId::B, PegId::B);
        assert_eq!(
            same.validate(),
            Err(ConfigError::SameSourceAndTarget(PegId::B))
        );

        let huge = HanoiConfig::new().with_disk_range(1, 40);
        assert!(matches!(huge.validate(), Err(ConfigError::OutOfBounds { .. })));
    }

    #[test]
    fn test_sequence_defaults() {
        let config = SequenceConfig::default();
        assert_eq!(config.start_n, 4);
        assert_eq!(config.max_n, 7);
        assert_eq!(config.pool_size(), 25);
        assert_eq!(config.max_generation_attempts, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sequence_validation() {
        let too_big = SequenceConfig::new().with_grid(2, 2).with_rounds(2, 5);
        assert!(matches!(
            too_big.validate(),
            Err(ConfigError::OutOfBounds { name: "max_n", .. })
        ));

        let inverted = SequenceConfig::new().with_rounds(6, 3);
        assert!(matches!(
            inverted.validate(),
            Err(ConfigError::InvertedRange { .. })
        ));

        let no_retries = SequenceConfig::new().with_max_generation_attempts(0);
        assert!(no_retries.validate().is_err());
    }

    #[test]
    fn test_sequence_grid_fits_cell_ids() {
        let oversized = SequenceConfig::new().with_grid(300, 300).with_rounds(200, 200);
        assert_eq!(
            oversized.validate(),
            Err(ConfigError::OutOfBounds {
                name: "grid",
                value: 90_000,
                lower: 1,
                upper: MAX_POOL_SIZE,
            })
        );

        let largest = SequenceConfig::new().with_grid(256, 256).with_rounds(200, 200);
        assert_eq!(largest.pool_size(), MAX_POOL_SIZE);
        assert!(largest.validate().is_ok());

        let empty = SequenceConfig::new().with_grid(0, 5);
        assert!(matches!(
            empty.validate(),
            Err(ConfigError::OutOfBounds { name: "grid", .. })
        ));
    }

    #[test]
    fn test_sequence_clamp_round() {
        let config = SequenceConfig::new().with_rounds(4, 7);
        assert_eq!(config.clamp_round(1), 4);
        assert_eq!(config.clamp_round(5), 5);
        assert_eq!(config.clamp_round(200), 7);
    }

    #[test]
    fn test_settings_partial_json() {
        let json = r#"{ "hanoi": { "disk_count": 6 }, "sequence": { "max_n": 9, "seed": 11 } }"#;
        let settings: PuzzleSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.hanoi.disk_count, 6);
        assert_eq!(settings.hanoi.max_disk_count, 8);
        assert_eq!(settings.sequence.max_n, 9);
        assert_eq!(settings.sequence.start_n, 4);
        assert_eq!(settings.sequence.seed, Some(11));
        assert!(settings.validate().is_ok());
    }
}
