//! Hanoi board: three pegs of sized disks.
//!
//! Each peg is stored bottom-to-top, so the top disk is the last element.
//! All mutation goes through `apply_move` (legality-checked) or `transfer`
//! (used by undo after its own consistency check).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{MoveError, PegId};

/// Disk size. Sizes are `1..=disk_count`; larger number means larger disk.
pub type Disk = u8;

/// Disks on one peg, bottom first.
pub type Peg = SmallVec<[Disk; 8]>;

/// One applied move, as recorded in the undo history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: PegId,
    pub to: PegId,
    pub disk: Disk,
}

/// Minimum moves to transfer a tower of `disk_count` disks: `2^n - 1`.
#[must_use]
pub fn min_moves(disk_count: usize) -> u32 {
    (1u32 << disk_count) - 1
}

/// Three pegs of disks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pegs: [Peg; 3],
}

impl Board {
    /// An empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A full tower of `disk_count` disks on `peg`, largest at the bottom.
    #[must_use]
    pub fn tower(disk_count: usize, peg: PegId) -> Self {
        let mut board = Self::new();
        let stack = &mut board.pegs[peg.index()];
        for size in (1..=disk_count).rev() {
            stack.push(size as Disk);
        }
        board
    }

    /// Disks on a peg, bottom first.
    #[must_use]
    pub fn peg(&self, peg: PegId) -> &[Disk] {
        &self.pegs[peg.index()]
    }

    /// Top disk of a peg.
    #[must_use]
    pub fn top(&self, peg: PegId) -> Option<Disk> {
        self.pegs[peg.index()].last().copied()
    }

    #[must_use]
    pub fn is_empty(&self, peg: PegId) -> bool {
        self.pegs[peg.index()].is_empty()
    }

    /// Total disks across all pegs.
    #[must_use]
    pub fn disk_count(&self) -> usize {
        self.pegs.iter().map(SmallVec::len).sum()
    }

    /// Check a move without applying it. Returns the disk that would move.
    pub fn check_move(&self, from: PegId, to: PegId) -> Result<Disk, MoveError> {
        let disk = self.top(from).ok_or(MoveError::NoDiskToMove(from))?;
        if from == to {
            return Err(MoveError::SamePeg(from));
        }
        match self.top(to) {
            Some(top) if top < disk => Err(MoveError::LargerOntoSmaller { disk, top, peg: to }),
            _ => Ok(disk),
        }
    }

    /// Move the top disk of `from` onto `to` if legal.
    pub fn apply_move(&mut self, from: PegId, to: PegId) -> Result<MoveRecord, MoveError> {
        let disk = self.check_move(from, to)?;
        self.transfer(from, to);
        Ok(MoveRecord { from, to, disk })
    }

    /// Move the top disk of `from` onto `to` without a stacking check.
    ///
    /// Returns the moved disk, or `None` if `from` was empty.
    pub(crate) fn transfer(&mut self, from: PegId, to: PegId) -> Option<Disk> {
        let disk = self.pegs[from.index()].pop()?;
        self.pegs[to.index()].push(disk);
        Some(disk)
    }

    /// Whether all `disk_count` disks sit on `peg`.
    #[must_use]
    pub fn holds_tower(&self, peg: PegId, disk_count: usize) -> bool {
        self.peg(peg).len() == disk_count && self.disk_count() == disk_count
    }

    /// Verify the board invariants for a puzzle of `disk_count` disks:
    /// every size `1..=disk_count` appears exactly once, and every peg
    /// strictly decreases from bottom to top.
    #[must_use]
    pub fn check_invariants(&self, disk_count: usize) -> bool {
        let mut seen = vec![false; disk_count + 1];
        for peg in &self.pegs {
            if peg.windows(2).any(|w| w[0] <= w[1]) {
                return false;
            }
            for &disk in peg {
                let idx = usize::from(disk);
                if idx == 0 || idx > disk_count || seen[idx] {
                    return false;
                }
                seen[idx] = true;
            }
        }
        seen.iter().skip(1).all(|&s| s)
    }

    #[cfg(test)]
    pub(crate) fn peg_mut(&mut self, peg: PegId) -> &mut Peg {
        &mut self.pegs[peg.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_moves() {
        assert_eq!(min_moves(1), 1);
        assert_eq!(min_moves(3), 7);
        assert_eq!(min_moves(5), 31);
        assert_eq!(min_moves(8), 255);
    }

    #[test]
    fn test_tower_layout() {
        let board = Board::tower(4, PegId::A);
        assert_eq!(board.peg(PegId::A), &[4, 3, 2, 1]);
        assert_eq!(board.top(PegId::A), Some(1));
        assert!(board.is_empty(PegId::B));
        assert!(board.holds_tower(PegId::A, 4));
        assert!(board.check_invariants(4));
    }

    #[test]
    fn test_apply_legal_move() {
        let mut board = Board::tower(3, PegId::A);
        let record = board.apply_move(PegId::A, PegId::C).unwrap();

        assert_eq!(record, MoveRecord { from: PegId::A, to: PegId::C, disk: 1 });
        assert_eq!(board.peg(PegId::A), &[3, 2]);
        assert_eq!(board.peg(PegId::C), &[1]);
        assert!(board.check_invariants(3));
    }

    #[test]
    fn test_larger_onto_smaller_rejected() {
        let mut board = Board::tower(3, PegId::A);
        board.apply_move(PegId::A, PegId::B).unwrap();
        let before = board.clone();

        let err = board.apply_move(PegId::A, PegId::B).unwrap_err();
        assert_eq!(err, MoveError::LargerOntoSmaller { disk: 2, top: 1, peg: PegId::B });
        assert_eq!(board, before);
    }

    #[test]
    fn test_empty_source_rejected() {
        let mut board = Board::tower(3, PegId::A);
        let before = board.clone();

        assert_eq!(
            board.apply_move(PegId::B, PegId::C),
            Err(MoveError::NoDiskToMove(PegId::B))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_same_peg_rejected() {
        let mut board = Board::tower(3, PegId::A);
        assert_eq!(board.apply_move(PegId::A, PegId::A), Err(MoveError::SamePeg(PegId::A)));
        assert_eq!(board.peg(PegId::A), &[3, 2, 1]);
    }

    #[test]
    fn test_invariants_detect_corruption() {
        let mut board = Board::tower(3, PegId::A);
        board.peg_mut(PegId::B).push(2);
        assert!(!board.check_invariants(3));

        let mut board = Board::tower(3, PegId::A);
        board.peg_mut(PegId::A).swap(0, 2);
        assert!(!board.check_invariants(3));

        let mut board = Board::tower(3, PegId::A);
        board.peg_mut(PegId::A).pop();
        assert!(!board.check_invariants(3));
    }
}
