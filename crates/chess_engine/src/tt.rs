//! Transposition table
//!
//! A direct-mapped cache from Zobrist hash to the result of an earlier search of that position.
//! Slot index is `hash % capacity`; every slot keeps the full hash so a collision between two
//! positions sharing a slot is detected on probe instead of returning a false hit.
//!
//! Replacement is last-write-wins: [`TranspositionTable::store`] always overwrites.

use crate::types::Move;

/// How a stored score relates to the true value of the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TTFlag {
    /// The search completed inside the window; the score is the true value.
    Exact,
    /// Fail-high: the true value is at least the score.
    LowerBound,
    /// Fail-low: the true value is at most the score.
    UpperBound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub hash: u64,
    /// Remaining depth the entry was searched to.
    pub depth: u32,
    pub score: i32,
    pub flag: TTFlag,
    pub best_move: Option<Move>,
}

impl TTEntry {
    /// The score this entry proves for a node searched to `depth` in `(alpha, beta)`, if any.
    ///
    /// Entries shallower than `depth` never cut; they are still useful for their best move.
    pub fn cutoff(&self, depth: u32, alpha: i32, beta: i32) -> Option<i32> {
        if self.depth < depth {
            return None;
        }
        match self.flag {
            TTFlag::Exact => Some(self.score),
            TTFlag::LowerBound if self.score >= beta => Some(self.score),
            TTFlag::UpperBound if self.score <= alpha => Some(self.score),
            _ => None,
        }
    }
}

pub struct TranspositionTable {
    slots: Vec<Option<TTEntry>>,
}

impl TranspositionTable {
    /// Creates a table with `capacity` slots (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity.max(1)],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn index(&self, hash: u64) -> usize {
        (hash % self.slots.len() as u64) as usize
    }

    pub fn probe(&self, hash: u64) -> Option<TTEntry> {
        self.slots[self.index(hash)].filter(|entry| entry.hash == hash)
    }

    pub fn store(&mut self, hash: u64, depth: u32, score: i32, flag: TTFlag, best_move: Option<Move>) {
        let index = self.index(hash);
        self.slots[index] = Some(TTEntry {
            hash,
            depth,
            score,
            flag,
            best_move,
        });
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

impl std::fmt::Debug for TranspositionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranspositionTable")
            .field("capacity", &self.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PieceType};

    #[test]
    fn test_store_then_probe_exact() {
        let mut tt = TranspositionTable::new(1024);
        let best = Move::quiet(12, 28, PieceType::Pawn, Color::White);
        tt.store(0xDEAD_BEEF, 4, 37, TTFlag::Exact, Some(best));

        let entry = tt.probe(0xDEAD_BEEF).unwrap();
        assert_eq!(entry.score, 37);
        assert_eq!(entry.best_move, Some(best));
        assert_eq!(entry.cutoff(4, -100, 100), Some(37));
        assert_eq!(entry.cutoff(3, -100, 100), Some(37));
        assert_eq!(entry.cutoff(5, -100, 100), None);
    }

    #[test]
    fn test_colliding_hash_is_not_a_hit() {
        let mut tt = TranspositionTable::new(16);
        tt.store(5, 2, 10, TTFlag::Exact, None);
        assert!(tt.probe(5 + 16).is_none());
        assert!(tt.probe(5).is_some());
    }

    #[test]
    fn test_store_overwrites_slot() {
        let mut tt = TranspositionTable::new(16);
        tt.store(5, 6, 10, TTFlag::Exact, None);
        tt.store(21, 1, -3, TTFlag::UpperBound, None);
        assert!(tt.probe(5).is_none());
        assert_eq!(tt.probe(21).map(|e| e.score), Some(-3));
    }

    #[test]
    fn test_bound_cutoffs() {
        let lower = TTEntry {
            hash: 1,
            depth: 3,
            score: 50,
            flag: TTFlag::LowerBound,
            best_move: None,
        };
        assert_eq!(lower.cutoff(3, 0, 40), Some(50));
        assert_eq!(lower.cutoff(3, 0, 60), None);

        let upper = TTEntry {
            flag: TTFlag::UpperBound,
            ..lower
        };
        assert_eq!(upper.cutoff(3, 60, 100), Some(50));
        assert_eq!(upper.cutoff(3, 40, 100), None);
    }

    #[test]
    fn test_clear() {
        let mut tt = TranspositionTable::new(8);
        tt.store(1, 1, 1, TTFlag::Exact, None);
        tt.store(2, 1, 1, TTFlag::Exact, None);
        assert_eq!(tt.len(), 2);
        tt.clear();
        assert!(tt.is_empty());
        assert!(tt.probe(1).is_none());
    }
}
