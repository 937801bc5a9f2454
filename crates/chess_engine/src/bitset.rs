//! # BitSet - Bitboard Wrapper
//!
//! ## Overview
//!
//! A bitboard is a single 64-bit integer where bit *i* marks square *i* (a1 = bit 0, h8 = bit 63).
//! Set operations over the whole board become one CPU instruction: union is `|`, intersection is
//! `&`, population count is `POPCNT`.
//!
//! The board stores raw `u64` values for speed; [`BitSet`] is the convenience view used when a
//! caller needs to walk the squares of a mask, e.g. "every square a knight on g1 attacks".
//!
//! ```rust
//! use chess_engine::bitset::BitSet;
//!
//! let set = BitSet(0b1010);
//! assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 3]);
//! ```

use crate::types::Square;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BitSet(pub u64);

impl BitSet {
    pub fn new() -> Self {
        BitSet(0)
    }

    #[inline]
    pub fn insert(&mut self, square: Square) {
        self.0 |= 1u64 << square;
    }

    #[inline]
    pub fn remove(&mut self, square: Square) {
        self.0 &= !(1u64 << square);
    }

    #[inline]
    pub fn contains(&self, square: Square) -> bool {
        (self.0 & (1u64 << square)) != 0
    }

    #[inline]
    pub fn count_ones(&self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Lowest set square, if any.
    #[inline]
    pub fn first(&self) -> Option<Square> {
        (self.0 != 0).then(|| self.0.trailing_zeros() as Square)
    }

    /// Removes and returns the lowest set square.
    #[inline]
    pub fn pop_first(&mut self) -> Option<Square> {
        let square = self.first()?;
        self.0 &= self.0 - 1;
        Some(square)
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn iter(&self) -> BitSetIter {
        BitSetIter(*self)
    }
}

impl From<u64> for BitSet {
    fn from(bits: u64) -> Self {
        BitSet(bits)
    }
}

/// Ascending iterator over the squares of a [`BitSet`].
pub struct BitSetIter(BitSet);

impl Iterator for BitSetIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        self.0.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl IntoIterator for BitSet {
    type Item = Square;
    type IntoIter = BitSetIter;

    fn into_iter(self) -> BitSetIter {
        BitSetIter(self)
    }
}
