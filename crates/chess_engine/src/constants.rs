//! # Chess Engine Constants - Piece Values, Squares & Search Limits
//!
//! ## Overview
//!
//! This module centralizes the constant values used throughout the engine: piece valuations in
//! centipawns, castling-right bits, well-known squares, score sentinels and the fixed sizes of the
//! per-ply move buffers.
//!
//! ## Centipawn Valuation System
//!
//! Scores are expressed in **centipawns** (1/100th of a pawn):
//!
//! - **Pawn**: 100
//! - **Knight**: 300
//! - **Bishop**: 300
//! - **Rook**: 500
//! - **Queen**: 900
//! - **King**: 0 (never captured, so it carries no exchange value)
//!
//! These values drive both the bundled evaluators and the MVV-LVA move ordering.
//!
//! ## Mate Scores
//!
//! A checkmated side to move scores `-(MATE_SCORE + remaining_depth)`. Adding the remaining depth
//! makes a mate found closer to the root worth more than one found deeper in the tree, so the
//! mating side prefers the shortest mate. Any score whose magnitude exceeds [`MATE_THRESHOLD`] is a
//! forced mate.
//!
//! ## Square Mapping
//!
//! Squares use little-endian rank-file mapping: `a1 = 0`, `h1 = 7`, `a8 = 56`, `h8 = 63`.

use crate::types::Square;

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 300;
pub const BISHOP_VALUE: i32 = 300;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
pub const KING_VALUE: i32 = 0;

/// Indexed by [`crate::types::PieceType::index`].
pub const FIGURE_VALUE: [i32; 6] = [
    PAWN_VALUE,
    KNIGHT_VALUE,
    BISHOP_VALUE,
    ROOK_VALUE,
    QUEEN_VALUE,
    KING_VALUE,
];

/// Flat ordering bonus for promotions.
pub const PROMOTION_BONUS: i32 = 1000;
/// Ordering bonus for the move stored in the transposition table.
pub const HASH_MOVE_BONUS: i32 = 1_000_000;

pub const AB_INF: i32 = 1_000_000;
pub const MATE_SCORE: i32 = 100_000;
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 1_000;

pub const MAX_DEPTH: usize = 64;
pub const MAX_MOVES: usize = 256;

pub const WHITE_KING_SIDE: u8 = 0b0001;
pub const WHITE_QUEEN_SIDE: u8 = 0b0010;
pub const BLACK_KING_SIDE: u8 = 0b0100;
pub const BLACK_QUEEN_SIDE: u8 = 0b1000;
pub const ALL_CASTLING: u8 = 0b1111;

pub const A1: Square = 0;
pub const B1: Square = 1;
pub const C1: Square = 2;
pub const D1: Square = 3;
pub const E1: Square = 4;
pub const F1: Square = 5;
pub const G1: Square = 6;
pub const H1: Square = 7;
pub const A8: Square = 56;
pub const B8: Square = 57;
pub const C8: Square = 58;
pub const D8: Square = 59;
pub const E8: Square = 60;
pub const F8: Square = 61;
pub const G8: Square = 62;
pub const H8: Square = 63;

pub const RANK_1: u64 = 0x0000_0000_0000_00FF;
pub const RANK_2: u64 = RANK_1 << 8;
pub const RANK_7: u64 = RANK_1 << 48;
pub const RANK_8: u64 = RANK_1 << 56;
pub const FILE_A: u64 = 0x0101_0101_0101_0101;
pub const FILE_H: u64 = FILE_A << 7;

/// Castling rights that survive a move touching a given square.
///
/// `rights &= CASTLING_MASK[from] & CASTLING_MASK[to]` clears the right of any king or rook that
/// moves, and of any rook that is captured on its home square.
pub const CASTLING_MASK: [u8; 64] = castling_mask();

const fn castling_mask() -> [u8; 64] {
    let mut mask = [ALL_CASTLING; 64];
    mask[A1 as usize] = ALL_CASTLING & !WHITE_QUEEN_SIDE;
    mask[H1 as usize] = ALL_CASTLING & !WHITE_KING_SIDE;
    mask[E1 as usize] = ALL_CASTLING & !(WHITE_KING_SIDE | WHITE_QUEEN_SIDE);
    mask[A8 as usize] = ALL_CASTLING & !BLACK_QUEEN_SIDE;
    mask[H8 as usize] = ALL_CASTLING & !BLACK_KING_SIDE;
    mask[E8 as usize] = ALL_CASTLING & !(BLACK_KING_SIDE | BLACK_QUEEN_SIDE);
    mask
}

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Fifty-move rule threshold, in plies.
pub const FIFTY_MOVE_PLIES: u32 = 100;
