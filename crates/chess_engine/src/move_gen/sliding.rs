//! Knight and sliding piece move generation
//!
//! Knights, bishops, rooks and queens share one rule: their destinations are their attack mask
//! minus squares held by their own side. Knights read a fixed table; sliders ray-cast against the
//! current occupancy so each direction stops at the first piece (included if it is an enemy).

use super::tables::AttackTables;
use crate::board::Board;
use crate::types::*;

const PIECES: [PieceType; 4] = [
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Rook,
    PieceType::Queen,
];

pub fn generate_piece_moves(board: &Board, tables: &AttackTables, out: &mut MoveList) {
    let us = board.side_to_move();
    let occupied = board.occupied();

    for piece in PIECES {
        let mut sources = board.pieces(us, piece);
        while sources != 0 {
            let from = sources.trailing_zeros() as Square;
            sources &= sources - 1;
            let targets = tables.piece(piece, from, occupied);
            super::push_targets(board, piece, from, targets, out);
        }
    }
}
