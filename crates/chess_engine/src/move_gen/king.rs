//! King move generation
//!
//! Handles ordinary king steps and castling.
//!
//! ## Castling Rules
//!
//! A castling move is generated only when:
//! - the matching castling-rights bit is still set (cleared by any king or rook move, or by a
//!   capture on the rook's home square)
//! - the king and rook stand on their home squares
//! - every square between them is empty
//! - the king's start, transit and destination squares are not attacked by the opponent
//!
//! The move itself is encoded as a two-square king move; the board moves the rook.

use super::attack::is_square_attacked;
use super::tables::AttackTables;
use crate::board::Board;
use crate::constants::*;
use crate::types::*;

struct CastleSpec {
    right: u8,
    king_from: Square,
    king_to: Square,
    rook_from: Square,
    /// Squares that must be empty.
    between: u64,
    /// Squares the king stands on or crosses.
    path: [Square; 3],
}

const fn bits(squares: &[Square]) -> u64 {
    let mut mask = 0;
    let mut i = 0;
    while i < squares.len() {
        mask |= 1u64 << squares[i];
        i += 1;
    }
    mask
}

const WHITE_CASTLES: [CastleSpec; 2] = [
    CastleSpec {
        right: WHITE_KING_SIDE,
        king_from: E1,
        king_to: G1,
        rook_from: H1,
        between: bits(&[F1, G1]),
        path: [E1, F1, G1],
    },
    CastleSpec {
        right: WHITE_QUEEN_SIDE,
        king_from: E1,
        king_to: C1,
        rook_from: A1,
        between: bits(&[B1, C1, D1]),
        path: [E1, D1, C1],
    },
];

const BLACK_CASTLES: [CastleSpec; 2] = [
    CastleSpec {
        right: BLACK_KING_SIDE,
        king_from: E8,
        king_to: G8,
        rook_from: H8,
        between: bits(&[F8, G8]),
        path: [E8, F8, G8],
    },
    CastleSpec {
        right: BLACK_QUEEN_SIDE,
        king_from: E8,
        king_to: C8,
        rook_from: A8,
        between: bits(&[B8, C8, D8]),
        path: [E8, D8, C8],
    },
];

pub fn generate_king_moves(board: &Board, tables: &AttackTables, out: &mut MoveList) {
    let us = board.side_to_move();
    let from = board.king_square(us);
    super::push_targets(board, PieceType::King, from, tables.king(from), out);
    generate_castling(board, tables, out);
}

fn generate_castling(board: &Board, tables: &AttackTables, out: &mut MoveList) {
    let us = board.side_to_move();
    let them = us.opposite();
    let rights = board.castling_rights();
    let specs = match us {
        Color::White => &WHITE_CASTLES,
        Color::Black => &BLACK_CASTLES,
    };

    for spec in specs {
        if rights & spec.right == 0 {
            continue;
        }
        if board.pieces(us, PieceType::King) & square_bit(spec.king_from) == 0
            || board.pieces(us, PieceType::Rook) & square_bit(spec.rook_from) == 0
        {
            continue;
        }
        if board.occupied() & spec.between != 0 {
            continue;
        }
        if spec
            .path
            .iter()
            .any(|&square| is_square_attacked(board, tables, square, them))
        {
            continue;
        }
        out.push(Move::quiet(spec.king_from, spec.king_to, PieceType::King, us));
    }
}
