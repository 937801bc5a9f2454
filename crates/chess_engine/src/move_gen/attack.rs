//! Attack detection and square checking
//!
//! Answers "is this square attacked by that color?" for check detection, legality filtering and
//! castling safety.
//!
//! ## Algorithm
//!
//! Instead of walking every enemy piece, we look outward from the target square: a square is
//! attacked by a knight of `by` iff a knight placed on it would attack one of `by`'s knights, and
//! likewise for kings, sliders (using the current occupancy) and pawns (using the pawn mask of
//! the *opposite* color, since pawn attacks are not symmetric). Each test is a single table
//! lookup and AND.

use super::tables::AttackTables;
use crate::board::Board;
use crate::types::*;

/// True iff any piece of `by` attacks `square`.
///
/// Pawns count as attacking their diagonals whether or not anything stands there to capture.
pub fn is_square_attacked(board: &Board, tables: &AttackTables, square: Square, by: Color) -> bool {
    let occupied = board.occupied();

    if tables.pawn(by.opposite(), square) & board.pieces(by, PieceType::Pawn) != 0 {
        return true;
    }
    if tables.knight(square) & board.pieces(by, PieceType::Knight) != 0 {
        return true;
    }
    if tables.king(square) & board.pieces(by, PieceType::King) != 0 {
        return true;
    }

    let queens = board.pieces(by, PieceType::Queen);
    let diagonal = board.pieces(by, PieceType::Bishop) | queens;
    if diagonal != 0 && tables.bishop(square, occupied) & diagonal != 0 {
        return true;
    }
    let orthogonal = board.pieces(by, PieceType::Rook) | queens;
    orthogonal != 0 && tables.rook(square, occupied) & orthogonal != 0
}

/// True iff `color`'s king is attacked.
#[inline]
pub fn is_king_attacked(board: &Board, tables: &AttackTables, color: Color) -> bool {
    is_square_attacked(board, tables, board.king_square(color), color.opposite())
}

/// True iff the side to move is in check.
#[inline]
pub fn is_in_check(board: &Board, tables: &AttackTables) -> bool {
    is_king_attacked(board, tables, board.side_to_move())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position_attacks() {
        let board = Board::starting_position();
        let tables = AttackTables::new();
        // e3 covered by white pawns, not by black
        assert!(is_square_attacked(&board, &tables, 20, Color::White));
        assert!(!is_square_attacked(&board, &tables, 20, Color::Black));
        // f3 covered by the g1 knight
        assert!(is_square_attacked(&board, &tables, 21, Color::White));
        // e4 covered by nobody
        assert!(!is_square_attacked(&board, &tables, 28, Color::White));
        assert!(!is_in_check(&board, &tables));
    }

    #[test]
    fn test_pawn_attacks_empty_diagonal() {
        let board = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        let tables = AttackTables::new();
        assert!(is_square_attacked(&board, &tables, 19, Color::White));
        assert!(is_square_attacked(&board, &tables, 21, Color::White));
        // straight ahead is not an attack
        assert!(!is_square_attacked(&board, &tables, 20, Color::White));
    }

    #[test]
    fn test_slider_check_is_blocked() {
        let tables = AttackTables::new();
        let open = Board::from_fen("4k3/8/8/8/8/8/8/4RK2 b - - 0 1").unwrap();
        assert!(is_in_check(&open, &tables));
        let blocked = Board::from_fen("4k3/4n3/8/8/8/8/8/4RK2 b - - 0 1").unwrap();
        assert!(!is_in_check(&blocked, &tables));
    }
}
