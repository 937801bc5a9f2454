//! # Move Generation
//!
//! ## Overview
//!
//! Produces pseudo-legal or fully legal moves for the side to move, and answers attack queries.
//!
//! - **Pseudo-legal** moves obey piece movement rules, occupancy and the special rules (castling,
//!   en passant, promotion) but may leave the mover's own king attacked.
//! - **Legal** moves are the pseudo-legal moves that, once applied, leave the mover's king safe.
//!   The filter applies each candidate with `make_move`, asks [`is_king_attacked`], and undoes it.
//!
//! ## Output Convention
//!
//! Generators never allocate. They write into a caller-provided [`MoveList`] (the search keeps
//! one per ply in a [`PlyBuffers`](crate::types::PlyBuffers) arena) and return the number of
//! moves written. The list is cleared first.
//!
//! ```rust
//! use chess_engine::board::Board;
//! use chess_engine::move_gen::{generate_legal_moves, AttackTables};
//! use chess_engine::types::MoveList;
//!
//! let tables = AttackTables::new();
//! let mut board = Board::starting_position();
//! let mut moves = MoveList::new();
//! assert_eq!(generate_legal_moves(&mut board, &tables, &mut moves), 20);
//! ```

mod attack;
mod king;
mod pawn;
mod perft;
mod sliding;
mod tables;

pub use attack::{is_in_check, is_king_attacked, is_square_attacked};
pub use perft::{perft, perft_divide};
pub use tables::AttackTables;

use crate::board::Board;
use crate::types::*;

/// Pushes one move per target square not held by the mover, tagging captures.
fn push_targets(board: &Board, piece: PieceType, from: Square, targets: u64, out: &mut MoveList) {
    let us = board.side_to_move();
    let mut targets = targets & !board.occupancy(us);
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        targets &= targets - 1;
        let mut mv = Move::quiet(from, to, piece, us);
        mv.captured = board.piece_at(to).map(|(_, captured)| captured);
        out.push(mv);
    }
}

/// Writes every pseudo-legal move of the side to move into `out`; returns the count.
pub fn generate_pseudo_legal_moves(board: &Board, tables: &AttackTables, out: &mut MoveList) -> usize {
    out.clear();
    pawn::generate_pawn_moves(board, tables, out);
    sliding::generate_piece_moves(board, tables, out);
    king::generate_king_moves(board, tables, out);
    out.len()
}

/// Writes every legal move of the side to move into `out`; returns the count.
///
/// The board is used as scratch space and is restored before returning.
pub fn generate_legal_moves(board: &mut Board, tables: &AttackTables, out: &mut MoveList) -> usize {
    generate_pseudo_legal_moves(board, tables, out);
    let us = board.side_to_move();

    let mut kept = 0;
    for i in 0..out.len() {
        let mv = out.get(i);
        board.make_move(mv);
        let legal = !is_king_attacked(board, tables, us);
        board.unmake_move(mv);
        if legal {
            out.as_mut_slice()[kept] = mv;
            kept += 1;
        }
    }
    out.truncate(kept);
    kept
}

/// True iff the side to move has at least one legal move.
pub fn has_legal_move(board: &mut Board, tables: &AttackTables) -> bool {
    let mut moves = MoveList::new();
    generate_legal_moves(board, tables, &mut moves) > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legal(fen: &str) -> MoveList {
        let tables = AttackTables::new();
        let mut board = Board::from_fen(fen).unwrap();
        let mut moves = MoveList::new();
        generate_legal_moves(&mut board, &tables, &mut moves);
        moves
    }

    #[test]
    fn test_starting_position_has_20_moves() {
        let moves = legal(crate::constants::START_FEN);
        assert_eq!(moves.len(), 20);
        assert_eq!(moves.iter().filter(|m| m.piece == PieceType::Knight).count(), 4);
    }

    #[test]
    fn test_legal_moves_leave_king_safe() {
        let tables = AttackTables::new();
        let fens = [
            crate::constants::START_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "4k3/8/8/8/8/8/4r3/4K3 w - - 0 1",
        ];
        for fen in fens {
            let mut board = Board::from_fen(fen).unwrap();
            let us = board.side_to_move();
            let mut moves = MoveList::new();
            generate_legal_moves(&mut board, &tables, &mut moves);
            for &mv in moves.iter() {
                board.make_move(mv);
                assert!(!is_king_attacked(&board, &tables, us), "{fen}: {mv} leaves king attacked");
                board.unmake_move(mv);
            }
        }
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        // the e2 knight is pinned by the e8 rook
        let moves = legal("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(moves.iter().all(|m| m.piece != PieceType::Knight));
    }

    #[test]
    fn test_castling_blocked_through_check() {
        // f1 is attacked by the f8 rook, so only queen-side castling is available
        let moves = legal("5rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let castles: Vec<_> = moves.iter().filter(|m| m.is_castle()).collect();
        assert_eq!(castles.len(), 1);
        assert_eq!(castles[0].to, crate::constants::C1);
    }

    #[test]
    fn test_no_castling_out_of_check() {
        let moves = legal("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(moves.iter().all(|m| !m.is_castle()));
    }

    #[test]
    fn test_en_passant_only_right_after_double_step() {
        let tables = AttackTables::new();
        let mut board = Board::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1").unwrap();
        let double = Move::quiet(51, 35, PieceType::Pawn, Color::Black);
        board.make_move(double);

        let mut moves = MoveList::new();
        generate_legal_moves(&mut board, &tables, &mut moves);
        let ep: Vec<_> = moves.iter().filter(|m| m.en_passant).copied().collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].to, 43);
        assert_eq!(ep[0].captured, Some(PieceType::Pawn));

        // a quiet king shuffle later, the right has expired
        let white_king = Move::quiet(4, 5, PieceType::King, Color::White);
        board.make_move(white_king);
        let black_king = Move::quiet(60, 59, PieceType::King, Color::Black);
        board.make_move(black_king);
        generate_legal_moves(&mut board, &tables, &mut moves);
        assert!(moves.iter().all(|m| !m.en_passant));
    }

    #[test]
    fn test_promotions_expand_to_four_moves() {
        let moves = legal("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let promotions: Vec<_> = moves.iter().filter_map(|m| m.promotion).collect();
        assert_eq!(promotions, PieceType::PROMOTIONS.to_vec());
    }

    #[test]
    fn test_captured_type_matches_target() {
        let tables = AttackTables::new();
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let mut board = Board::from_fen(fen).unwrap();
        let mut moves = MoveList::new();
        generate_legal_moves(&mut board, &tables, &mut moves);
        for mv in moves.iter().filter(|m| m.is_capture() && !m.en_passant) {
            assert_eq!(board.piece_at(mv.to).map(|(_, p)| p), mv.captured);
        }
    }
}
