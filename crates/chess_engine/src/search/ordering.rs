//! Move ordering for alpha-beta pruning
//!
//! Good moves first means earlier cutoffs. Captures score the captured piece's value minus the
//! mover's own value, promotions get a flat bonus, and the transposition table's best move for
//! the node, when known, goes to the front. The sort is stable, so equal scores keep
//! generation order.

use std::cmp::Reverse;

use crate::constants::*;
use crate::types::*;

/// Heuristic value of a move, ignoring the hash move.
pub fn move_score(mv: &Move) -> i32 {
    let mut score = 0;
    if let Some(captured) = mv.captured {
        score += FIGURE_VALUE[captured.index()] - FIGURE_VALUE[mv.piece.index()];
    }
    if mv.promotion.is_some() {
        score += PROMOTION_BONUS;
    }
    score
}

/// Sorts `moves` best first.
pub fn order_moves(moves: &mut [Move], hash_move: Option<Move>) {
    moves.sort_by_key(|mv| {
        let bonus = if hash_move == Some(*mv) { HASH_MOVE_BONUS } else { 0 };
        Reverse(move_score(mv) + bonus)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(from: Square, to: Square, piece: PieceType, captured: PieceType) -> Move {
        let mut mv = Move::quiet(from, to, piece, Color::White);
        mv.captured = Some(captured);
        mv
    }

    #[test]
    fn test_order_moves_prioritizes_captures() {
        let quiet = Move::quiet(28, 36, PieceType::Pawn, Color::White);
        let take_queen = capture(28, 35, PieceType::Pawn, PieceType::Queen);
        let mut moves = [quiet, take_queen];
        order_moves(&mut moves, None);
        assert_eq!(moves[0], take_queen);
    }

    #[test]
    fn test_order_moves_mvv_lva() {
        let queen_takes_pawn = capture(20, 27, PieceType::Queen, PieceType::Pawn);
        let pawn_takes_queen = capture(28, 35, PieceType::Pawn, PieceType::Queen);
        let mut moves = [queen_takes_pawn, pawn_takes_queen];
        order_moves(&mut moves, None);
        assert_eq!(moves[0], pawn_takes_queen);
        assert_eq!(move_score(&pawn_takes_queen), QUEEN_VALUE - PAWN_VALUE);
    }

    #[test]
    fn test_promotion_bonus() {
        let quiet = Move::quiet(1, 18, PieceType::Knight, Color::White);
        let mut promote = Move::quiet(52, 60, PieceType::Pawn, Color::White);
        promote.promotion = Some(PieceType::Queen);
        let mut moves = [quiet, promote];
        order_moves(&mut moves, None);
        assert_eq!(moves[0], promote);
        assert_eq!(move_score(&promote), PROMOTION_BONUS);
    }

    #[test]
    fn test_hash_move_goes_first_and_order_is_stable() {
        let a = Move::quiet(8, 16, PieceType::Pawn, Color::White);
        let b = Move::quiet(9, 17, PieceType::Pawn, Color::White);
        let c = Move::quiet(10, 18, PieceType::Pawn, Color::White);
        let take = capture(6, 21, PieceType::Knight, PieceType::Rook);

        let mut moves = [a, b, c, take];
        order_moves(&mut moves, Some(c));
        assert_eq!(moves, [c, take, a, b]);
    }
}
