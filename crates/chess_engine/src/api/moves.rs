//! Move execution and validation
//!
//! Every move entering a game is checked against the legal move list first; the board never
//! sees an illegal move.

use super::Game;
use crate::error::{ChessEngineError, ChessEngineResult};
use crate::move_gen::generate_legal_moves;
use crate::notation::text_to_move;
use crate::types::*;

/// Legal moves of the side to move, in generation order.
pub fn legal_moves(game: &mut Game) -> Vec<Move> {
    let ctx = game.context().clone();
    let mut moves = MoveList::new();
    generate_legal_moves(&mut game.board, &ctx.tables, &mut moves);
    moves.as_slice().to_vec()
}

/// Parses `token` in algebraic notation and plays it.
///
/// # Errors
///
/// Any notation error from [`text_to_move`]; the board is unchanged.
pub fn play_notation(game: &mut Game, token: &str) -> ChessEngineResult<Move> {
    let ctx = game.context().clone();
    let mv = text_to_move(&mut game.board, &ctx.tables, token)?;
    game.board.make_move(mv);
    Ok(mv)
}

/// Plays `mv` if it is exactly one of the legal moves.
///
/// # Errors
///
/// [`ChessEngineError::IllegalMove`] otherwise; the board is unchanged.
pub fn do_move(game: &mut Game, mv: Move) -> ChessEngineResult<()> {
    if !legal_moves(game).contains(&mv) {
        return Err(ChessEngineError::IllegalMove {
            from: mv.from,
            to: mv.to,
        });
    }
    game.board.make_move(mv);
    Ok(())
}

/// Takes back the last move played.
pub fn undo_move(game: &mut Game) -> ChessEngineResult<Move> {
    let mv = game.board.last_move().ok_or(ChessEngineError::NothingToUndo)?;
    game.board.unmake_move(mv);
    Ok(mv)
}

/// True iff some legal move goes from `from` to `to`.
pub fn is_legal_move(game: &mut Game, from: Square, to: Square) -> bool {
    legal_moves(game).iter().any(|mv| mv.from == from && mv.to == to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::new_game;
    use crate::search::{EngineContext, SearchConfig};
    use std::sync::Arc;

    fn game() -> Game {
        new_game(Arc::new(EngineContext::default()), SearchConfig::default())
    }

    #[test]
    fn test_play_and_undo() {
        let mut game = game();
        let start = game.board().clone();
        let mv = play_notation(&mut game, "Nf3").unwrap();
        assert_eq!((mv.from, mv.to), (6, 21));
        assert_eq!(undo_move(&mut game), Ok(mv));
        assert_eq!(game.board(), &start);
        assert_eq!(undo_move(&mut game), Err(ChessEngineError::NothingToUndo));
    }

    #[test]
    fn test_do_move_rejects_illegal() {
        let mut game = game();
        let bogus = Move::quiet(12, 36, PieceType::Pawn, Color::White);
        assert_eq!(
            do_move(&mut game, bogus),
            Err(ChessEngineError::IllegalMove { from: 12, to: 36 })
        );
        let push = Move::quiet(12, 28, PieceType::Pawn, Color::White);
        assert_eq!(do_move(&mut game, push), Ok(()));
        assert_eq!(game.board().side_to_move(), Color::Black);
    }

    #[test]
    fn test_do_move_accepts_wire_move() {
        let mut game = game();
        let mv = Move::from_wire(Move::quiet(1, 18, PieceType::Knight, Color::White).to_wire()).unwrap();
        assert!(do_move(&mut game, mv).is_ok());
    }

    #[test]
    fn test_is_legal_move() {
        let mut game = game();
        assert!(is_legal_move(&mut game, 12, 28));
        assert!(!is_legal_move(&mut game, 12, 36));
        assert!(!is_legal_move(&mut game, 52, 36));
    }

    #[test]
    fn test_bad_notation_leaves_board() {
        let mut game = game();
        let start = game.board().clone();
        assert!(play_notation(&mut game, "Qh5").is_err());
        assert_eq!(game.board(), &start);
    }
}
