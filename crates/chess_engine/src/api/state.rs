//! Game state queries and AI move generation
//!
//! Functions for querying game state and generating AI moves.

use super::Game;
use crate::constants::FIFTY_MOVE_PLIES;
use crate::move_gen::has_legal_move;
use crate::notation::history_to_text;
use crate::search::SearchResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Checkmate,
    Stalemate,
    /// Fifty moves by each side without a capture or pawn move.
    FiftyMoveDraw,
}

/// Get current game state (playing, checkmate, stalemate, fifty-move draw)
pub fn get_game_state(game: &mut Game) -> GameStatus {
    let ctx = game.context().clone();
    if !has_legal_move(&mut game.board, &ctx.tables) {
        if game.board.in_check(&ctx.tables) {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        }
    } else if game.board.half_move_clock() >= FIFTY_MOVE_PLIES {
        GameStatus::FiftyMoveDraw
    } else {
        GameStatus::Playing
    }
}

/// Get the engine's choice for the side to move. The move is not played.
pub fn reply(game: &mut Game) -> SearchResult {
    game.searcher.find_best_move(&mut game.board)
}

/// Moves played so far in algebraic notation.
pub fn history_notation(game: &Game) -> Vec<String> {
    history_to_text(&game.board, &game.context().tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{new_game, play_notation, Game};
    use crate::search::{EngineContext, SearchConfig};
    use std::sync::Arc;

    fn from_fen(fen: &str) -> Game {
        Game::from_fen(Arc::new(EngineContext::default()), SearchConfig::default(), fen).unwrap()
    }

    #[test]
    fn test_game_states() {
        let mut start = new_game(Arc::new(EngineContext::default()), SearchConfig::default());
        assert_eq!(get_game_state(&mut start), GameStatus::Playing);

        let mut mated = from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert_eq!(get_game_state(&mut mated), GameStatus::Checkmate);

        let mut stalemate = from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert_eq!(get_game_state(&mut stalemate), GameStatus::Stalemate);

        let mut fifty = from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 100 80");
        assert_eq!(get_game_state(&mut fifty), GameStatus::FiftyMoveDraw);
    }

    #[test]
    fn test_history_notation() {
        let mut game = new_game(Arc::new(EngineContext::default()), SearchConfig::default());
        for token in ["f3", "e5", "g4", "Qh4#"] {
            play_notation(&mut game, token).unwrap();
        }
        assert_eq!(history_notation(&game), vec!["f3", "e5", "g4", "Qh4#"]);
        assert_eq!(get_game_state(&mut game), GameStatus::Checkmate);
    }

    #[test]
    fn test_reply_does_not_play() {
        let config = SearchConfig {
            time_budget_ms: 20,
            max_depth: 2,
            use_book: false,
            tt_entries: 1 << 12,
            ..SearchConfig::default()
        };
        let mut game = new_game(Arc::new(EngineContext::default()), config);
        let result = reply(&mut game);
        assert!(result.best_move.is_some());
        assert_eq!(game.board().move_history().len(), 0);
    }
}
