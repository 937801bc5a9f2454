//! Game lifecycle management
//!
//! Functions for creating and resetting games.

use std::sync::Arc;

use crate::board::Board;
use crate::error::ChessEngineResult;
use crate::search::{EngineContext, SearchConfig, Searcher};

#[derive(Debug)]
pub struct Game {
    pub(super) board: Board,
    pub(super) searcher: Searcher,
}

impl Game {
    /// A game starting from `fen` instead of the initial position. Such games never use the book.
    pub fn from_fen(ctx: Arc<EngineContext>, config: SearchConfig, fen: &str) -> ChessEngineResult<Game> {
        let board = Board::from_fen(fen)?;
        Ok(Game {
            board,
            searcher: Searcher::new(ctx, config),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn context(&self) -> &Arc<EngineContext> {
        self.searcher.context()
    }

    pub fn searcher_mut(&mut self) -> &mut Searcher {
        &mut self.searcher
    }
}

/// Create a new game with initial position
pub fn new_game(ctx: Arc<EngineContext>, config: SearchConfig) -> Game {
    Game {
        board: Board::starting_position(),
        searcher: Searcher::new(ctx, config),
    }
}

/// Reset the game to starting position
pub fn reset_game(game: &mut Game) {
    game.board = Board::starting_position();
}
