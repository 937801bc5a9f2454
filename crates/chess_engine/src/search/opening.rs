//! Opening book stage
//!
//! The game so far is replayed from the standard starting position and written out in
//! algebraic notation; that token sequence is walked through the book tree. Games set up from
//! any other position are never in book.

use std::sync::Arc;

use tracing::{info, warn};

use super::{MoveSource, SearchResult, SearchStats, Searcher};
use crate::board::Board;
use crate::move_gen::AttackTables;
use crate::notation::{history_to_text, text_to_move};

/// The game's moves as notation tokens, or `None` if it did not start from the initial position.
pub fn game_tokens(board: &Board, tables: &AttackTables) -> Option<Vec<String>> {
    if board.initial_position().hash() != Board::starting_position().hash() {
        return None;
    }
    Some(history_to_text(board, tables))
}

impl Searcher {
    pub(super) fn book_move(&mut self, board: &Board) -> Option<SearchResult> {
        let ctx = Arc::clone(&self.ctx);
        if ctx.book.is_empty() {
            return None;
        }
        let tokens = game_tokens(board, &ctx.tables)?;
        let token = ctx.book.pick(&tokens, &mut self.rng)?;

        let mut scratch = board.clone();
        match text_to_move(&mut scratch, &ctx.tables, token) {
            Ok(mv) => {
                info!("[BOOK] playing {} after {} book plies", token, tokens.len());
                Some(SearchResult {
                    best_move: Some(mv),
                    score: 0,
                    depth: 0,
                    source: MoveSource::Book,
                    stats: SearchStats::default(),
                })
            }
            Err(err) => {
                warn!("[BOOK] entry {:?} is not playable here: {}", token, err);
                None
            }
        }
    }
}
