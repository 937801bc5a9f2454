//! Iterative deepening search
//!
//! Runs complete root searches at depth 1, 2, 3, … The clock is only checked between
//! iterations, so a started depth always finishes and the budget can be overshot by one
//! iteration. The transposition table is cleared once before depth 1; later iterations reuse
//! what earlier ones stored, most usefully the best move of each node.

use std::time::Duration;

use instant::Instant;
use tracing::{debug, info};

use super::{MoveSource, SearchResult, SearchStats, Searcher};
use crate::board::Board;
use crate::constants::MATE_THRESHOLD;

impl Searcher {
    /// Chooses a move for the side to move: book, then tablebase, then iterative deepening
    /// under the configured time budget.
    pub fn find_best_move(&mut self, board: &mut Board) -> SearchResult {
        if self.config.use_book {
            if let Some(result) = self.book_move(board) {
                return result;
            }
        }
        if let Some(result) = self.tablebase_move(board) {
            return result;
        }
        let budget = Duration::from_millis(self.config.time_budget_ms);
        self.iterative_deepening(board, self.config.depth_limit(), Some(budget))
    }

    /// Iterative deepening to exactly `depth` with no time limit, skipping book and tablebase.
    pub fn search_depth(&mut self, board: &mut Board, depth: u32) -> SearchResult {
        self.iterative_deepening(board, depth.clamp(1, crate::constants::MAX_DEPTH as u32), None)
    }

    fn iterative_deepening(&mut self, board: &mut Board, max_depth: u32, budget: Option<Duration>) -> SearchResult {
        let start = Instant::now();
        self.tt.clear();
        self.stats = SearchStats::default();

        let mut result = SearchResult {
            best_move: None,
            score: 0,
            depth: 0,
            source: MoveSource::Search,
            stats: self.stats,
        };

        for depth in 1..=max_depth {
            let (best_move, score) = self.search_root(board, depth);
            self.stats.depth = depth;
            result.best_move = best_move;
            result.score = score;
            result.depth = depth;

            debug!(
                "[SEARCH] depth {} score {} nodes {} elapsed {:?}",
                depth,
                score,
                self.stats.nodes,
                start.elapsed()
            );

            if best_move.is_none() || score.abs() >= MATE_THRESHOLD {
                break;
            }
            if budget.is_some_and(|budget| start.elapsed() >= budget) {
                break;
            }
        }

        result.stats = self.stats;
        if let Some(mv) = result.best_move {
            info!(
                "[SEARCH] best move {} score {} depth {} nodes {}",
                mv, result.score, result.depth, result.stats.nodes
            );
        }
        result
    }
}
