//! Move search
//!
//! Picks a move for the side to move in three stages, each tried only if the previous one
//! produced nothing:
//!
//! 1. **Book** - while the game still follows a recorded opening line, play a random recorded
//!    continuation without searching.
//! 2. **Tablebase** - with few pieces left, ask the external tablebase for the move.
//! 3. **Iterative deepening** - negamax alpha-beta at depth 1, 2, 3, … until the time budget or
//!    depth ceiling is reached. The deepest completed iteration wins.
//!
//! The search is synchronous and single-threaded. A [`Searcher`] owns its transposition table and
//! per-ply move buffers; the attack tables and opening book live in a shared, read-only
//! [`EngineContext`].
//!
//! ## Module Organization
//!
//! - `alphabeta` - root move loop and the negamax recursion
//! - `iterative` - iterative deepening driver and the public entry points
//! - `ordering` - capture/promotion move ordering
//! - `opening` - opening book stage
//! - `endgame` - tablebase stage

mod alphabeta;
mod endgame;
mod iterative;
mod opening;
mod ordering;

pub use ordering::{move_score, order_moves};

use std::fmt;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::book::OpeningBook;
use crate::constants::MAX_DEPTH;
use crate::evaluation::{Evaluator, PieceSquareEvaluator};
use crate::move_gen::AttackTables;
use crate::tablebase::{NoTablebase, Tablebase};
use crate::tt::TranspositionTable;
use crate::types::{Move, PlyBuffers};

/// Tunables for one [`Searcher`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Wall-clock budget checked between iterations.
    pub time_budget_ms: u64,
    pub max_depth: u32,
    /// Transposition table slots.
    pub tt_entries: usize,
    pub use_book: bool,
    /// Positions with at most this many pieces go to the tablebase first.
    pub tablebase_piece_limit: u32,
    /// Seed for book move selection; random when unset.
    pub book_seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_budget_ms: 1000,
            max_depth: 12,
            tt_entries: 1 << 20,
            use_book: true,
            tablebase_piece_limit: 5,
            book_seed: None,
        }
    }
}

impl SearchConfig {
    /// `max_depth` clamped to what the per-ply buffers can hold.
    pub fn depth_limit(&self) -> u32 {
        self.max_depth.clamp(1, MAX_DEPTH as u32)
    }
}

/// Which stage produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveSource {
    Book,
    Tablebase,
    Search,
}

impl fmt::Display for MoveSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveSource::Book => "book",
            MoveSource::Tablebase => "tablebase",
            MoveSource::Search => "search",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub tt_hits: u64,
    pub cutoffs: u64,
    /// Deepest completed iteration.
    pub depth: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` only when the side to move has no legal move.
    pub best_move: Option<Move>,
    /// Side-to-move relative.
    pub score: i32,
    pub depth: u32,
    pub source: MoveSource,
    pub stats: SearchStats,
}

/// Read-only data shared by every search: attack tables and the opening book.
#[derive(Debug, Default)]
pub struct EngineContext {
    pub tables: AttackTables,
    pub book: OpeningBook,
}

impl EngineContext {
    pub fn new(book: OpeningBook) -> Self {
        Self {
            tables: AttackTables::new(),
            book,
        }
    }

    pub fn shared(book: OpeningBook) -> Arc<Self> {
        Arc::new(Self::new(book))
    }
}

pub struct Searcher {
    ctx: Arc<EngineContext>,
    config: SearchConfig,
    evaluator: Box<dyn Evaluator>,
    tablebase: Box<dyn Tablebase>,
    tt: TranspositionTable,
    plies: PlyBuffers,
    stats: SearchStats,
    rng: StdRng,
}

impl Searcher {
    /// A searcher using the piece-square evaluator and no tablebase.
    pub fn new(ctx: Arc<EngineContext>, config: SearchConfig) -> Self {
        let rng = match config.book_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            ctx,
            tt: TranspositionTable::new(config.tt_entries),
            config,
            evaluator: Box::new(PieceSquareEvaluator),
            tablebase: Box::new(NoTablebase),
            plies: PlyBuffers::new(),
            stats: SearchStats::default(),
            rng,
        }
    }

    pub fn with_evaluator(mut self, evaluator: impl Evaluator + 'static) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    pub fn with_tablebase(mut self, tablebase: impl Tablebase + 'static) -> Self {
        self.tablebase = Box::new(tablebase);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn context(&self) -> &Arc<EngineContext> {
        &self.ctx
    }

    /// Statistics of the most recent search.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

impl fmt::Debug for Searcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Searcher")
            .field("config", &self.config)
            .field("tt", &self.tt)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: SearchConfig = serde_json::from_str(r#"{"max_depth": 4}"#).unwrap();
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.time_budget_ms, 1000);
        assert!(config.use_book);
        assert_eq!(config.book_seed, None);
    }

    #[test]
    fn test_depth_limit_is_clamped() {
        let config = SearchConfig {
            max_depth: 500,
            ..SearchConfig::default()
        };
        assert_eq!(config.depth_limit(), MAX_DEPTH as u32);
    }
}
