//! # Chess Engine
//!
//! A bitboard chess engine: legal move generation over precomputed attack tables, incremental
//! make/unmake with Zobrist hashing, and an iterative-deepening alpha-beta search backed by a
//! transposition table, an opening book and an optional endgame tablebase.
//!
//! ## Module Organization
//!
//! - `types` - squares, pieces, moves and the fixed-size move buffers
//! - `board` - bitboard position, FEN, make/unmake
//! - `move_gen` - attack tables, pseudo-legal and legal generation, perft
//! - `tt` - transposition table
//! - `search` - book, tablebase and iterative deepening stages
//! - `book` - opening move tree
//! - `notation` - algebraic notation in both directions
//! - `evaluation` - the evaluator contract and two evaluators
//! - `tablebase` - the tablebase contract
//! - `api` - game wrapper
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use chess_engine::api::{new_game, play_notation, reply};
//! use chess_engine::search::{EngineContext, SearchConfig};
//!
//! let config = SearchConfig { max_depth: 2, use_book: false, ..SearchConfig::default() };
//! let mut game = new_game(Arc::new(EngineContext::default()), config);
//! play_notation(&mut game, "e4").unwrap();
//! let result = reply(&mut game);
//! assert!(result.best_move.is_some());
//! ```

pub mod api;
pub mod bitset;
pub mod board;
pub mod book;
pub mod constants;
pub mod error;
pub mod evaluation;
pub mod hash;
pub mod move_gen;
pub mod notation;
pub mod search;
pub mod tablebase;
pub mod tt;
pub mod types;

pub use board::Board;
pub use book::OpeningBook;
pub use error::{ChessEngineError, ChessEngineResult};
pub use search::{EngineContext, MoveSource, SearchConfig, SearchResult, Searcher};
pub use types::{Color, Move, PieceType, Square};
