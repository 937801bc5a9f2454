//! Public API for the chess engine
//!
//! A [`Game`] is one board plus a [`Searcher`] bound to a shared, read-only
//! [`EngineContext`]. Many games can share one context; each game owns its own search state.
//!
//! ## Module Organization
//!
//! - `game` - Game lifecycle (new_game, from_fen, reset_game)
//! - `moves` - Move execution and validation (play_notation, do_move, undo_move, is_legal_move)
//! - `state` - Game state queries and AI (get_game_state, reply, history_notation)

mod game;
mod moves;
mod state;

pub use game::{new_game, reset_game, Game};
pub use moves::{do_move, is_legal_move, legal_moves, play_notation, undo_move};
pub use state::{get_game_state, history_notation, reply, GameStatus};
