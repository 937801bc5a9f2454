//! Error types for chess engine
//!
//! Provides custom error types for chess engine operations including
//! notation conversion, position setup, move validation and the move wire format.
//!
//! Running out of legal moves is not an error (it is checkmate or stalemate), and misuse of the
//! make/unmake stack is a contract violation checked only in debug builds.

use thiserror::Error;

/// Errors that can occur in the chess engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessEngineError {
    /// Algebraic token could not be parsed at all
    #[error("Malformed notation '{token}': {reason}")]
    Notation { token: String, reason: String },

    /// Algebraic token parsed, but no legal move in the position matches it
    #[error("No legal move matches notation '{token}'")]
    NoMatchingMove { token: String },

    /// Algebraic token matches more than one legal move
    #[error("Notation '{token}' matches {count} legal moves")]
    AmbiguousMove { token: String, count: usize },

    /// Square text outside a1..h8
    #[error("Invalid square: '{text}'")]
    InvalidSquare { text: String },

    /// FEN string could not be parsed
    #[error("Invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    /// Seven-field wire encoding could not be decoded
    #[error("Invalid wire move {fields:?}: {reason}")]
    InvalidWireMove { fields: [i32; 7], reason: String },

    /// Move submitted to a game is not legal in the current position
    #[error("Illegal move: from square {from} to square {to}")]
    IllegalMove { from: u8, to: u8 },

    /// Undo requested on a game with no moves played
    #[error("No move to undo")]
    NothingToUndo,
}

/// Result type alias for chess engine operations
pub type ChessEngineResult<T> = Result<T, ChessEngineError>;
