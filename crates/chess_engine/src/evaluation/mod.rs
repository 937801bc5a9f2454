//! Static position evaluation
//!
//! The search consumes evaluation through the [`Evaluator`] trait only: a pure function from a
//! position to an integer score, relative to the side to move (positive is good for the player
//! about to move). Search leaves call it at depth zero.
//!
//! ## Module Organization
//!
//! - `material` - material balance only
//! - `pst` - material plus piece-square tables, the default

mod material;
mod pst;

pub use material::MaterialEvaluator;
pub use pst::PieceSquareEvaluator;

use crate::board::Board;

/// Scores a position from the perspective of the side to move.
///
/// Implementations must be deterministic and must not mutate the board.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, board: &Board) -> i32;
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn evaluate(&self, board: &Board) -> i32 {
        (**self).evaluate(board)
    }
}
