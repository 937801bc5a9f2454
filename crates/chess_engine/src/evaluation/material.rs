//! Material evaluation
//!
//! Counts piece values for each side. Kings are worth nothing here; their loss is scored by the
//! search as mate.

use super::Evaluator;
use crate::board::Board;
use crate::constants::FIGURE_VALUE;
use crate::types::*;

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

/// White material minus black material.
pub(super) fn material_balance(board: &Board) -> i32 {
    PieceType::ALL
        .into_iter()
        .map(|piece| {
            let white = board.pieces(Color::White, piece).count_ones() as i32;
            let black = board.pieces(Color::Black, piece).count_ones() as i32;
            (white - black) * FIGURE_VALUE[piece.index()]
        })
        .sum()
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        let score = material_balance(board);
        match board.side_to_move() {
            Color::White => score,
            Color::Black => -score,
        }
    }
}
