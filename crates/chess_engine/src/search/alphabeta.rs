//! Negamax with alpha-beta pruning
//!
//! Scores are relative to the side to move at each node; a child's score is negated on the way
//! up and the window is swapped and negated on the way down. The recursion is fail-soft: a node
//! may return a value outside `(alpha, beta)`, which is then stored as a bound.
//!
//! Recursion depth is bounded by [`MAX_DEPTH`](crate::constants::MAX_DEPTH), the same bound the
//! per-ply move buffers are sized for.

use super::ordering::order_moves;
use super::Searcher;
use crate::board::Board;
use crate::constants::*;
use crate::move_gen::generate_legal_moves;
use crate::tt::TTFlag;
use crate::types::Move;

impl Searcher {
    /// Score of a node with no legal moves: mated (earlier mates worse) or stalemate.
    pub(super) fn terminal_score(&self, board: &Board, depth: u32) -> i32 {
        if board.in_check(&self.ctx.tables) {
            -(MATE_SCORE + depth as i32)
        } else {
            0
        }
    }

    /// Searches every root move to `depth` and returns the best one with its score.
    pub(super) fn search_root(&mut self, board: &mut Board, depth: u32) -> (Option<Move>, i32) {
        self.stats.nodes += 1;
        let count = generate_legal_moves(board, &self.ctx.tables, self.plies.ply_mut(0));
        if count == 0 {
            return (None, self.terminal_score(board, depth));
        }

        let hash = board.hash();
        let hash_move = self.tt.probe(hash).and_then(|entry| entry.best_move);
        order_moves(self.plies.ply_mut(0).as_mut_slice(), hash_move);

        let beta = AB_INF;
        let mut alpha = -AB_INF;
        let mut best_move = None;
        let mut best_score = -AB_INF;

        for i in 0..count {
            let mv = self.plies.ply(0).get(i);
            board.make_move(mv);
            let score = -self.negamax(board, depth - 1, 1, -beta, -alpha);
            board.unmake_move(mv);

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(score);
        }

        self.tt.store(hash, depth, best_score, TTFlag::Exact, best_move);
        (best_move, best_score)
    }

    pub(super) fn negamax(&mut self, board: &mut Board, depth: u32, ply: usize, mut alpha: i32, beta: i32) -> i32 {
        self.stats.nodes += 1;
        let hash = board.hash();

        let mut hash_move = None;
        if let Some(entry) = self.tt.probe(hash) {
            self.stats.tt_hits += 1;
            if let Some(score) = entry.cutoff(depth, alpha, beta) {
                return score;
            }
            hash_move = entry.best_move;
        }

        if depth == 0 {
            return self.evaluator.evaluate(board);
        }

        let count = generate_legal_moves(board, &self.ctx.tables, self.plies.ply_mut(ply));
        if count == 0 {
            return self.terminal_score(board, depth);
        }
        order_moves(self.plies.ply_mut(ply).as_mut_slice(), hash_move);

        let original_alpha = alpha;
        let mut best_score = -AB_INF;
        let mut best_move = None;

        for i in 0..count {
            let mv = self.plies.ply(ply).get(i);
            board.make_move(mv);
            let score = -self.negamax(board, depth - 1, ply + 1, -beta, -alpha);
            board.unmake_move(mv);

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(score);
            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        let flag = if best_score <= original_alpha {
            TTFlag::UpperBound
        } else if best_score >= beta {
            TTFlag::LowerBound
        } else {
            TTFlag::Exact
        };
        self.tt.store(hash, depth, best_score, flag, best_move);
        best_score
    }
}
