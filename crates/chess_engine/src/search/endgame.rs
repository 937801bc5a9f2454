//! Tablebase stage
//!
//! Used at the root when few pieces remain. The tablebase's own root move is preferred; if it
//! has none that matches a legal move, every legal reply is WDL-probed and the one leaving the
//! opponent worst off is played. A single failed probe abandons the stage and the caller
//! searches normally.

use std::sync::Arc;

use tracing::{debug, info};

use super::{MoveSource, SearchResult, SearchStats, Searcher};
use crate::board::Board;
use crate::constants::MATE_SCORE;
use crate::move_gen::generate_legal_moves;
use crate::tablebase::{TbPosition, Wdl};
use crate::types::{Move, MoveList};

const TB_WIN_SCORE: i32 = MATE_SCORE / 2;

fn wdl_score(wdl: Wdl) -> i32 {
    match wdl {
        Wdl::Loss => -TB_WIN_SCORE,
        Wdl::Draw => 0,
        Wdl::Win => TB_WIN_SCORE,
    }
}

impl Searcher {
    pub(super) fn tablebase_move(&mut self, board: &mut Board) -> Option<SearchResult> {
        let limit = self.config.tablebase_piece_limit.min(self.tablebase.max_pieces());
        if board.count_pieces() > limit {
            return None;
        }

        let ctx = Arc::clone(&self.ctx);
        let mut legal = MoveList::new();
        if generate_legal_moves(board, &ctx.tables, &mut legal) == 0 {
            return None;
        }

        let position = TbPosition::from_board(board);
        if let Some(tb_move) = self.tablebase.probe_root(&position) {
            if let Some(&mv) = legal.iter().find(|mv| tb_move.matches(mv)) {
                let score = self.tablebase.probe_wdl(&position).map_or(0, wdl_score);
                info!("[TABLEBASE] root probe chose {}", mv);
                return Some(tablebase_result(mv, score));
            }
            debug!("[TABLEBASE] root move {:?} is not legal here", tb_move);
        }

        let mut best: Option<(Move, Wdl)> = None;
        for &mv in legal.iter() {
            board.make_move(mv);
            let reply = self.tablebase.probe_wdl(&TbPosition::from_board(board));
            board.unmake_move(mv);

            let Some(reply) = reply else {
                debug!("[TABLEBASE] probe failed after {}, falling back to search", mv);
                return None;
            };
            let ours = reply.flip();
            if best.map_or(true, |(_, current)| ours > current) {
                best = Some((mv, ours));
            }
        }

        let (mv, outcome) = best?;
        info!("[TABLEBASE] {} keeps a {:?}", mv, outcome);
        Some(tablebase_result(mv, wdl_score(outcome)))
    }
}

fn tablebase_result(mv: Move, score: i32) -> SearchResult {
    SearchResult {
        best_move: Some(mv),
        score,
        depth: 0,
        source: MoveSource::Tablebase,
        stats: SearchStats::default(),
    }
}
