//! Perft: counts the leaf nodes of the legal move tree to a fixed depth.
//!
//! Used to validate the generator against published reference counts.

use super::tables::AttackTables;
use super::generate_legal_moves;
use crate::board::Board;
use crate::types::*;

/// `depth` must not exceed `MAX_DEPTH`.
pub fn perft(board: &mut Board, tables: &AttackTables, depth: usize) -> u64 {
    let mut buffers = PlyBuffers::new();
    perft_inner(board, tables, depth, &mut buffers)
}

fn perft_inner(board: &mut Board, tables: &AttackTables, depth: usize, buffers: &mut PlyBuffers) -> u64 {
    if depth == 0 {
        return 1;
    }
    let count = generate_legal_moves(board, tables, buffers.ply_mut(depth));
    if depth == 1 {
        return count as u64;
    }

    let mut nodes = 0;
    for i in 0..count {
        let mv = buffers.ply(depth).get(i);
        board.make_move(mv);
        nodes += perft_inner(board, tables, depth - 1, buffers);
        board.unmake_move(mv);
    }
    nodes
}

/// Per-root-move node counts, in generation order.
pub fn perft_divide(board: &mut Board, tables: &AttackTables, depth: usize) -> Vec<(Move, u64)> {
    let mut buffers = PlyBuffers::new();
    let mut root = MoveList::new();
    generate_legal_moves(board, tables, &mut root);
    root.iter()
        .map(|&mv| {
            board.make_move(mv);
            let nodes = perft_inner(board, tables, depth.saturating_sub(1), &mut buffers);
            board.unmake_move(mv);
            (mv, nodes)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(fen: &str, depth: usize) -> u64 {
        let tables = AttackTables::new();
        let mut board = Board::from_fen(fen).unwrap();
        let before = board.clone();
        let nodes = perft(&mut board, &tables, depth);
        assert_eq!(board, before, "perft must leave the board untouched");
        nodes
    }

    #[test]
    fn test_perft_starting_position() {
        let fen = crate::constants::START_FEN;
        assert_eq!(count(fen, 1), 20);
        assert_eq!(count(fen, 2), 400);
        assert_eq!(count(fen, 3), 8_902);
    }

    #[test]
    fn test_perft_kiwipete() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        assert_eq!(count(fen, 1), 48);
        assert_eq!(count(fen, 2), 2_039);
    }

    #[test]
    fn test_perft_pawn_endgame() {
        let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
        assert_eq!(count(fen, 1), 14);
        assert_eq!(count(fen, 2), 191);
        assert_eq!(count(fen, 3), 2_812);
    }

    #[test]
    fn test_perft_promotions_position() {
        let fen = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
        assert_eq!(count(fen, 1), 6);
        assert_eq!(count(fen, 2), 264);
    }

    #[test]
    fn test_divide_sums_to_perft() {
        let tables = AttackTables::new();
        let mut board = Board::starting_position();
        let divide = perft_divide(&mut board, &tables, 2);
        assert_eq!(divide.len(), 20);
        assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), 400);
    }
}
