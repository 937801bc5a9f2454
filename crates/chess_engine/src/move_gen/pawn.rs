//! Pawn move generation
//!
//! Pawns are the only pieces whose quiet moves and captures differ:
//! - single push onto an empty square, double push from the starting rank through an empty square
//! - diagonal captures of enemy pieces, using the precomputed pawn attack masks
//! - en passant onto the target square left by an enemy double step
//! - every move onto the last rank expands into four promotions (queen, rook, bishop, knight)

use super::tables::AttackTables;
use crate::board::Board;
use crate::constants::{RANK_1, RANK_2, RANK_7, RANK_8};
use crate::types::*;

fn push_pawn_move(out: &mut MoveList, mut mv: Move) {
    if square_bit(mv.to) & (RANK_1 | RANK_8) != 0 {
        for promotion in PieceType::PROMOTIONS {
            mv.promotion = Some(promotion);
            out.push(mv);
        }
    } else {
        out.push(mv);
    }
}

pub fn generate_pawn_moves(board: &Board, tables: &AttackTables, out: &mut MoveList) {
    let us = board.side_to_move();
    let them = us.opposite();
    let empty = !board.occupied();
    let enemies = board.occupancy(them);
    let (forward, start_rank): (i8, u64) = match us {
        Color::White => (8, RANK_2),
        Color::Black => (-8, RANK_7),
    };

    let mut pawns = board.pieces(us, PieceType::Pawn);
    while pawns != 0 {
        let from = pawns.trailing_zeros() as Square;
        pawns &= pawns - 1;

        let single = from as i8 + forward;
        if !(0..64).contains(&single) {
            continue;
        }
        let single = single as Square;
        if square_bit(single) & empty != 0 {
            push_pawn_move(out, Move::quiet(from, single, PieceType::Pawn, us));
            let double = (single as i8 + forward) as Square;
            if square_bit(from) & start_rank != 0 && square_bit(double) & empty != 0 {
                out.push(Move::quiet(from, double, PieceType::Pawn, us));
            }
        }

        let attacks = tables.pawn(us, from);
        let mut captures = attacks & enemies;
        while captures != 0 {
            let to = captures.trailing_zeros() as Square;
            captures &= captures - 1;
            let mut mv = Move::quiet(from, to, PieceType::Pawn, us);
            mv.captured = board.piece_at(to).map(|(_, piece)| piece);
            push_pawn_move(out, mv);
        }

        if let Some(target) = board.en_passant() {
            if attacks & square_bit(target) != 0 {
                let mut mv = Move::quiet(from, target, PieceType::Pawn, us);
                mv.captured = Some(PieceType::Pawn);
                mv.en_passant = true;
                out.push(mv);
            }
        }
    }
}
