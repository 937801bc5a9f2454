//! Endgame tablebase contract
//!
//! The engine does not ship tablebase files or a probing library. It defines what it needs from
//! one: a win/draw/loss probe and a root-move probe over the raw bitboard unions of a position.
//! A probe returning `None` is the "failed" signal (no data for this material), and the search
//! falls back to its ordinary path.
//!
//! The Fathom probing library packs its root result into a `u32`; [`TbMove::from_fathom`] and
//! [`Wdl::from_fathom`] decode that layout so an adapter around it stays a thin shim.

use crate::board::Board;
use crate::types::*;

/// Game-theoretic outcome for the side to move. Ordered worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Wdl {
    Loss,
    Draw,
    Win,
}

impl Wdl {
    /// Decodes a Fathom WDL value. Blessed losses and cursed wins are draws under the
    /// fifty-move rule.
    pub fn from_fathom(value: u32) -> Option<Wdl> {
        match value {
            0 => Some(Wdl::Loss),
            1..=3 => Some(Wdl::Draw),
            4 => Some(Wdl::Win),
            _ => None,
        }
    }

    /// The same outcome seen by the other player.
    pub fn flip(self) -> Wdl {
        match self {
            Wdl::Loss => Wdl::Win,
            Wdl::Draw => Wdl::Draw,
            Wdl::Win => Wdl::Loss,
        }
    }
}

/// The position as a tablebase prober sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TbPosition {
    pub white: u64,
    pub black: u64,
    pub kings: u64,
    pub queens: u64,
    pub rooks: u64,
    pub bishops: u64,
    pub knights: u64,
    pub pawns: u64,
    pub half_move_clock: u32,
    pub castling: u8,
    /// En-passant target square, 0 if none.
    pub en_passant: u32,
    pub white_to_move: bool,
}

impl TbPosition {
    pub fn from_board(board: &Board) -> Self {
        Self {
            white: board.occupancy(Color::White),
            black: board.occupancy(Color::Black),
            kings: board.piece_union(PieceType::King),
            queens: board.piece_union(PieceType::Queen),
            rooks: board.piece_union(PieceType::Rook),
            bishops: board.piece_union(PieceType::Bishop),
            knights: board.piece_union(PieceType::Knight),
            pawns: board.piece_union(PieceType::Pawn),
            half_move_clock: board.half_move_clock(),
            castling: board.castling_rights(),
            en_passant: board.en_passant().map_or(0, u32::from),
            white_to_move: board.side_to_move() == Color::White,
        }
    }

    pub fn piece_count(&self) -> u32 {
        (self.white | self.black).count_ones()
    }
}

/// A root move suggested by a tablebase, before it is matched against the legal move list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TbMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

const FATHOM_FAILED: u32 = 0xFFFF_FFFF;

impl TbMove {
    /// Decodes a Fathom root result: to-square in bits 4..=9, from-square in bits 10..=15,
    /// promotion in bits 16..=18 (1 queen, 2 rook, 3 bishop, 4 knight).
    pub fn from_fathom(result: u32) -> Option<TbMove> {
        if result == FATHOM_FAILED {
            return None;
        }
        let to = ((result >> 4) & 0x3F) as Square;
        let from = ((result >> 10) & 0x3F) as Square;
        if from == to {
            // checkmate or stalemate at the root, no move to play
            return None;
        }
        let promotion = match (result >> 16) & 0x7 {
            1 => Some(PieceType::Queen),
            2 => Some(PieceType::Rook),
            3 => Some(PieceType::Bishop),
            4 => Some(PieceType::Knight),
            _ => None,
        };
        Some(TbMove { from, to, promotion })
    }

    pub fn matches(&self, mv: &Move) -> bool {
        self.from == mv.from && self.to == mv.to && self.promotion == mv.promotion
    }
}

/// An external endgame database.
pub trait Tablebase: Send + Sync {
    /// Win/draw/loss for the side to move, `None` if the position is not covered.
    fn probe_wdl(&self, position: &TbPosition) -> Option<Wdl>;

    /// Best root move, `None` if the position is not covered.
    fn probe_root(&self, position: &TbPosition) -> Option<TbMove>;

    /// Largest piece count the tables cover.
    fn max_pieces(&self) -> u32 {
        5
    }
}

/// A tablebase with no data. Every probe fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTablebase;

impl Tablebase for NoTablebase {
    fn probe_wdl(&self, _: &TbPosition) -> Option<Wdl> {
        None
    }

    fn probe_root(&self, _: &TbPosition) -> Option<TbMove> {
        None
    }

    fn max_pieces(&self) -> u32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fathom_failed() {
        assert_eq!(TbMove::from_fathom(0xFFFF_FFFF), None);
    }

    #[test]
    fn test_fathom_decodes_squares_and_promotion() {
        // b7 (49) -> b8 (57), promotes to queen, WDL win
        let result = 4 | (57 << 4) | (49 << 10) | (1 << 16);
        let mv = TbMove::from_fathom(result).unwrap();
        assert_eq!(mv.from, 49);
        assert_eq!(mv.to, 57);
        assert_eq!(mv.promotion, Some(PieceType::Queen));
    }

    #[test]
    fn test_wdl_ordering_and_flip() {
        assert!(Wdl::Loss < Wdl::Draw && Wdl::Draw < Wdl::Win);
        assert_eq!(Wdl::Win.flip(), Wdl::Loss);
        assert_eq!(Wdl::from_fathom(3), Some(Wdl::Draw));
        assert_eq!(Wdl::from_fathom(9), None);
    }

    #[test]
    fn test_position_from_board() {
        let board = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        let position = TbPosition::from_board(&board);
        assert_eq!(position.piece_count(), 3);
        assert_eq!(position.pawns, 1 << 12);
        assert!(position.white_to_move);
        assert_eq!(position.white & position.black, 0);
    }

    #[test]
    fn test_no_tablebase_always_fails() {
        let position = TbPosition::from_board(&Board::starting_position());
        assert!(NoTablebase.probe_wdl(&position).is_none());
        assert!(NoTablebase.probe_root(&position).is_none());
    }
}
